use crate::constants::{GOLD_PEG_TARGET, USD_PEG_TARGET};
use crate::currencies::{Currency, PegType};

/// A currency's peg after normalizing its type and target.
///
/// A target of "GOLD" (any casing) wins over the declared peg type; "USD" is
/// only meaningful for currency pegs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peg<'a> {
    Gold,
    Usd,
    Metal(&'a str),
    Material(&'a str),
    Currency(&'a str),
    /// Currency peg with an empty target.
    Unpegged,
}

impl<'a> Peg<'a> {
    pub fn of(currency: &'a Currency) -> Self {
        let target = currency.peg_target.as_str();
        let upper_target = target.to_uppercase();

        if upper_target == GOLD_PEG_TARGET {
            return Peg::Gold;
        }

        match currency.peg_type {
            PegType::Metal => Peg::Metal(target),
            PegType::Material => Peg::Material(target),
            PegType::Currency if upper_target == USD_PEG_TARGET => Peg::Usd,
            PegType::Currency if target.is_empty() => Peg::Unpegged,
            PegType::Currency => Peg::Currency(target),
        }
    }
}
