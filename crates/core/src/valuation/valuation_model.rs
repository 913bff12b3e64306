use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gold and USD value of one unit of a currency.
///
/// `None` means the currency could not be resolved (broken peg chain, missing
/// price, cycle or invalid base value) and carried no usable fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrencyValuation {
    pub gold: Option<Decimal>,
    pub usd: Option<Decimal>,
}

impl CurrencyValuation {
    /// Derives the USD value from the gold value. USD is only reported when
    /// gold resolved and the gold price is positive.
    pub fn from_gold(gold: Option<Decimal>, gold_price_usd: Decimal) -> Self {
        let usd = gold
            .filter(|_| gold_price_usd > Decimal::ZERO)
            .and_then(|oz| oz.checked_mul(gold_price_usd));
        Self { gold, usd }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.gold.is_some()
    }

    pub fn round_dp(&self, decimals: u32) -> Self {
        Self {
            gold: self.gold.map(|v| v.round_dp(decimals)),
            usd: self.usd.map(|v| v.round_dp(decimals)),
        }
    }
}

/// Valuations keyed by currency id.
pub type CurrencyValuations = BTreeMap<String, CurrencyValuation>;
