use super::valuation_calculator::resolve_currencies;
use super::valuation_errors::ValuationError;
use super::valuation_model::{CurrencyValuation, CurrencyValuations};
use crate::constants::{GOLD_PEG_TARGET, USD_PEG_TARGET};
use crate::currencies::Currency;
use crate::prices::PriceIndex;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Result of one aggregation pass, addressable by id and by name.
///
/// Conversions go through the gold basis. "GOLD" and "USD" are accepted as
/// units of their own and take precedence over currencies with those names.
#[derive(Debug, Clone)]
pub struct ValuationTable {
    gold_price_usd: Decimal,
    by_id: CurrencyValuations,
    by_name: HashMap<String, Option<Decimal>>,
    by_upper_name: HashMap<String, Option<Decimal>>,
    names: Vec<String>,
}

impl ValuationTable {
    pub fn build(
        currencies: &[Currency],
        gold_price_usd: Decimal,
        metals: &PriceIndex,
        materials: &PriceIndex,
    ) -> Self {
        let mut table = Self {
            gold_price_usd,
            by_id: CurrencyValuations::new(),
            by_name: HashMap::new(),
            by_upper_name: HashMap::new(),
            names: Vec::new(),
        };

        for resolved in resolve_currencies(currencies, gold_price_usd, metals, materials) {
            if let Some(id) = resolved.currency.id.as_deref() {
                table.by_id.insert(
                    id.to_string(),
                    CurrencyValuation::from_gold(resolved.gold, gold_price_usd),
                );
            }
            if let Some(name) = resolved.currency.name.as_deref() {
                if table.by_name.insert(name.to_string(), resolved.gold).is_none() {
                    table.names.push(name.to_string());
                }
                table.by_upper_name.insert(name.to_uppercase(), resolved.gold);
            }
        }

        table
    }

    pub fn gold_price_usd(&self) -> Decimal {
        self.gold_price_usd
    }

    pub fn valuations(&self) -> &CurrencyValuations {
        &self.by_id
    }

    pub fn into_valuations(self) -> CurrencyValuations {
        self.by_id
    }

    pub fn valuation(&self, id: &str) -> Option<&CurrencyValuation> {
        self.by_id.get(id)
    }

    /// Distinct currency names in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Ounces of gold per unit of `unit`.
    pub fn gold_value(&self, unit: &str) -> Result<Decimal, ValuationError> {
        self.to_gold(Decimal::ONE, unit)
    }

    /// US dollars per unit of `unit`.
    pub fn usd_value(&self, unit: &str) -> Result<Decimal, ValuationError> {
        if unit.to_uppercase() == USD_PEG_TARGET {
            return Ok(Decimal::ONE);
        }
        let oz_gold = self.gold_value(unit)?;
        self.from_gold(oz_gold, USD_PEG_TARGET)
    }

    /// Expresses `amount` of `unit` in ounces of gold.
    pub fn to_gold(&self, amount: Decimal, unit: &str) -> Result<Decimal, ValuationError> {
        let upper = unit.to_uppercase();
        if upper == GOLD_PEG_TARGET {
            return Ok(amount);
        }
        if upper == USD_PEG_TARGET {
            let price = self.usable_gold_price()?;
            return amount
                .checked_div(price)
                .ok_or_else(|| ValuationError::Overflow(unit.to_string()));
        }

        let per_unit = self.currency_gold(unit, &upper)?;
        amount
            .checked_mul(per_unit)
            .ok_or_else(|| ValuationError::Overflow(unit.to_string()))
    }

    /// Expresses `oz_gold` ounces of gold in units of `unit`.
    pub fn from_gold(&self, oz_gold: Decimal, unit: &str) -> Result<Decimal, ValuationError> {
        let upper = unit.to_uppercase();
        if upper == GOLD_PEG_TARGET {
            return Ok(oz_gold);
        }
        if upper == USD_PEG_TARGET {
            let price = self.usable_gold_price()?;
            return oz_gold
                .checked_mul(price)
                .ok_or_else(|| ValuationError::Overflow(unit.to_string()));
        }

        let per_unit = self.currency_gold(unit, &upper)?;
        if per_unit.is_zero() {
            return Err(ValuationError::ZeroValue(unit.to_string()));
        }
        oz_gold
            .checked_div(per_unit)
            .ok_or_else(|| ValuationError::Overflow(unit.to_string()))
    }

    /// Converts `amount` of `from` into `to`.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, ValuationError> {
        let oz_gold = self.to_gold(amount, from)?;
        self.from_gold(oz_gold, to)
    }

    /// How many units of each named currency equal one unit of `base`.
    ///
    /// Currencies without a positive gold value map to `None`. A "USD" entry is
    /// added when no currency carries that name and the gold price is usable.
    pub fn rates_relative_to(
        &self,
        base: &str,
    ) -> Result<BTreeMap<String, Option<Decimal>>, ValuationError> {
        let base_gold = self.gold_value(base)?;

        let mut rates: BTreeMap<String, Option<Decimal>> = self
            .names
            .iter()
            .map(|name| {
                let rate = self
                    .by_name
                    .get(name)
                    .copied()
                    .flatten()
                    .filter(|gold| *gold > Decimal::ZERO)
                    .and_then(|gold| base_gold.checked_div(gold));
                (name.clone(), rate)
            })
            .collect();

        if !rates.contains_key(USD_PEG_TARGET) {
            if let Ok(price) = self.usable_gold_price() {
                rates.insert(USD_PEG_TARGET.to_string(), base_gold.checked_mul(price));
            }
        }

        Ok(rates)
    }

    fn currency_gold(&self, unit: &str, upper: &str) -> Result<Decimal, ValuationError> {
        let gold = self
            .by_name
            .get(unit)
            .or_else(|| self.by_upper_name.get(upper))
            .ok_or_else(|| ValuationError::UnknownCurrency(unit.to_string()))?;
        gold.ok_or_else(|| ValuationError::Unresolved(unit.to_string()))
    }

    fn usable_gold_price(&self) -> Result<Decimal, ValuationError> {
        if self.gold_price_usd > Decimal::ZERO {
            Ok(self.gold_price_usd)
        } else {
            Err(ValuationError::MissingGoldPrice)
        }
    }
}
