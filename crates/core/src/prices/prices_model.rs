//! Metal and material price quote models.

use crate::constants::{OUNCES_PER_POUND, OUNCE_UNIT, POUND_UNIT};
use crate::utils::field_parsing::{deserialize_name, NumericField};
use crate::valuation::ValuationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which price service a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceKind {
    Metal,
    Material,
}

impl fmt::Display for PriceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PriceKind::Metal => write!(f, "metal"),
            PriceKind::Material => write!(f, "material"),
        }
    }
}

/// One quote from a session price snapshot.
///
/// The metal service names its entries `metal_name`, the material service
/// `material_name`; both land in `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(
        default,
        alias = "metal_name",
        alias = "material_name",
        deserialize_with = "deserialize_name"
    )]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub price_per_unit_usd: NumericField,
    #[serde(default)]
    pub price_per_oz_gold: NumericField,
    #[serde(default)]
    pub session_number: Option<i64>,
}

impl PriceEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_price_per_oz_gold(mut self, price: Decimal) -> Self {
        self.price_per_oz_gold = NumericField::Value(price);
        self
    }

    pub fn with_price_per_unit_usd(mut self, price: Decimal) -> Self {
        self.price_per_unit_usd = NumericField::Value(price);
        self
    }

    pub fn with_session(mut self, session_number: i64) -> Self {
        self.session_number = Some(session_number);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Gold value of `quantity` units of this entry.
    ///
    /// A positive `price_per_oz_gold` is used directly. Otherwise a positive
    /// `price_per_unit_usd` is converted through the ambient gold price, which
    /// must itself be positive.
    pub fn value_in_gold(&self, quantity: Decimal, gold_price_usd: Decimal) -> Option<Decimal> {
        if let Some(ratio) = self.price_per_oz_gold.positive() {
            return quantity.checked_mul(ratio);
        }

        let usd_price = self.price_per_unit_usd.positive()?;
        if gold_price_usd <= Decimal::ZERO {
            return None;
        }
        quantity
            .checked_mul(usd_price)
            .and_then(|usd| usd.checked_div(gold_price_usd))
    }

    /// Gold value of `amount` of this good weighed in `unit`.
    ///
    /// The amount is first expressed in the quote's own unit, converting
    /// between pounds and ounces when they differ, then multiplied by
    /// `price_per_oz_gold`.
    pub fn quantity_in_gold(&self, amount: Decimal, unit: &str) -> Result<Decimal, ValuationError> {
        let name = self.name.clone().unwrap_or_default();
        let quote_unit = self.unit.as_deref();

        let amount_in_quote_unit = match (unit, quote_unit) {
            (POUND_UNIT, Some(OUNCE_UNIT)) => amount.checked_mul(OUNCES_PER_POUND),
            (OUNCE_UNIT, Some(POUND_UNIT)) => amount.checked_div(OUNCES_PER_POUND),
            (_, Some(quoted)) if quoted == unit => Some(amount),
            _ => {
                return Err(ValuationError::UnitMismatch {
                    name,
                    from: unit.to_string(),
                    to: quote_unit.unwrap_or_default().to_string(),
                })
            }
        }
        .ok_or_else(|| ValuationError::Overflow(name.clone()))?;

        let ratio = self
            .price_per_oz_gold
            .non_negative()
            .ok_or_else(|| ValuationError::MissingGoldRatio(name.clone()))?;

        amount_in_quote_unit
            .checked_mul(ratio)
            .ok_or(ValuationError::Overflow(name))
    }
}

/// A gemstone type valued per carat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gemstone {
    #[serde(default, deserialize_with = "deserialize_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub value_per_carat_oz_gold: NumericField,
}

impl Gemstone {
    pub fn new(name: impl Into<String>, value_per_carat_oz_gold: Decimal) -> Self {
        Self {
            name: Some(name.into()),
            value_per_carat_oz_gold: NumericField::Value(value_per_carat_oz_gold),
        }
    }

    /// Gold value of a stone of `carats`. Fails when the per-carat value is
    /// zero or not set.
    pub fn value_in_gold(&self, carats: Decimal) -> Result<Decimal, ValuationError> {
        let name = self.name.clone().unwrap_or_default();
        let per_carat = self
            .value_per_carat_oz_gold
            .value()
            .filter(|value| !value.is_zero())
            .ok_or_else(|| ValuationError::GemstoneWithoutValue(name.clone()))?;

        carats
            .checked_mul(per_carat)
            .ok_or(ValuationError::Overflow(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_direct_gold_ratio_preferred() {
        let entry = PriceEntry::new("Silver")
            .with_price_per_oz_gold(dec!(0.013))
            .with_price_per_unit_usd(dec!(26));

        assert_eq!(entry.value_in_gold(dec!(10), dec!(2000)), Some(dec!(0.13)));
    }

    #[test]
    fn test_usd_price_through_gold_price() {
        let entry = PriceEntry::new("Copper").with_price_per_unit_usd(dec!(4.0));

        assert_eq!(entry.value_in_gold(dec!(5), dec!(2000)), Some(dec!(0.01)));
    }

    #[test]
    fn test_zero_gold_ratio_falls_through_to_usd() {
        let entry = PriceEntry::new("Tin")
            .with_price_per_oz_gold(Decimal::ZERO)
            .with_price_per_unit_usd(dec!(10));

        assert_eq!(entry.value_in_gold(dec!(1), dec!(2000)), Some(dec!(0.005)));
    }

    #[test]
    fn test_usd_price_needs_positive_gold_price() {
        let entry = PriceEntry::new("Copper").with_price_per_unit_usd(dec!(4.0));

        assert_eq!(entry.value_in_gold(dec!(5), Decimal::ZERO), None);
        assert_eq!(entry.value_in_gold(dec!(5), dec!(-1)), None);
    }

    #[test]
    fn test_entry_without_prices() {
        assert_eq!(
            PriceEntry::new("Lead").value_in_gold(dec!(1), dec!(2000)),
            None
        );
    }

    #[test]
    fn test_metal_and_material_field_names() {
        let metal: PriceEntry = serde_json::from_value(json!({
            "metal_name": "Gold",
            "unit": "oz",
            "price_per_unit_usd": 2350.5,
            "price_per_oz_gold": 1.0,
            "session_number": 4
        }))
        .unwrap();
        let material: PriceEntry = serde_json::from_value(json!({
            "material_name": "Silk",
            "price_per_unit_usd": "12"
        }))
        .unwrap();

        assert_eq!(metal.name.as_deref(), Some("Gold"));
        assert_eq!(metal.price_per_unit_usd.value(), Some(dec!(2350.5)));
        assert_eq!(metal.session_number, Some(4));
        assert_eq!(material.name.as_deref(), Some("Silk"));
        assert_eq!(material.price_per_unit_usd.value(), Some(dec!(12)));
        assert!(material.price_per_oz_gold.is_missing());
    }

    #[test]
    fn test_quantity_in_same_unit() {
        let silver = PriceEntry::new("Silver")
            .with_unit("oz")
            .with_price_per_oz_gold(dec!(0.013));

        assert_eq!(silver.quantity_in_gold(dec!(10), "oz"), Ok(dec!(0.13)));
    }

    #[test]
    fn test_quantity_converts_pounds_and_ounces() {
        let per_ounce = PriceEntry::new("Copper")
            .with_unit("oz")
            .with_price_per_oz_gold(dec!(0.001));
        let per_pound = PriceEntry::new("Iron")
            .with_unit("lb")
            .with_price_per_oz_gold(dec!(0.004));

        // 2 lb = 32 oz
        assert_eq!(per_ounce.quantity_in_gold(dec!(2), "lb"), Ok(dec!(0.032)));
        // 8 oz = 0.5 lb
        assert_eq!(per_pound.quantity_in_gold(dec!(8), "oz"), Ok(dec!(0.002)));
    }

    #[test]
    fn test_quantity_in_unknown_unit() {
        let silver = PriceEntry::new("Silver")
            .with_unit("oz")
            .with_price_per_oz_gold(dec!(0.013));
        let unitless = PriceEntry::new("Tin").with_price_per_oz_gold(dec!(0.01));

        assert_eq!(
            silver.quantity_in_gold(dec!(1), "kg"),
            Err(ValuationError::UnitMismatch {
                name: "Silver".to_string(),
                from: "kg".to_string(),
                to: "oz".to_string(),
            })
        );
        assert!(matches!(
            unitless.quantity_in_gold(dec!(1), "oz"),
            Err(ValuationError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_quantity_without_gold_ratio() {
        let copper = PriceEntry::new("Copper")
            .with_unit("oz")
            .with_price_per_unit_usd(dec!(4));

        assert_eq!(
            copper.quantity_in_gold(dec!(1), "oz"),
            Err(ValuationError::MissingGoldRatio("Copper".to_string()))
        );
    }

    #[test]
    fn test_gemstone_value() {
        let ruby = Gemstone::new("Ruby", dec!(1.58));

        assert_eq!(ruby.value_in_gold(dec!(2.5)), Ok(dec!(3.95)));
    }

    #[test]
    fn test_gemstone_without_value() {
        let glass = Gemstone::new("Glass", Decimal::ZERO);
        let unset: Gemstone = serde_json::from_value(json!({ "name": "Opal" })).unwrap();

        assert_eq!(
            glass.value_in_gold(dec!(1)),
            Err(ValuationError::GemstoneWithoutValue("Glass".to_string()))
        );
        assert_eq!(
            unset.value_in_gold(dec!(1)),
            Err(ValuationError::GemstoneWithoutValue("Opal".to_string()))
        );
    }
}
