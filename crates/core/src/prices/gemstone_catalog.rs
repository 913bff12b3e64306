use super::prices_model::Gemstone;
use crate::valuation::ValuationError;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

/// Gemstone types by exact name. The first gemstone listed under a name wins.
#[derive(Debug, Clone, Default)]
pub struct GemstoneCatalog {
    gemstones: HashMap<String, Gemstone>,
}

impl GemstoneCatalog {
    pub fn from_gemstones(gemstones: impl IntoIterator<Item = Gemstone>) -> Self {
        let mut catalog = Self::default();
        for gemstone in gemstones {
            let Some(name) = gemstone.name.clone() else {
                continue;
            };
            catalog.gemstones.entry(name).or_insert(gemstone);
        }
        catalog
    }

    /// Catalog from a raw list, or an envelope of the form
    /// `{ "gemstones": [...] }`. Malformed entries are skipped.
    pub fn from_value(value: &Value) -> Self {
        let items: &[Value] = match value {
            Value::Array(items) => items.as_slice(),
            Value::Object(envelope) => match envelope.get("gemstones") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        };

        Self::from_gemstones(items.iter().filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            serde_json::from_value::<Gemstone>(item.clone())
                .map_err(|e| log::debug!("Skipping malformed gemstone: {}", e))
                .ok()
        }))
    }

    pub fn get(&self, name: &str) -> Option<&Gemstone> {
        self.gemstones.get(name)
    }

    pub fn len(&self) -> usize {
        self.gemstones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gemstones.is_empty()
    }

    /// Gold value of a `name` stone weighing `carats`.
    pub fn value_in_gold(&self, name: &str, carats: Decimal) -> Result<Decimal, ValuationError> {
        self.get(name)
            .ok_or_else(|| ValuationError::UnknownGemstone(name.to_string()))?
            .value_in_gold(carats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_value_by_name() {
        let catalog = GemstoneCatalog::from_value(&json!([
            { "name": "Diamond", "value_per_carat_oz_gold": 2.62 },
            { "name": "Ruby", "value_per_carat_oz_gold": "1.58" },
            { "name": "Diamond", "value_per_carat_oz_gold": 9 },
            { "value_per_carat_oz_gold": 1 },
            "junk"
        ]));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.value_in_gold("Diamond", dec!(2)), Ok(dec!(5.24)));
        assert_eq!(catalog.value_in_gold("Ruby", dec!(1)), Ok(dec!(1.58)));
    }

    #[test]
    fn test_unknown_gemstone() {
        let catalog = GemstoneCatalog::from_gemstones(vec![Gemstone::new("Ruby", dec!(1.58))]);

        assert_eq!(
            catalog.value_in_gold("ruby", dec!(1)),
            Err(ValuationError::UnknownGemstone("ruby".to_string()))
        );
    }

    #[test]
    fn test_envelope_and_unusable_values() {
        let catalog = GemstoneCatalog::from_value(&json!({
            "gemstones": [{ "name": "Emerald", "value_per_carat_oz_gold": 1.42 }]
        }));

        assert!(catalog.get("Emerald").is_some());
        assert!(GemstoneCatalog::from_value(&Value::Null).is_empty());
        assert!(GemstoneCatalog::from_value(&json!({ "gemstones": 3 })).is_empty());
    }
}
