use super::prices_model::{PriceEntry, PriceKind};
use crate::valuation::ValuationError;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

/// Price quotes of one kind, keyed by uppercased name.
///
/// Built once per session snapshot and treated as read-only afterwards.
/// Case-insensitive lookups see the last entry for a name; exact-name lookups
/// see the first entry carrying exactly that name.
#[derive(Debug, Clone)]
pub struct PriceIndex {
    kind: PriceKind,
    entries: HashMap<String, PriceEntry>,
    first_by_exact_name: HashMap<String, PriceEntry>,
}

impl PriceIndex {
    pub fn new(kind: PriceKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
            first_by_exact_name: HashMap::new(),
        }
    }

    /// Indexes a snapshot list. Later entries replace earlier ones with the
    /// same (case-insensitive) name; nameless entries are dropped.
    pub fn from_entries(kind: PriceKind, entries: impl IntoIterator<Item = PriceEntry>) -> Self {
        let mut index = Self::new(kind);
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    /// Indexes a raw snapshot as returned by a price service.
    ///
    /// Accepts either a bare list or an envelope of the form
    /// `{ "prices": [...] }`. Anything else produces an empty index.
    pub fn from_value(kind: PriceKind, value: &Value) -> Self {
        let items: &[Value] = match value {
            Value::Array(items) => items.as_slice(),
            Value::Object(envelope) => match envelope.get("prices") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => {
                    log::debug!("{} price snapshot has no price list", kind);
                    &[]
                }
            },
            _ => {
                log::debug!("{} price snapshot is not a list, treating as empty", kind);
                &[]
            }
        };

        let entries = items.iter().filter_map(|item| {
            if !item.is_object() {
                log::debug!("Skipping non-record {} price entry", kind);
                return None;
            }
            match serde_json::from_value::<PriceEntry>(item.clone()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("Skipping malformed {} price entry: {}", kind, e);
                    None
                }
            }
        });

        Self::from_entries(kind, entries)
    }

    /// Inserts an entry under its uppercased name. Returns `false` when the
    /// entry has no name.
    pub fn insert(&mut self, entry: PriceEntry) -> bool {
        let Some(name) = entry.name.clone() else {
            return false;
        };
        self.first_by_exact_name
            .entry(name.clone())
            .or_insert_with(|| entry.clone());
        self.entries.insert(name.to_uppercase(), entry);
        true
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&PriceEntry> {
        self.entries.get(&name.to_uppercase())
    }

    pub fn kind(&self) -> PriceKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PriceEntry> {
        self.entries.values()
    }

    /// First entry named exactly `name`.
    pub fn get_exact(&self, name: &str) -> Option<&PriceEntry> {
        self.first_by_exact_name.get(name)
    }

    /// USD price of the first entry named exactly `name`, when positive.
    pub fn usd_price_of(&self, name: &str) -> Option<Decimal> {
        self.get_exact(name)
            .and_then(|entry| entry.price_per_unit_usd.positive())
    }

    /// Gold value of `amount` of the good `name`, weighed in `unit`.
    pub fn quantity_in_gold(
        &self,
        name: &str,
        amount: Decimal,
        unit: &str,
    ) -> Result<Decimal, ValuationError> {
        self.get(name)
            .ok_or_else(|| ValuationError::NoPriceData(name.to_string()))?
            .quantity_in_gold(amount, unit)
    }

    /// Session number shared by the entries, taken from the lowest session
    /// present. `None` when no entry carries one.
    pub fn session_number(&self) -> Option<i64> {
        self.entries
            .values()
            .filter_map(|entry| entry.session_number)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let index = PriceIndex::from_entries(
            PriceKind::Metal,
            vec![PriceEntry::new("Silver").with_price_per_oz_gold(dec!(0.013))],
        );

        assert!(index.get("SILVER").is_some());
        assert!(index.get("silver").is_some());
        assert!(index.get("Copper").is_none());
    }

    #[test]
    fn test_last_entry_wins() {
        let index = PriceIndex::from_entries(
            PriceKind::Metal,
            vec![
                PriceEntry::new("Copper").with_price_per_unit_usd(dec!(3)),
                PriceEntry::new("COPPER").with_price_per_unit_usd(dec!(4)),
            ],
        );

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("copper").and_then(|e| e.price_per_unit_usd.value()),
            Some(dec!(4))
        );
    }

    #[test]
    fn test_from_envelope_and_bare_list() {
        let envelope = json!({
            "session_number": 3,
            "prices": [
                { "metal_name": "Gold", "price_per_unit_usd": 2000, "session_number": 3 },
                { "metal_name": "Silver", "price_per_oz_gold": 0.013, "session_number": 3 },
                { "price_per_unit_usd": 1 },
                "junk"
            ]
        });
        let bare = json!([{ "material_name": "Silk", "price_per_unit_usd": 12 }]);

        let metals = PriceIndex::from_value(PriceKind::Metal, &envelope);
        let materials = PriceIndex::from_value(PriceKind::Material, &bare);

        assert_eq!(metals.len(), 2);
        assert_eq!(metals.session_number(), Some(3));
        assert_eq!(materials.len(), 1);
        assert!(materials.get("SILK").is_some());
    }

    #[test]
    fn test_from_unusable_value_is_empty() {
        assert!(PriceIndex::from_value(PriceKind::Metal, &Value::Null).is_empty());
        assert!(PriceIndex::from_value(PriceKind::Metal, &json!({ "prices": 4 })).is_empty());
        assert!(PriceIndex::from_value(PriceKind::Material, &json!("prices")).is_empty());
    }

    #[test]
    fn test_usd_price_requires_exact_name() {
        let index = PriceIndex::from_entries(
            PriceKind::Metal,
            vec![PriceEntry::new("GOLD").with_price_per_unit_usd(dec!(2100))],
        );

        assert_eq!(index.usd_price_of("GOLD"), Some(dec!(2100)));
        assert_eq!(index.usd_price_of("Gold"), None);
    }

    #[test]
    fn test_quantity_in_gold_by_name() {
        let index = PriceIndex::from_entries(
            PriceKind::Metal,
            vec![PriceEntry::new("Silver")
                .with_unit("oz")
                .with_price_per_oz_gold(dec!(0.013))],
        );

        assert_eq!(index.quantity_in_gold("silver", dec!(1), "lb"), Ok(dec!(0.208)));
        assert_eq!(
            index.quantity_in_gold("Mithril", dec!(1), "oz"),
            Err(ValuationError::NoPriceData("Mithril".to_string()))
        );
    }

    #[test]
    fn test_exact_name_survives_case_variant() {
        let index = PriceIndex::from_entries(
            PriceKind::Metal,
            vec![
                PriceEntry::new("Gold").with_price_per_unit_usd(dec!(2400)),
                PriceEntry::new("GOLD").with_price_per_unit_usd(dec!(1)),
                PriceEntry::new("Gold").with_price_per_unit_usd(dec!(7)),
            ],
        );

        assert_eq!(index.usd_price_of("Gold"), Some(dec!(2400)));
        assert_eq!(index.usd_price_of("GOLD"), Some(dec!(1)));
        assert_eq!(
            index.get("gold").and_then(|e| e.price_per_unit_usd.value()),
            Some(dec!(7))
        );
    }
}
