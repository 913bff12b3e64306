use super::currencies_model::Currency;
use std::collections::HashMap;

/// O(1) lookup from currency name to record.
///
/// Peg targets are typed by users, so a target is matched against the exact
/// name first and the uppercased name second. Both maps are last-write-wins
/// when names collide. Currencies without a name cannot be pegged to and are
/// left out.
#[derive(Debug, Default)]
pub struct CurrencyNameIndex<'a> {
    by_name: HashMap<&'a str, &'a Currency>,
    by_upper_name: HashMap<String, &'a Currency>,
}

impl<'a> CurrencyNameIndex<'a> {
    pub fn build(currencies: &'a [Currency]) -> Self {
        let mut index = Self {
            by_name: HashMap::with_capacity(currencies.len()),
            by_upper_name: HashMap::with_capacity(currencies.len()),
        };

        for currency in currencies {
            if let Some(name) = currency.name.as_deref() {
                index.by_name.insert(name, currency);
                index.by_upper_name.insert(name.to_uppercase(), currency);
            }
        }

        index
    }

    /// Finds the currency a peg target refers to.
    pub fn lookup(&self, target: &str) -> Option<&'a Currency> {
        self.by_name
            .get(target)
            .or_else(|| self.by_upper_name.get(&target.to_uppercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
