//! Recursive resolution of a currency's gold value through its peg chain.

use super::peg::Peg;
use crate::currencies::{Currency, CurrencyNameIndex};
use crate::prices::PriceIndex;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Gold values settled during one aggregation pass, keyed by currency name.
///
/// Unresolvable currencies are cached as `None` and never retried within the
/// same pass.
#[derive(Debug, Default)]
pub struct ResolutionCache<'a> {
    settled: HashMap<&'a str, Option<Decimal>>,
}

impl<'a> ResolutionCache<'a> {
    /// `Some(value)` on a hit, where `value` may itself be `None`.
    pub fn get(&self, name: &str) -> Option<Option<Decimal>> {
        self.settled.get(name).copied()
    }

    pub fn insert(&mut self, name: &'a str, gold: Option<Decimal>) {
        self.settled.insert(name, gold);
    }

    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}

/// Names on the recursion path of one top-level resolution. Used only for
/// cycle detection.
#[derive(Debug, Default)]
pub struct RecursionStack<'a> {
    names: HashSet<&'a str>,
}

impl<'a> RecursionStack<'a> {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn push(&mut self, name: &'a str) {
        self.names.insert(name);
    }

    pub fn pop(&mut self, name: &str) {
        self.names.remove(name);
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolves currencies to ounces of gold against one price snapshot.
pub struct GoldResolver<'a> {
    currencies: CurrencyNameIndex<'a>,
    gold_price_usd: Decimal,
    metals: &'a PriceIndex,
    materials: &'a PriceIndex,
}

impl<'a> GoldResolver<'a> {
    pub fn new(
        currencies: &'a [Currency],
        gold_price_usd: Decimal,
        metals: &'a PriceIndex,
        materials: &'a PriceIndex,
    ) -> Self {
        Self {
            currencies: CurrencyNameIndex::build(currencies),
            gold_price_usd,
            metals,
            materials,
        }
    }

    /// Gold value of one unit of `currency`, or `None` when unresolvable.
    ///
    /// The cache is checked before the stack, so a currency settled earlier in
    /// the pass is returned as-is even if it sits on a cycle. A currency met
    /// again on its own recursion path resolves to `None` for that path and
    /// the result (after fallback) is cached for the rest of the pass.
    pub fn resolve(
        &self,
        currency: &'a Currency,
        cache: &mut ResolutionCache<'a>,
        stack: &mut RecursionStack<'a>,
    ) -> Option<Decimal> {
        let name = currency.name.as_deref()?;

        if let Some(settled) = cache.get(name) {
            return settled;
        }

        if stack.contains(name) {
            log::debug!("Peg cycle reached currency '{}'", name);
            return None;
        }

        stack.push(name);

        let pegged = currency
            .base_unit_value
            .non_negative()
            .and_then(|base| self.resolve_peg(currency, base, cache, stack));

        let gold = pegged.or_else(|| {
            let fallback = currency.base_unit_value_oz_gold.value();
            if fallback.is_some() {
                log::debug!("Using static gold value for currency '{}'", name);
            }
            fallback
        });

        stack.pop(name);
        cache.insert(name, gold);
        gold
    }

    fn resolve_peg(
        &self,
        currency: &'a Currency,
        base: Decimal,
        cache: &mut ResolutionCache<'a>,
        stack: &mut RecursionStack<'a>,
    ) -> Option<Decimal> {
        match Peg::of(currency) {
            Peg::Gold => Some(base),
            Peg::Usd => self.resolve_usd_peg(base),
            Peg::Metal(target) => self.resolve_price_peg(self.metals, target, base),
            Peg::Material(target) => self.resolve_price_peg(self.materials, target, base),
            Peg::Currency(target) => self.resolve_currency_peg(target, base, cache, stack),
            Peg::Unpegged => None,
        }
    }

    fn resolve_usd_peg(&self, base: Decimal) -> Option<Decimal> {
        if self.gold_price_usd <= Decimal::ZERO {
            return None;
        }
        base.checked_div(self.gold_price_usd)
    }

    fn resolve_price_peg(&self, prices: &PriceIndex, target: &str, base: Decimal) -> Option<Decimal> {
        match prices.get(target) {
            Some(entry) => entry.value_in_gold(base, self.gold_price_usd),
            None => {
                log::debug!("No {} price for peg target '{}'", prices.kind(), target);
                None
            }
        }
    }

    fn resolve_currency_peg(
        &self,
        target: &str,
        base: Decimal,
        cache: &mut ResolutionCache<'a>,
        stack: &mut RecursionStack<'a>,
    ) -> Option<Decimal> {
        let Some(target_currency) = self.currencies.lookup(target) else {
            log::debug!("Peg target currency '{}' not found", target);
            return None;
        };

        let nested = self.resolve(target_currency, cache, stack)?;
        base.checked_mul(nested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currencies::PegType;
    use crate::prices::{PriceEntry, PriceKind};
    use rust_decimal_macros::dec;

    fn empty_prices() -> (PriceIndex, PriceIndex) {
        (
            PriceIndex::new(PriceKind::Metal),
            PriceIndex::new(PriceKind::Material),
        )
    }

    #[test]
    fn test_resolve_in_isolation() {
        let (metals, materials) = empty_prices();
        let currencies = vec![
            Currency::new("1", "Crown", PegType::Currency, "Shilling", dec!(5)),
            Currency::new("2", "Shilling", PegType::Currency, "GOLD", dec!(0.01)),
        ];
        let resolver = GoldResolver::new(&currencies, dec!(2000), &metals, &materials);
        let mut cache = ResolutionCache::default();
        let mut stack = RecursionStack::default();

        let gold = resolver.resolve(&currencies[0], &mut cache, &mut stack);

        assert_eq!(gold, Some(dec!(0.05)));
        assert!(stack.is_empty());
        assert_eq!(cache.get("Shilling"), Some(Some(dec!(0.01))));
        assert_eq!(cache.get("Crown"), Some(Some(dec!(0.05))));
    }

    #[test]
    fn test_cache_hit_short_circuits() {
        let (metals, materials) = empty_prices();
        let currencies = vec![Currency::new(
            "1",
            "Crown",
            PegType::Currency,
            "GOLD",
            dec!(2),
        )];
        let resolver = GoldResolver::new(&currencies, dec!(2000), &metals, &materials);
        let mut cache = ResolutionCache::default();
        cache.insert("Crown", Some(dec!(42)));

        let gold = resolver.resolve(&currencies[0], &mut cache, &mut RecursionStack::default());

        assert_eq!(gold, Some(dec!(42)));
    }

    #[test]
    fn test_name_on_stack_is_a_cycle() {
        let (metals, materials) = empty_prices();
        let currencies = vec![Currency::new(
            "1",
            "Crown",
            PegType::Currency,
            "GOLD",
            dec!(2),
        )];
        let resolver = GoldResolver::new(&currencies, dec!(2000), &metals, &materials);
        let mut cache = ResolutionCache::default();
        let mut stack = RecursionStack::default();
        stack.push("Crown");

        assert_eq!(resolver.resolve(&currencies[0], &mut cache, &mut stack), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_nameless_currency_is_unresolved() {
        let (metals, materials) = empty_prices();
        let currencies = vec![
            Currency::new("1", "", PegType::Currency, "GOLD", dec!(2)).with_fallback_oz_gold(dec!(1)),
        ];
        let resolver = GoldResolver::new(&currencies, dec!(2000), &metals, &materials);

        let gold = resolver.resolve(
            &currencies[0],
            &mut ResolutionCache::default(),
            &mut RecursionStack::default(),
        );

        assert_eq!(gold, None);
    }

    #[test]
    fn test_material_price_peg() {
        let metals = PriceIndex::new(PriceKind::Metal);
        let materials = PriceIndex::from_entries(
            PriceKind::Material,
            vec![PriceEntry::new("Silk").with_price_per_unit_usd(dec!(50))],
        );
        let currencies = vec![Currency::new(
            "1",
            "Bolt",
            PegType::Material,
            "silk",
            dec!(2),
        )];
        let resolver = GoldResolver::new(&currencies, dec!(2000), &metals, &materials);

        let gold = resolver.resolve(
            &currencies[0],
            &mut ResolutionCache::default(),
            &mut RecursionStack::default(),
        );

        assert_eq!(gold, Some(dec!(0.05)));
    }

    #[test]
    fn test_metal_peg_does_not_read_material_prices() {
        let metals = PriceIndex::new(PriceKind::Metal);
        let materials = PriceIndex::from_entries(
            PriceKind::Material,
            vec![PriceEntry::new("Iron").with_price_per_oz_gold(dec!(0.001))],
        );
        let currencies = vec![Currency::new(
            "1",
            "Bar",
            PegType::Metal,
            "Iron",
            dec!(2),
        )];
        let resolver = GoldResolver::new(&currencies, dec!(2000), &metals, &materials);

        let gold = resolver.resolve(
            &currencies[0],
            &mut ResolutionCache::default(),
            &mut RecursionStack::default(),
        );

        assert_eq!(gold, None);
    }
}
