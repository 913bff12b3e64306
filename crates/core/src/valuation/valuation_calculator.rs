//! Aggregates per-currency gold resolution into a valuation map.

use super::gold_resolver::{GoldResolver, RecursionStack, ResolutionCache};
use super::valuation_model::{CurrencyValuation, CurrencyValuations};
use crate::currencies::Currency;
use crate::prices::PriceIndex;
use crate::utils::NumericField;
use rust_decimal::Decimal;
use serde_json::Value;

/// Gold value settled for one input currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCurrency<'a> {
    pub currency: &'a Currency,
    pub gold: Option<Decimal>,
}

/// Resolves every currency in input order.
///
/// All currencies share one resolution cache; each top-level resolution gets
/// its own empty recursion stack.
pub fn resolve_currencies<'a>(
    currencies: &'a [Currency],
    gold_price_usd: Decimal,
    metals: &'a PriceIndex,
    materials: &'a PriceIndex,
) -> Vec<ResolvedCurrency<'a>> {
    let resolver = GoldResolver::new(currencies, gold_price_usd, metals, materials);
    let mut cache = ResolutionCache::default();

    currencies
        .iter()
        .map(|currency| {
            let mut stack = RecursionStack::default();
            let gold = resolver.resolve(currency, &mut cache, &mut stack);
            ResolvedCurrency { currency, gold }
        })
        .collect()
}

/// Computes the gold and USD value of every currency, keyed by currency id.
///
/// Currencies without an id are still resolved (they may be peg targets) but
/// are left out of the result.
pub fn calculate_currency_valuations(
    currencies: &[Currency],
    gold_price_usd: Decimal,
    metals: &PriceIndex,
    materials: &PriceIndex,
) -> CurrencyValuations {
    let mut valuations = CurrencyValuations::new();
    if currencies.is_empty() {
        return valuations;
    }

    for resolved in resolve_currencies(currencies, gold_price_usd, metals, materials) {
        let Some(id) = resolved.currency.id.as_deref() else {
            log::debug!(
                "Skipping valuation of currency {:?} without id",
                resolved.currency.name
            );
            continue;
        };
        valuations.insert(
            id.to_string(),
            CurrencyValuation::from_gold(resolved.gold, gold_price_usd),
        );
    }

    valuations
}

/// Same as [`calculate_currency_valuations`] over raw payloads.
///
/// A currency payload that is not a list produces an empty map. A gold price
/// that is missing or not a number is treated as zero, which leaves every
/// USD-dependent path unresolved.
pub fn calculate_currency_valuations_from_value(
    currencies: &Value,
    gold_price_usd: &Value,
    metals: &PriceIndex,
    materials: &PriceIndex,
) -> CurrencyValuations {
    let currencies = Currency::list_from_value(currencies);
    let gold_price_usd = NumericField::from_value(gold_price_usd)
        .value()
        .unwrap_or(Decimal::ZERO);
    calculate_currency_valuations(&currencies, gold_price_usd, metals, materials)
}
