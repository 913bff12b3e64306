//! Currency valuation - resolves every currency's gold and USD value through
//! its peg chain.

mod gold_resolver;
mod peg;
mod valuation_calculator;
mod valuation_errors;
mod valuation_model;
mod valuation_service;
mod valuation_table;
mod valuation_traits;

pub use gold_resolver::{GoldResolver, RecursionStack, ResolutionCache};
pub use peg::Peg;
pub use valuation_calculator::{
    calculate_currency_valuations, calculate_currency_valuations_from_value, resolve_currencies,
    ResolvedCurrency,
};
pub use valuation_errors::ValuationError;
pub use valuation_model::{CurrencyValuation, CurrencyValuations};
pub use valuation_service::{ValuationService, ValuationSources};
pub use valuation_table::ValuationTable;
pub use valuation_traits::{
    CurrencyDirectoryTrait, PriceSourceTrait, SessionSourceTrait, ValuationServiceTrait,
};
