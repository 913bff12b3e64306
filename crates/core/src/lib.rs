//! Hord Core - currency valuation for the Hord tabletop economy manager.
//!
//! Currencies are pegged to other currencies, to metals, to materials, to USD
//! or to gold. This crate resolves every currency to a gold and USD value for
//! one price snapshot. Fetching currencies and prices is left to the
//! collaborators behind the traits in [`valuation`].

pub mod config;
pub mod constants;
pub mod currencies;
pub mod errors;
pub mod prices;
pub mod utils;
pub mod valuation;

pub use currencies::*;
pub use prices::*;
pub use valuation::*;

pub use config::ValuationConfig;
pub use errors::Error;
pub use errors::Result;
