//! Currency definitions and name lookup.

mod currencies_index;
mod currencies_model;

pub use currencies_index::CurrencyNameIndex;
pub use currencies_model::{Currency, PegType};
