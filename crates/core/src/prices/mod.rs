//! Metal and material price snapshots, and the gemstone catalog.

mod gemstone_catalog;
mod price_index;
mod price_snapshot;
mod prices_model;

pub use gemstone_catalog::GemstoneCatalog;
pub use price_index::PriceIndex;
pub use price_snapshot::{GoldPriceSource, PriceSnapshot};
pub use prices_model::{Gemstone, PriceEntry, PriceKind};
