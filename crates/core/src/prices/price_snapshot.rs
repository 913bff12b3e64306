use super::price_index::PriceIndex;
use super::prices_model::PriceKind;
use crate::config::ValuationConfig;
use rust_decimal::Decimal;
use serde_json::Value;

/// Where the ambient gold price of a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldPriceSource {
    /// The gold quote in the metal snapshot.
    Snapshot,
    /// The configured default.
    Default,
    /// Supplied directly by the caller.
    Explicit,
}

/// Metal prices, material prices and the ambient gold price for one session.
#[derive(Debug, Clone)]
pub struct PriceSnapshot {
    pub metals: PriceIndex,
    pub materials: PriceIndex,
    pub gold_price_usd: Decimal,
    pub gold_price_source: GoldPriceSource,
}

impl PriceSnapshot {
    /// Snapshot with a caller-supplied gold price. A zero or negative price is
    /// kept as is; paths that divide by it resolve to nothing.
    pub fn new(metals: PriceIndex, materials: PriceIndex, gold_price_usd: Decimal) -> Self {
        Self {
            metals,
            materials,
            gold_price_usd,
            gold_price_source: GoldPriceSource::Explicit,
        }
    }

    /// Snapshot whose gold price is read from the metal quotes, falling back
    /// to the configured default.
    pub fn from_indices(metals: PriceIndex, materials: PriceIndex, config: &ValuationConfig) -> Self {
        let (gold_price_usd, gold_price_source) =
            match metals.usd_price_of(&config.gold_metal_name) {
                Some(price) => (price, GoldPriceSource::Snapshot),
                None => {
                    log::warn!(
                        "No {} quote in metal snapshot, using default gold price {}",
                        config.gold_metal_name,
                        config.default_gold_price_usd
                    );
                    (config.default_gold_price_usd, GoldPriceSource::Default)
                }
            };

        Self {
            metals,
            materials,
            gold_price_usd,
            gold_price_source,
        }
    }

    /// Snapshot built from the raw payloads of the metal and material price
    /// services.
    pub fn from_values(metals: &Value, materials: &Value, config: &ValuationConfig) -> Self {
        Self::from_indices(
            PriceIndex::from_value(PriceKind::Metal, metals),
            PriceIndex::from_value(PriceKind::Material, materials),
            config,
        )
    }

    /// Empty price indices with the given gold price.
    pub fn gold_only(gold_price_usd: Decimal) -> Self {
        Self::new(
            PriceIndex::new(PriceKind::Metal),
            PriceIndex::new(PriceKind::Material),
            gold_price_usd,
        )
    }

    /// Gold price when it can be divided by.
    pub fn usable_gold_price(&self) -> Option<Decimal> {
        (self.gold_price_usd > Decimal::ZERO).then_some(self.gold_price_usd)
    }

    /// `(metal_session, material_session)` when both snapshots name a session
    /// and the sessions differ.
    pub fn session_mismatch(&self) -> Option<(i64, i64)> {
        match (self.metals.session_number(), self.materials.session_number()) {
            (Some(metal), Some(material)) if metal != material => Some((metal, material)),
            _ => None,
        }
    }
}
