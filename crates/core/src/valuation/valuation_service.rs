use super::valuation_calculator::calculate_currency_valuations;
use super::valuation_model::CurrencyValuations;
use super::valuation_table::ValuationTable;
use super::valuation_traits::{
    CurrencyDirectoryTrait, PriceSourceTrait, SessionSourceTrait, ValuationServiceTrait,
};
use crate::config::ValuationConfig;
use crate::currencies::Currency;
use crate::errors::{Error, Result};
use crate::prices::{PriceIndex, PriceSnapshot};
use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

/// External collaborators a service loads its inputs from.
#[derive(Clone)]
pub struct ValuationSources {
    pub currencies: Arc<dyn CurrencyDirectoryTrait>,
    pub metal_prices: Arc<dyn PriceSourceTrait>,
    pub material_prices: Arc<dyn PriceSourceTrait>,
    pub sessions: Arc<dyn SessionSourceTrait>,
}

#[derive(Clone)]
pub struct ValuationService {
    config: ValuationConfig,
    sources: Option<ValuationSources>,
}

impl ValuationService {
    pub fn new(config: ValuationConfig) -> Self {
        Self {
            config,
            sources: None,
        }
    }

    /// Service configured from the environment. Fails on unparsable values.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ValuationConfig::try_from_env()?))
    }

    /// Sets the collaborators used by `load_valuations` and `load_table`.
    pub fn with_sources(mut self, sources: ValuationSources) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Builds a snapshot from raw price service payloads.
    pub fn snapshot_from_values(&self, metal_prices: &Value, material_prices: &Value) -> PriceSnapshot {
        PriceSnapshot::from_values(metal_prices, material_prices, &self.config)
    }

    fn check_snapshot(snapshot: &PriceSnapshot) {
        if let Some((metal_session, material_session)) = snapshot.session_mismatch() {
            warn!(
                "Metal prices from session {} but material prices from session {}",
                metal_session, material_session
            );
        }
        if snapshot.usable_gold_price().is_none() {
            warn!(
                "Gold price {} is not positive, USD-based valuations will be unresolved",
                snapshot.gold_price_usd
            );
        }
    }

    fn round(&self, valuations: CurrencyValuations) -> CurrencyValuations {
        match self.config.valuation_decimals {
            Some(decimals) => valuations
                .into_iter()
                .map(|(id, valuation)| (id, valuation.round_dp(decimals)))
                .collect(),
            None => valuations,
        }
    }

    async fn load_inputs(&self) -> Result<(Vec<Currency>, PriceSnapshot)> {
        let sources = self
            .sources
            .as_ref()
            .ok_or_else(|| Error::DataSource("No valuation data sources configured".to_string()))?;

        let session_number = sources.sessions.get_current_session().await?;
        debug!("Loading valuation inputs for session {}", session_number);

        let (currencies, metal_entries, material_entries) = futures::try_join!(
            sources.currencies.get_currencies(),
            sources.metal_prices.get_current_prices(session_number),
            sources.material_prices.get_current_prices(session_number),
        )?;

        let metals = PriceIndex::from_entries(sources.metal_prices.kind(), metal_entries);
        let materials = PriceIndex::from_entries(sources.material_prices.kind(), material_entries);
        let snapshot = PriceSnapshot::from_indices(metals, materials, &self.config);

        Ok((currencies, snapshot))
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    fn calculate_valuations(
        &self,
        currencies: &[Currency],
        snapshot: &PriceSnapshot,
    ) -> CurrencyValuations {
        Self::check_snapshot(snapshot);
        let valuations = calculate_currency_valuations(
            currencies,
            snapshot.gold_price_usd,
            &snapshot.metals,
            &snapshot.materials,
        );
        debug!(
            "Valued {} currencies, {} unresolved",
            valuations.len(),
            valuations.values().filter(|v| !v.is_resolved()).count()
        );
        self.round(valuations)
    }

    fn calculate_valuations_from_values(
        &self,
        currencies: &Value,
        metal_prices: &Value,
        material_prices: &Value,
    ) -> CurrencyValuations {
        let currencies = Currency::list_from_value(currencies);
        let snapshot = self.snapshot_from_values(metal_prices, material_prices);
        self.calculate_valuations(&currencies, &snapshot)
    }

    fn build_table(&self, currencies: &[Currency], snapshot: &PriceSnapshot) -> ValuationTable {
        Self::check_snapshot(snapshot);
        ValuationTable::build(
            currencies,
            snapshot.gold_price_usd,
            &snapshot.metals,
            &snapshot.materials,
        )
    }

    fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        currencies: &[Currency],
        snapshot: &PriceSnapshot,
    ) -> Result<Decimal> {
        let converted = self.build_table(currencies, snapshot).convert(amount, from, to)?;
        Ok(match self.config.valuation_decimals {
            Some(decimals) => converted.round_dp(decimals),
            None => converted,
        })
    }

    async fn load_valuations(&self) -> Result<CurrencyValuations> {
        let (currencies, snapshot) = self.load_inputs().await?;
        Ok(self.calculate_valuations(&currencies, &snapshot))
    }

    async fn load_table(&self) -> Result<ValuationTable> {
        let (currencies, snapshot) = self.load_inputs().await?;
        Ok(self.build_table(&currencies, &snapshot))
    }
}
