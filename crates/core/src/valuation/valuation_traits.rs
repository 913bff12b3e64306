use super::valuation_model::CurrencyValuations;
use super::valuation_table::ValuationTable;
use crate::currencies::Currency;
use crate::errors::Result;
use crate::prices::{PriceEntry, PriceKind, PriceSnapshot};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

/// Supplies the currency collection.
#[async_trait]
pub trait CurrencyDirectoryTrait: Send + Sync {
    async fn get_currencies(&self) -> Result<Vec<Currency>>;
}

/// Supplies the price snapshot of one kind for a session.
#[async_trait]
pub trait PriceSourceTrait: Send + Sync {
    fn kind(&self) -> PriceKind;
    async fn get_current_prices(&self, session_number: i64) -> Result<Vec<PriceEntry>>;
}

/// Supplies the session whose prices should be used.
#[async_trait]
pub trait SessionSourceTrait: Send + Sync {
    async fn get_current_session(&self) -> Result<i64>;
}

/// Trait defining the contract for valuation operations.
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    fn calculate_valuations(
        &self,
        currencies: &[Currency],
        snapshot: &PriceSnapshot,
    ) -> CurrencyValuations;

    fn calculate_valuations_from_values(
        &self,
        currencies: &Value,
        metal_prices: &Value,
        material_prices: &Value,
    ) -> CurrencyValuations;

    fn build_table(&self, currencies: &[Currency], snapshot: &PriceSnapshot) -> ValuationTable;

    fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        currencies: &[Currency],
        snapshot: &PriceSnapshot,
    ) -> Result<Decimal>;

    /// Fetches currencies and same-session prices, then values them.
    async fn load_valuations(&self) -> Result<CurrencyValuations>;

    async fn load_table(&self) -> Result<ValuationTable>;
}
