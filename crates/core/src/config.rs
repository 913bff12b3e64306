//! Valuation configuration.

use crate::constants::{DEFAULT_GOLD_PRICE_USD, GOLD_METAL_NAME};
use crate::utils::parse_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_DEFAULT_GOLD_PRICE_USD: &str = "HORD_DEFAULT_GOLD_PRICE_USD";
pub const ENV_GOLD_METAL_NAME: &str = "HORD_GOLD_METAL_NAME";
pub const ENV_VALUATION_DECIMALS: &str = "HORD_VALUATION_DECIMALS";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuationConfig {
    /// Gold price used when the metal snapshot has no usable gold quote.
    pub default_gold_price_usd: Decimal,
    /// Metal snapshot entry that carries the ambient gold price.
    pub gold_metal_name: String,
    /// Decimal places kept in reported valuations. `None` keeps full precision.
    pub valuation_decimals: Option<u32>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            default_gold_price_usd: DEFAULT_GOLD_PRICE_USD,
            gold_metal_name: GOLD_METAL_NAME.to_string(),
            valuation_decimals: None,
        }
    }
}

impl ValuationConfig {
    /// Loads configuration from the process environment (and `.env`),
    /// falling back to defaults for unparsable values.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            log::warn!("Ignoring valuation configuration from environment: {}", e);
            Self::default()
        })
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from a key lookup. Absent keys keep their
    /// default; blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let invalid = |key: &str, value: String| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        };

        let mut config = Self::default();

        if let Some(raw) = read(ENV_DEFAULT_GOLD_PRICE_USD) {
            config.default_gold_price_usd = parse_decimal(&raw)
                .filter(|price| *price > Decimal::ZERO)
                .ok_or_else(|| invalid(ENV_DEFAULT_GOLD_PRICE_USD, raw))?;
        }

        if let Some(name) = read(ENV_GOLD_METAL_NAME) {
            config.gold_metal_name = name;
        }

        if let Some(raw) = read(ENV_VALUATION_DECIMALS) {
            let decimals = raw
                .parse::<u32>()
                .ok()
                .filter(|dp| *dp <= 28)
                .ok_or_else(|| invalid(ENV_VALUATION_DECIMALS, raw))?;
            config.valuation_decimals = Some(decimals);
        }

        Ok(config)
    }
}
