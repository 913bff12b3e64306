//! Core error types for Hord.

use thiserror::Error;

use crate::config::ConfigError;
use crate::valuation::ValuationError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation core.
///
/// Resolution itself does not fail; these errors come from conversions that
/// need a concrete value, from configuration, and from the collaborators that
/// supply currencies and prices.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Valuation failed: {0}")]
    Valuation(#[from] ValuationError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Data source error: {0}")]
    DataSource(String),
}

