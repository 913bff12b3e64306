use thiserror::Error;

/// Errors raised when converting between resolved currencies or valuing a
/// quantity of a priced good.
///
/// Resolution itself never fails; an unresolvable currency is reported as a
/// valuation of `None`. These errors only surface when a caller asks for a
/// concrete number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Currency '{0}' not found")]
    UnknownCurrency(String),

    #[error("Currency '{0}' has no resolvable gold value")]
    Unresolved(String),

    #[error("Currency '{0}' has no value set")]
    ZeroValue(String),

    #[error("No positive gold price available")]
    MissingGoldPrice,

    #[error("Arithmetic overflow while converting {0}")]
    Overflow(String),

    #[error("No price data found for '{0}'")]
    NoPriceData(String),

    #[error("'{0}' has no gold price per unit")]
    MissingGoldRatio(String),

    #[error("Cannot convert {from} to {to} for {name}")]
    UnitMismatch {
        name: String,
        from: String,
        to: String,
    },

    #[error("Gemstone '{0}' not found")]
    UnknownGemstone(String),

    #[error("Gemstone '{0}' has no value set")]
    GemstoneWithoutValue(String),
}
