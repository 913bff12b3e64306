use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Peg target token meaning "ounces of gold"
pub const GOLD_PEG_TARGET: &str = "GOLD";

/// Peg target token meaning "US dollars"
pub const USD_PEG_TARGET: &str = "USD";

/// Metal snapshot entry that carries the ambient gold price
pub const GOLD_METAL_NAME: &str = "Gold";

/// Gold price (USD per troy ounce) used when no snapshot price is available
pub const DEFAULT_GOLD_PRICE_USD: Decimal = dec!(2000);

/// Unit label for troy ounces in metal quotes
pub const OUNCE_UNIT: &str = "oz";

/// Unit label for pounds in metal quotes
pub const POUND_UNIT: &str = "lb";

pub const OUNCES_PER_POUND: Decimal = dec!(16);
