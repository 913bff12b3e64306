//! Explicit parsing of loosely-typed record fields.
//!
//! Currency and price records reach the core as JSON produced by other
//! services. Numeric fields may be absent, `null`, numeric strings or outright
//! garbage, so every numeric field is parsed into a [`NumericField`] instead of
//! being coerced to zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Parsed state of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericField {
    /// A well-formed number.
    Value(Decimal),
    /// Field absent or `null`.
    #[default]
    Missing,
    /// Field present but not a finite number.
    Invalid,
}

impl NumericField {
    /// Classifies a raw JSON value.
    ///
    /// Numbers are parsed through their textual form so that `0.013` stays
    /// exactly `0.013` instead of picking up binary floating-point noise.
    /// Numeric strings are accepted; every other JSON type is `Invalid`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => NumericField::Missing,
            Value::Number(number) => Self::from_text(&number.to_string()),
            Value::String(text) => Self::from_text(text.trim()),
            _ => NumericField::Invalid,
        }
    }

    fn from_text(text: &str) -> Self {
        parse_decimal(text).map_or(NumericField::Invalid, NumericField::Value)
    }

    /// The parsed number, if any.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            NumericField::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// The parsed number when it is zero or greater.
    pub fn non_negative(&self) -> Option<Decimal> {
        self.value().filter(|value| !value.is_sign_negative() || value.is_zero())
    }

    /// The parsed number when it is strictly greater than zero.
    pub fn positive(&self) -> Option<Decimal> {
        self.value().filter(|value| *value > Decimal::ZERO)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, NumericField::Missing)
    }
}

impl From<Decimal> for NumericField {
    fn from(value: Decimal) -> Self {
        NumericField::Value(value)
    }
}

impl From<Option<Decimal>> for NumericField {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(NumericField::Missing, NumericField::Value)
    }
}

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.map_or(NumericField::Missing, |value| {
            NumericField::from_value(&value)
        }))
    }
}

impl Serialize for NumericField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NumericField::Value(value) => Serialize::serialize(value, serializer),
            _ => serializer.serialize_none(),
        }
    }
}

/// Parses a decimal in plain (`"0.013"`) or scientific (`"1e-7"`) notation.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Deserializes an identifier that may arrive as a string or a number.
/// Anything else (including `null`) is treated as absent.
pub fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Deserializes a display name. Only non-empty strings count as names.
pub fn deserialize_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

/// Deserializes free text, rendering numbers as text and everything else as
/// the empty string.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}
