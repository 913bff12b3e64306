//! Currency domain models.

use crate::utils::field_parsing::{
    deserialize_identifier, deserialize_name, deserialize_text, NumericField,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What kind of thing a currency is valued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PegType {
    #[default]
    Currency,
    Metal,
    Material,
}

impl PegType {
    /// Case-insensitive parse. Unknown values fall back to `Currency`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "METAL" => PegType::Metal,
            "MATERIAL" => PegType::Material,
            _ => PegType::Currency,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PegType::Currency => "CURRENCY",
            PegType::Metal => "METAL",
            PegType::Material => "MATERIAL",
        }
    }
}

impl<'de> Deserialize<'de> for PegType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(text)) => PegType::parse_lenient(&text),
            _ => PegType::Currency,
        })
    }
}

/// A monetary unit as delivered by the currency directory.
///
/// `base_unit_value` is "how many units of `peg_target` equal one unit of this
/// currency". `base_unit_value_oz_gold` is a precomputed gold value used only
/// when the peg chain cannot be resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_name")]
    pub name: Option<String>,
    #[serde(default, alias = "pegType")]
    pub peg_type: PegType,
    #[serde(default, alias = "pegTarget", deserialize_with = "deserialize_text")]
    pub peg_target: String,
    #[serde(default, alias = "baseUnitValue")]
    pub base_unit_value: NumericField,
    #[serde(default, alias = "baseUnitValueOzGold")]
    pub base_unit_value_oz_gold: NumericField,
}

impl Currency {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        peg_type: PegType,
        peg_target: impl Into<String>,
        base_unit_value: Decimal,
    ) -> Self {
        let name = name.into();
        Self {
            id: Some(id.into()),
            name: (!name.is_empty()).then_some(name),
            peg_type,
            peg_target: peg_target.into(),
            base_unit_value: NumericField::Value(base_unit_value),
            base_unit_value_oz_gold: NumericField::Missing,
        }
    }

    /// Sets the static gold value used when the peg chain does not resolve.
    pub fn with_fallback_oz_gold(mut self, oz_gold: Decimal) -> Self {
        self.base_unit_value_oz_gold = NumericField::Value(oz_gold);
        self
    }

    /// Parses a single currency record. Returns `None` for non-object values.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Parses a currency collection.
    ///
    /// A top-level value that is not a list yields an empty collection.
    /// Elements that are not currency records are skipped.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        let Some(items) = value.as_array() else {
            log::debug!("Currency collection is not a list, treating as empty");
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let parsed = Self::from_value(item);
                if parsed.is_none() {
                    log::debug!("Skipping malformed currency record at position {}", position);
                }
                parsed
            })
            .collect()
    }
}
