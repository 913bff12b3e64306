pub mod field_parsing;

pub use field_parsing::{parse_decimal, NumericField};
