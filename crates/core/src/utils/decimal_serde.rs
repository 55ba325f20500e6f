//! Lenient decimal deserializers for wire payloads.
//!
//! The backend sends money fields as JSON numbers in some rows and as strings
//! in others; both must decode exactly into a `Decimal`.

use rust_decimal::Decimal;
use serde::{self, Deserialize, Deserializer};
use serde_json::Number;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    String(String),
    Number(Number),
    Null,
}

fn parse_decimal_value(value: &str) -> Result<Decimal, String> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| format!("Invalid decimal value '{}': {}", value, e))
}

/// Decodes an optional decimal; null and blank strings become `None`.
pub fn deserialize_option_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<DecimalInput>::deserialize(deserializer)?;
    match raw {
        None | Some(DecimalInput::Null) => Ok(None),
        Some(DecimalInput::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_decimal_value(trimmed)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        Some(DecimalInput::Number(n)) => parse_decimal_value(&n.to_string())
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Decodes a decimal where null or a missing value means zero.
pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_option_decimal(deserializer).map(|value| value.unwrap_or(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_option_decimal")]
        price: Option<Decimal>,
        #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
        total: Decimal,
    }

    #[test]
    fn test_numbers_and_strings_decode_exactly() {
        let row: Row = serde_json::from_str(r#"{"price": 10.1, "total": "225.00"}"#).unwrap();
        assert_eq!(row.price, Some(dec!(10.1)));
        assert_eq!(row.total, dec!(225.00));
    }

    #[test]
    fn test_null_blank_and_missing() {
        let row: Row = serde_json::from_str(r#"{"price": "  ", "total": null}"#).unwrap();
        assert_eq!(row.price, None);
        assert_eq!(row.total, Decimal::ZERO);

        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.price, None);
        assert_eq!(row.total, Decimal::ZERO);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"total": "abc"}"#);
        assert!(result.is_err());
    }
}
