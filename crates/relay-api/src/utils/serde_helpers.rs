//! Serde helper functions for request body parsing.
//!
//! The browser front end sends amounts either as JSON numbers or as numeric
//! strings taken straight from form inputs, so both are accepted here.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Deserializes an `Option<Decimal>` from a JSON number or a numeric string.
///
/// Handles the following cases:
/// - `null` or missing field -> `None`
/// - Empty or non-numeric string -> `None`
/// - Number or numeric string -> `Some(Decimal)`
///
/// Non-numeric input is not an error here; the caller rejects the missing
/// value with its own validation message.
///
/// # Examples
///
/// ```ignore
/// use serde::Deserialize;
/// use rust_decimal::Decimal;
///
/// #[derive(Deserialize)]
/// struct SellRequest {
///     #[serde(default, deserialize_with = "deserialize_optional_decimal_flexible")]
///     units: Option<Decimal>,
/// }
/// ```
pub fn deserialize_optional_decimal_flexible<'de, D>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(NumberOrString::Integer(i)) => Some(Decimal::from(i)),
        // f64 Display는 가장 짧은 왕복 표현을 출력 (3.12345 -> "3.12345")
        Some(NumberOrString::Float(f)) if f.is_finite() => parse_decimal(&f.to_string()),
        Some(NumberOrString::Float(_)) => None,
        Some(NumberOrString::Text(s)) => parse_decimal(&s),
    })
}
