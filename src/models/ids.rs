//! Identifier types and lenient id parsing
//!
//! Post and user ids are plain integers in the source tables, but references
//! to them arrive in several shapes: integer columns, float-formatted columns
//! ("12345.0", a side effect of nullable numeric columns in the upstream
//! export), strings inside nested JSON, or simply missing. A reference that
//! cannot be read as an integer means "no reference", never an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Identifier of a post (primary entities and related posts share one space)
pub type PostId = i64;

/// Identifier of an author
pub type UserId = i64;

/// Parse an id from a string, leniently
///
/// Accepts plain integers and integral floats; empty, "nan" and anything
/// else non-numeric yield `None`.
pub fn loose_id(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f as i64),
        _ => None,
    }
}

/// Parse an id from a loosely-typed JSON value
///
/// Nested analytics records carry ids as numbers, float-formatted numbers, or
/// strings depending on how they were produced upstream.
pub fn loose_id_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => loose_id(s),
        _ => None,
    }
}

/// Deserialize an optional id column leniently (serde helper for CSV rows)
pub fn de_loose_opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(loose_id))
}
