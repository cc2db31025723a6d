//! Canonical JSON form
//!
//! Normalizes a JSON structure into the fixed shape the viewer parses:
//! integral numbers as integers, floating numbers as finite floats, missing
//! values as explicit null, all other scalars unchanged. Applied bottom-up
//! over objects and arrays immediately before serialization.
//!
//! The transform is idempotent. A number with no defined mapping (a
//! non-finite float smuggled in through a raw `serde_json::Number`) is a
//! programming error upstream and fails loudly instead of being coerced.

use serde_json::{Map, Number, Value};

use crate::error::{CasepackError, CasepackResult};

/// Canonicalize a JSON value
pub fn canonicalize(value: &Value) -> CasepackResult<Value> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value.clone()),
        Value::Number(n) => canonicalize_number(n),
        Value::Array(items) => items
            .iter()
            .map(canonicalize)
            .collect::<CasepackResult<Vec<_>>>()
            .map(Value::Array),
        Value::Object(entries) => {
            let mut out = Map::with_capacity(entries.len());
            for (key, item) in entries {
                out.insert(key.clone(), canonicalize(item)?);
            }
            Ok(Value::Object(out))
        }
    }
}

fn canonicalize_number(n: &Number) -> CasepackResult<Value> {
    // Integral representations collapse to a single integer form
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    // Everything else must be a finite float
    n.as_f64()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| {
            CasepackError::Json(format!("number '{}' has no canonical representation", n))
        })
}
