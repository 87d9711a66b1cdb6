//! Rough prompt-size estimate shown under the main form. Display only, never
//! enforced.

use serde::Serialize;
use serde_json::{Number, Value};

/// Characters contributed by the fixed instruction messages that wrap every
/// request.
pub const PROMPT_OVERHEAD_CHARS: usize = 550;

const CHARS_PER_TOKEN: f64 = 4.0;

/// Counts characters in string and number leaves of a JSON value. Object keys,
/// booleans and nulls contribute nothing.
pub fn count_chars(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        Value::Number(n) => number_len(n),
        Value::Array(items) => items.iter().map(joined_len).sum(),
        Value::Object(map) => map.values().map(count_chars).sum(),
        Value::Null | Value::Bool(_) => 0,
    }
}

// Integers print as-is; floats use the shortest form, so `2.0` counts as "2".
fn number_len(n: &Number) -> usize {
    match (n.as_i64(), n.as_u64(), n.as_f64()) {
        (Some(i), _, _) => i.to_string().len(),
        (_, Some(u), _) => u.to_string().len(),
        (_, _, Some(f)) => f.to_string().len(),
        _ => n.to_string().len(),
    }
}

// Length of an element once an array is joined into one string.
fn joined_len(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::Bool(b) => b.to_string().len(),
        other => count_chars(other),
    }
}

pub fn estimate_value(value: &Value) -> u32 {
    let chars = count_chars(value) + PROMPT_OVERHEAD_CHARS;
    (chars as f64 / CHARS_PER_TOKEN).round() as u32
}

/// Estimates prompt tokens for any serializable payload, complete or partial.
pub fn estimate_tokens<T: Serialize + ?Sized>(payload: &T) -> u32 {
    match serde_json::to_value(payload) {
        Ok(value) => estimate_value(&value),
        Err(e) => {
            tracing::debug!("token estimate fell back to overhead only: {}", e);
            estimate_value(&Value::Null)
        }
    }
}
