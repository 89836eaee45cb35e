//! Lenient accessors over untrusted JSON objects.

use serde_json::Value;

/// Trimmed, non-empty text at `key`. Numbers and booleans are rendered as text.
pub(crate) fn text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Positive whole number at `key`, from a number or a numeric string.
pub(crate) fn positive_int(raw: &Value, key: &str) -> Option<u32> {
    let number = match raw.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.is_finite() && number >= 1.0 {
        Some(number.min(u32::MAX as f64) as u32)
    } else {
        None
    }
}

/// Elements of the array at `key`, or nothing if it is missing or not an array.
pub(crate) fn array<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Object elements of the array at `key`; other entries are dropped.
pub(crate) fn objects<'a>(raw: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> + 'a {
    array(raw, key).iter().filter(|v| v.is_object())
}

/// Non-empty text elements of the array at `key`.
pub(crate) fn string_list(raw: &Value, key: &str) -> Vec<String> {
    array(raw, key)
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}
