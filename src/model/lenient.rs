//! Field-level decoders that never reject a document.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Scalar text; numbers keep their textual form, anything else is empty.
pub fn string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(text(Value::deserialize(de)?).unwrap_or_default())
}

/// Text that is meaningful only when present (e.g. dates).
pub fn opt_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// List of text items; non-text items are dropped.
pub fn strings<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items.into_iter().filter_map(text).collect(),
        _ => Vec::new(),
    })
}

/// List of records; entries that do not decode are dropped.
pub fn list<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub fn number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(de)?.as_f64())
}

pub fn boolean<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(de)?.as_bool().unwrap_or(false))
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
