// Canonical JSON: the byte form block hashes are computed over
use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize `data` to compact JSON with every object's keys in lexicographic order.
///
/// Two values with the same logical content always produce identical bytes, no
/// matter how their maps were built or which serde_json features are enabled.
pub fn canonical_json<T: Serialize>(data: &T) -> Result<Vec<u8>> {
    let value = sort_keys(serde_json::to_value(data)?);
    Ok(serde_json::to_vec(&value)?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
