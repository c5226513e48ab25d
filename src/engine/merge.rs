//! Shallow-recursive object merge

use crate::domain::{MergeError, MergeResult};
use serde_json::{Map, Value};

/// Merge `right` (local overrides) into `left` (imported base).
///
/// Objects on the right merge recursively into whatever sits at the same key
/// on the left; any other right-hand value replaces the left outright, so
/// arrays are never merged element-wise. Keys only in `left` keep their
/// position, new keys are appended in `right`'s order.
pub fn merge_values(left: Map<String, Value>, right: Map<String, Value>) -> Map<String, Value> {
    let mut result = left;
    for (key, value) in right {
        match value {
            Value::Object(nested) => {
                let slot = result.entry(key).or_insert_with(|| Value::Object(Map::new()));
                let base = match std::mem::take(slot) {
                    Value::Object(existing) => existing,
                    _ => Map::new(),
                };
                *slot = Value::Object(merge_values(base, nested));
            }
            other => {
                result.insert(key, other);
            }
        }
    }
    result
}

/// Combine a resolved reference value with the sibling keys of its marker.
///
/// Without siblings the resolved value passes through whatever its shape.
pub fn merge_resolved(
    resolved: Value,
    overrides: Map<String, Value>,
    reference: &str,
) -> MergeResult<Value> {
    if overrides.is_empty() {
        return Ok(resolved);
    }
    match resolved {
        Value::Object(base) => Ok(Value::Object(merge_values(base, overrides))),
        _ => Err(MergeError::MergeTypeMismatch { reference: reference.to_string() }),
    }
}
