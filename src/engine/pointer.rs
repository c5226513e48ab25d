//! Reference path lookup (`/a/b/0/id-or-key`)

use crate::domain::{MergeError, MergeResult};
use serde_json::Value;

/// Resolve a `/`-delimited reference path against `value`.
///
/// Segments are applied left to right:
/// - objects descend into the key named by the segment
/// - arrays accept an all-digit segment as an index; otherwise the first
///   element object holding the segment as a key yields that key's value, then
///   the first element whose `id` (then `name`) equals the segment is returned
///
/// `/` and the empty path return `value` itself.
pub fn find_ref<'a>(path: &str, value: &'a Value) -> MergeResult<&'a Value> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut current = value;

    for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
        current = step(current, segment).ok_or_else(|| MergeError::ReferenceNotFound {
            reference: path.to_string(),
            segment: segment.to_string(),
        })?;
    }

    Ok(current)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => {
            if segment.bytes().all(|b| b.is_ascii_digit()) {
                return segment.parse::<usize>().ok().and_then(|idx| items.get(idx));
            }
            items
                .iter()
                .find_map(|item| item.as_object().and_then(|obj| obj.get(segment)))
                .or_else(|| find_by_field(items, "id", segment))
                .or_else(|| find_by_field(items, "name", segment))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

fn find_by_field<'a>(items: &'a [Value], field: &str, segment: &str) -> Option<&'a Value> {
    items.iter().find(|item| item.get(field).and_then(Value::as_str) == Some(segment))
}
