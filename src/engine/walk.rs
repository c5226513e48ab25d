//! Recursive reference expansion

use super::merge::merge_resolved;
use super::Merger;
use crate::domain::{MergeError, MergeResult};
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;

/// A reference being resolved, linked to the resolution that led to it.
pub(crate) struct Frame<'a> {
    pub file: &'a Path,
    pub path: &'a str,
    pub parent: Option<&'a Frame<'a>>,
}

impl Frame<'_> {
    fn targets(&self, file: &Path, path: &str) -> bool {
        self.file == file && self.path.trim_matches('/') == path.trim_matches('/')
    }

    /// Whether an ancestor frame already resolves the same file and path.
    pub fn revisits_ancestor(&self) -> bool {
        let mut cursor = self.parent;
        while let Some(frame) = cursor {
            if frame.targets(self.file, self.path) {
                return true;
            }
            cursor = frame.parent;
        }
        false
    }
}

/// Where a value being walked came from.
#[derive(Clone, Copy)]
pub(crate) struct WalkContext<'a> {
    /// File the value was loaded from; relative references resolve against
    /// its directory.
    pub current_file: &'a Path,
    /// Whole document containing the value, target of `#/...` references.
    pub self_root: &'a Value,
    pub chain: Option<&'a Frame<'a>>,
}

impl<'a> WalkContext<'a> {
    pub fn root(current_file: &'a Path, self_root: &'a Value) -> Self {
        Self { current_file, self_root, chain: None }
    }
}

impl Merger {
    /// Return `value` with every reference marker at any depth expanded.
    pub(crate) fn walk(&self, value: &Value, ctx: WalkContext<'_>) -> MergeResult<Value> {
        match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value.clone()),
            Value::Array(items) => {
                let parts = self.map_ordered(items, |item| self.walk_element(item, ctx))?;
                Ok(Value::Array(parts.into_iter().flatten().collect()))
            }
            Value::Object(map) => match self.reference_of(map, ctx)? {
                Some(reference) => {
                    let overrides = self.walk_fields(map, ctx)?;
                    let mut resolved = self.resolve_value(reference, false, ctx)?;
                    // A non-pattern reference always resolves to exactly one value.
                    let base = resolved.pop().unwrap_or(Value::Null);
                    merge_resolved(base, overrides, reference)
                }
                None => Ok(Value::Object(self.walk_fields(map, ctx)?)),
            },
        }
    }

    /// Expand one array element into the values it contributes to its array.
    fn walk_element(&self, item: &Value, ctx: WalkContext<'_>) -> MergeResult<Vec<Value>> {
        match item {
            Value::Object(map) => match self.reference_of(map, ctx)? {
                Some(reference) => {
                    let overrides = self.walk_fields(map, ctx)?;
                    let resolved = self.resolve_value(reference, true, ctx)?;
                    resolved
                        .into_iter()
                        .flat_map(|value| match value {
                            Value::Array(items) => items,
                            other => vec![other],
                        })
                        .map(|value| merge_resolved(value, overrides.clone(), reference))
                        .collect()
                }
                None => Ok(vec![Value::Object(self.walk_fields(map, ctx)?)]),
            },
            Value::Array(_) => Ok(vec![self.walk(item, ctx)?]),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Ok(vec![item.clone()])
            }
        }
    }

    /// Walk every field except the reference marker, keeping key order.
    fn walk_fields(
        &self,
        map: &Map<String, Value>,
        ctx: WalkContext<'_>,
    ) -> MergeResult<Map<String, Value>> {
        let mut out = Map::new();
        for (key, value) in map {
            if *key == self.reference_key {
                continue;
            }
            out.insert(key.clone(), self.walk(value, ctx)?);
        }
        Ok(out)
    }

    fn reference_of<'v>(
        &self,
        map: &'v Map<String, Value>,
        ctx: WalkContext<'_>,
    ) -> MergeResult<Option<&'v str>> {
        match map.get(&self.reference_key) {
            None => Ok(None),
            Some(Value::String(reference)) => Ok(Some(reference.as_str())),
            Some(_) => Err(MergeError::InvalidReference {
                key: self.reference_key.clone(),
                file: ctx.current_file.to_path_buf(),
            }),
        }
    }

    /// Map `items` in order, on the rayon pool when parallel. The first error
    /// aborts the whole batch.
    pub(crate) fn map_ordered<T, R, F>(&self, items: &[T], f: F) -> MergeResult<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> MergeResult<R> + Sync + Send,
    {
        if self.parallel && items.len() > 1 {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }
}
