//! JSON document loading

use crate::domain::{MergeError, MergeResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and parse a JSON document. Nothing is cached; every reference to a
/// file reads it again.
pub fn read_json_file(path: &Path) -> MergeResult<Value> {
    tracing::debug!("Loading {}", path.display());
    let content = fs::read_to_string(path)
        .map_err(|source| MergeError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content)
        .map_err(|source| MergeError::Parse { path: path.to_path_buf(), source })
}
