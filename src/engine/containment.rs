//! Working-directory containment for cross-file references

use crate::domain::{MergeError, MergeResult};
use crate::utils::clean_path;
use std::path::Path;

/// Fail unless `candidate` is `root` or lies below it. Both paths are
/// compared after lexical normalisation.
pub fn ensure_within(root: &Path, candidate: &Path, reference: &str) -> MergeResult<()> {
    let root = clean_path(root);
    let candidate = clean_path(candidate);
    if candidate.strip_prefix(&root).is_err() {
        return Err(MergeError::OutsideWorkingDirectory {
            reference: reference.to_string(),
            path: candidate,
        });
    }
    Ok(())
}
