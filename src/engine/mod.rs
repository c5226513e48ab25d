//! Reference resolution and merge engine
//!
//! Walks a JSON document depth-first, replacing every `...` reference marker
//! with the value it points at (same document, another file, or every file
//! matching a glob) merged with the marker's sibling keys.

use crate::domain::{Config, MergeError, MergeResult, DEFAULT_REFERENCE_KEY};
use crate::utils::{absolutize, clean_path};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub mod containment;
pub mod loader;
pub mod merge;
pub mod pattern;
pub mod pointer;
mod resolve;
mod walk;

pub use loader::read_json_file;
pub use merge::merge_values;
pub use pattern::{expand_pattern, is_dynamic_pattern, split_pattern};
pub use pointer::find_ref;

use walk::WalkContext;

/// Resolves reference markers in JSON documents.
///
/// Cross-file references must stay inside `root_dir`, which is also the base
/// for relative input paths. A relative `root_dir` is anchored at the process
/// working directory when the Merger is built.
#[derive(Debug, Clone)]
pub struct Merger {
    root_dir: PathBuf,
    reference_key: String,
    parallel: bool,
    detect_cycles: bool,
}

impl Merger {
    /// Create a Merger with default settings rooted at `root_dir`.
    pub fn new(root_dir: PathBuf) -> MergeResult<Self> {
        let root_dir = if root_dir.is_absolute() {
            clean_path(&root_dir)
        } else {
            let cwd = std::env::current_dir()
                .map_err(|source| MergeError::Io { path: root_dir.clone(), source })?;
            absolutize(&cwd, &root_dir)
        };
        Ok(Self {
            root_dir,
            reference_key: DEFAULT_REFERENCE_KEY.to_string(),
            parallel: true,
            detect_cycles: true,
        })
    }

    /// Create a Merger rooted at the process working directory.
    pub fn in_current_dir() -> MergeResult<Self> {
        Self::new(PathBuf::from("."))
    }

    /// Apply the engine settings of a loaded [`Config`].
    pub fn with_config(self, config: &Config) -> Self {
        self.reference_key(config.reference_key.clone())
            .parallel(config.parallel)
            .detect_cycles(config.detect_cycles)
    }

    /// Set the key that marks a reference (default `...`)
    pub fn reference_key(mut self, key: impl Into<String>) -> Self {
        self.reference_key = key.into();
        self
    }

    /// Set whether sibling elements and glob matches resolve concurrently
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether revisiting a reference on the current chain is an error
    pub fn detect_cycles(mut self, detect: bool) -> Self {
        self.detect_cycles = detect;
        self
    }

    /// Absolute directory that cross-file references must stay inside
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Load `input` and return it with every reference resolved.
    pub fn merge(&self, input: &Path) -> MergeResult<Value> {
        let file = absolutize(&self.root_dir, input);
        let document = read_json_file(&file)?;
        self.walk(&document, WalkContext::root(&file, &document))
    }
}

/// Merge `input` with default settings, rooted at the working directory.
pub fn merge(input: &Path) -> MergeResult<Value> {
    Merger::in_current_dir()?.merge(input)
}
