//! Error kinds raised while resolving references

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure is fatal to the enclosing merge call.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Reference '{reference}' not found: no match for segment '{segment}'")]
    ReferenceNotFound { reference: String, segment: String },

    #[error("Pattern reference '{pattern}' only permitted in arrays")]
    PatternNotAllowed { pattern: String },

    #[error(
        "Reference '{reference}' resolves to '{}', outside of the working directory",
        path.display()
    )]
    OutsideWorkingDirectory { reference: String, path: PathBuf },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to expand pattern '{pattern}': {source}")]
    PatternWalk {
        pattern: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Reference marker '{key}' in '{}' must be a string", file.display())]
    InvalidReference { key: String, file: PathBuf },

    #[error("Reference '{reference}' resolved to a non-object value but has sibling keys to merge")]
    MergeTypeMismatch { reference: String },

    #[error("Cyclic reference '{reference}' in '{}'", file.display())]
    CyclicReference { reference: String, file: PathBuf },
}

pub type MergeResult<T> = Result<T, MergeError>;
