//! merge-json: resolve `...` references across JSON documents
//!
//! A reference marker is an object entry whose key is `...` and whose value is
//! a `file#path` reference string. The engine replaces each marker with the
//! value it points at, merged with the marker's sibling keys, until no marker
//! remains.

pub mod config;
pub mod domain;
pub mod engine;
pub mod utils;

pub use domain::{Config, MergeError, MergeResult};
pub use engine::{merge, Merger};
