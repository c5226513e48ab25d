//! Shared helpers

pub mod paths;

pub use paths::{absolutize, clean_path, normalize_path};
