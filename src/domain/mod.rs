//! Core domain types shared by the engine, config loader, and CLI

mod config;
mod error;
mod reference;

pub use config::{Config, DEFAULT_INDENT, DEFAULT_REFERENCE_KEY};
pub use error::{MergeError, MergeResult};
pub use reference::ReferenceString;
