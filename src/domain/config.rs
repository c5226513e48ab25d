//! Engine and output configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_REFERENCE_KEY: &str = "...";
pub const DEFAULT_INDENT: usize = 2;

/// Settings read from `merge-json.toml` / `.merge-json.yml` and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Mapping key that marks a reference.
    pub reference_key: String,
    /// Spaces per indentation level in written output.
    pub indent: usize,
    /// Resolve sibling array elements and glob matches on the rayon pool.
    pub parallel: bool,
    /// Fail with a cyclic-reference error instead of recursing without bound.
    pub detect_cycles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_key: DEFAULT_REFERENCE_KEY.to_string(),
            indent: DEFAULT_INDENT,
            parallel: true,
            detect_cycles: true,
        }
    }
}
