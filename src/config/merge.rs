//! CLI override precedence over file configuration

use crate::domain::Config;

/// Settings passed on the command line; `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub reference_key: Option<String>,
    pub indent: Option<usize>,
    pub parallel: Option<bool>,
    pub detect_cycles: Option<bool>,
}

pub fn merge_cli_with_config(mut config: Config, cli: &CliOverrides) -> Config {
    if let Some(key) = &cli.reference_key {
        config.reference_key = key.clone();
    }
    if let Some(indent) = cli.indent {
        config.indent = indent;
    }
    if let Some(parallel) = cli.parallel {
        config.parallel = parallel;
    }
    if let Some(detect) = cli.detect_cycles {
        config.detect_cycles = detect;
    }
    config
}
