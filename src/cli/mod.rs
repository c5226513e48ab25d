//! Command-line interface for merge-json
//!
//! Resolves one input document (or every document matching a glob) and writes
//! the merged result to a file, a directory, or stdout.

use anyhow::{Context, Result};
use clap::Parser;
use merge_json::config::{load_config, merge_cli_with_config, CliOverrides};
use merge_json::Merger;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod inputs;
mod output;

use inputs::resolve_inputs;
use output::{plan_destinations, to_pretty_json, write_output};

/// Resolve `...` references across JSON documents into merged output
#[derive(Parser)]
#[command(name = "merge-json")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input JSON document, or a glob matching several documents
    #[arg(short = 'i', long = "in", value_name = "INPUT")]
    input: String,

    /// Output file, or directory when INPUT is a glob (stdout when omitted)
    #[arg(short = 'o', long = "out", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to config file (merge-json.toml or .merge-json.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Object key that marks a reference
    #[arg(long, value_name = "KEY")]
    reference_key: Option<String>,

    /// Spaces per indentation level in the output
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Resolve references on a single thread
    #[arg(long)]
    sequential: bool,

    /// Disable cyclic reference detection
    #[arg(long)]
    no_cycle_check: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            reference_key: self.reference_key.clone(),
            indent: self.indent,
            parallel: self.sequential.then_some(false),
            detect_cycles: self.no_cycle_check.then_some(false),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let file_config = load_config(&cwd, cli.config.as_deref())?;
    let config = merge_cli_with_config(file_config, &cli.overrides());
    let merger = Merger::new(cwd.clone())?.with_config(&config);
    tracing::debug!("Resolving references under {}", merger.root_dir().display());

    let inputs = resolve_inputs(&cwd, &cli.input)?;
    let destinations = plan_destinations(&inputs, cli.output.as_deref())?;
    tracing::debug!("Merging {} input file(s)", inputs.files.len());

    let merge_one = |path: &PathBuf| {
        merger.merge(path).with_context(|| format!("Failed to merge {}", path.display()))
    };
    let paths: Vec<PathBuf> = inputs.files.iter().map(|f| f.path.clone()).collect();
    let merged: Vec<_> = if config.parallel {
        paths.par_iter().map(merge_one).collect::<Result<_>>()?
    } else {
        paths.iter().map(merge_one).collect::<Result<_>>()?
    };

    for (value, destination) in merged.iter().zip(&destinations) {
        let content = to_pretty_json(value, config.indent)?;
        write_output(destination, &content)?;
    }

    Ok(())
}
