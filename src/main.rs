//! merge-json: expand `...` references in JSON documents into merged output
//!
//! Thin command-line shell around the `merge_json` engine: picks inputs,
//! derives output paths, and writes pretty-printed results.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
