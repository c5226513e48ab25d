//! Input selection: a single document or every document matching a glob

use anyhow::{Context, Result};
use merge_json::engine::{expand_pattern, is_dynamic_pattern, split_pattern};
use merge_json::utils::absolutize;
use std::path::{Path, PathBuf};

pub struct InputFile {
    pub path: PathBuf,
    /// Location below the pattern's literal base, used to place outputs.
    pub relative: PathBuf,
}

pub struct Inputs {
    pub files: Vec<InputFile>,
    pub is_pattern: bool,
}

pub fn resolve_inputs(cwd: &Path, input: &str) -> Result<Inputs> {
    if !is_dynamic_pattern(input) {
        let path = absolutize(cwd, Path::new(input));
        let relative = path.file_name().map(PathBuf::from).unwrap_or_else(|| path.clone());
        return Ok(Inputs { files: vec![InputFile { path, relative }], is_pattern: false });
    }

    let (prefix, _) = split_pattern(input);
    let base = absolutize(cwd, Path::new(&prefix));
    let matches = expand_pattern(cwd, input)
        .with_context(|| format!("Failed to expand input pattern '{}'", input))?;
    if matches.is_empty() {
        anyhow::bail!("No files match input pattern '{}'", input);
    }

    let files = matches
        .into_iter()
        .map(|path| {
            let relative = path.strip_prefix(&base).map(Path::to_path_buf).unwrap_or_else(|_| {
                path.file_name().map(PathBuf::from).unwrap_or_else(|| path.clone())
            });
            InputFile { path, relative }
        })
        .collect();

    Ok(Inputs { files, is_pattern: true })
}
