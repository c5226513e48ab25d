//! Output path derivation and writing

use super::inputs::Inputs;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Pick where each input's merged document goes.
///
/// A single input goes to `out` (inside it when `out` is a directory) or to
/// stdout; pattern inputs need `out` as a directory and keep their paths
/// relative to the pattern base.
pub fn plan_destinations(inputs: &Inputs, out: Option<&Path>) -> Result<Vec<Destination>> {
    let destinations: Vec<Destination> = if inputs.is_pattern {
        let Some(dir) = out else {
            anyhow::bail!("--out <DIR> is required when --in is a pattern");
        };
        if dir.is_file() {
            anyhow::bail!("--out must be a directory when --in is a pattern: {}", dir.display());
        }
        inputs.files.iter().map(|f| Destination::File(dir.join(&f.relative))).collect()
    } else {
        inputs
            .files
            .iter()
            .map(|f| match out {
                None => Destination::Stdout,
                Some(dir) if dir.is_dir() => Destination::File(dir.join(&f.relative)),
                Some(path) => Destination::File(path.to_path_buf()),
            })
            .collect()
    };

    for (input, destination) in inputs.files.iter().zip(&destinations) {
        if let Destination::File(path) = destination {
            if same_file(path, &input.path) {
                anyhow::bail!("Refusing to overwrite input file {}", input.path.display());
            }
        }
    }

    Ok(destinations)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Serialize `value` with `indent` spaces per level and a trailing newline.
pub fn to_pretty_json(value: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer).context("Failed to serialize merged document")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("Merged document is not valid UTF-8")
}

pub fn write_output(destination: &Destination, content: &str) -> Result<()> {
    match destination {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("Failed to write to stdout")?;
        }
        Destination::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
