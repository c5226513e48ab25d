//! Glob detection and expansion for pattern references

use crate::domain::{MergeError, MergeResult};
use crate::utils::{clean_path, normalize_path};
use globset::GlobBuilder;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

// Closing `]` and `}` are literal on their own.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Whether `file_part` contains glob syntax.
pub fn is_dynamic_pattern(file_part: &str) -> bool {
    file_part.contains(GLOB_META)
}

/// Split a pattern into its literal leading directories and the glob rest.
///
/// `../shared/*/item.json` becomes `("../shared", "*/item.json")`.
pub fn split_pattern(pattern: &str) -> (String, String) {
    let pattern = normalize_path(pattern);
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal = segments.iter().take_while(|s| !is_dynamic_pattern(s)).count();
    // The last segment always belongs to the glob side, even when literal.
    let literal = literal.min(segments.len().saturating_sub(1));
    (segments[..literal].join("/"), segments[literal..].join("/"))
}

/// Expand `pattern` relative to `dir`, returning matching regular files as
/// absolute paths in lexicographic order.
pub fn expand_pattern(dir: &Path, pattern: &str) -> MergeResult<Vec<PathBuf>> {
    let (prefix, rest) = split_pattern(pattern);
    let base = clean_path(&dir.join(&prefix));

    let matcher = GlobBuilder::new(&rest)
        .literal_separator(true)
        .build()
        .map_err(|source| MergeError::InvalidPattern { pattern: pattern.to_string(), source })?
        .compile_matcher();

    if !base.is_dir() {
        tracing::debug!("No matches for '{}': {} does not exist", pattern, base.display());
        return Ok(Vec::new());
    }

    let segments: Vec<&str> = rest.split('/').collect();
    let max_depth = if rest.contains("**") { usize::MAX } else { segments.len() };

    let mut matches = Vec::new();
    let walker = WalkDir::new(&base).min_depth(1).max_depth(max_depth);
    for entry in walker.into_iter().filter_entry(|e| !is_unrequested_hidden(e, &segments)) {
        let entry = entry
            .map_err(|source| MergeError::PatternWalk { pattern: pattern.to_string(), source })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(rel) = path.strip_prefix(&base) else {
            continue;
        };
        if matcher.is_match(normalize_path(rel.to_string_lossy().as_ref())) {
            matches.push(path.to_path_buf());
        }
    }

    matches.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    tracing::debug!(
        "Pattern '{}' matched {} file(s) under {}",
        pattern,
        matches.len(),
        base.display()
    );
    Ok(matches)
}

/// Dot entries are skipped unless the pattern segment they fall under starts
/// with `.` itself. Below a `**` only the final file segment can ask for them.
fn is_unrequested_hidden(entry: &DirEntry, segments: &[&str]) -> bool {
    let depth = entry.depth();
    if depth == 0 || !entry.file_name().to_str().is_some_and(|name| name.starts_with('.')) {
        return false;
    }
    let dotted = |segment: Option<&&str>| segment.is_some_and(|s| s.starts_with('.'));
    let requested = match segments.iter().position(|s| *s == "**") {
        Some(globstar) if depth > globstar => {
            !entry.file_type().is_dir() && dotted(segments.last())
        }
        _ => dotted(segments.get(depth - 1)),
    };
    !requested
}
