//! Path normalization

use std::path::{Component, Path, PathBuf};

/// Convert backslashes to forward slashes so globs and sort order behave the
/// same on every platform.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolve `.` and `..` components lexically, without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
        }
    }
    out
}

/// Join `path` onto `base` unless it is already absolute, then clean it.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean_path(path)
    } else {
        clean_path(&base.join(path))
    }
}
