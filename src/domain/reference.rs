//! `file#path` reference strings

/// A parsed reference string: `[<file-part>] ['#' <path>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceString<'a> {
    /// Raw reference as written in the document.
    pub raw: &'a str,
    /// Relative file path or glob, `None` for the same document.
    pub file: Option<&'a str>,
    /// `/`-delimited path inside the target document.
    pub path: &'a str,
}

impl<'a> ReferenceString<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (file, path) = match raw.split_once('#') {
            Some((file, path)) => (file, path),
            None => (raw, ""),
        };
        let path = if path.is_empty() { "/" } else { path };
        let file = if file.is_empty() { None } else { Some(file) };
        Self { raw, file, path }
    }
}
