//! Reference string resolution

use super::containment::ensure_within;
use super::loader::read_json_file;
use super::pattern::{expand_pattern, is_dynamic_pattern};
use super::pointer::find_ref;
use super::walk::{Frame, WalkContext};
use super::Merger;
use crate::domain::{MergeError, MergeResult, ReferenceString};
use crate::utils::absolutize;
use serde_json::Value;
use std::path::{Path, PathBuf};

impl Merger {
    /// Resolve a reference string to its fully walked values, in order.
    ///
    /// Same-document and literal file references yield one value; a pattern
    /// reference yields one value per matched file and is only accepted when
    /// `allow_pattern` is set.
    pub(crate) fn resolve_value(
        &self,
        raw: &str,
        allow_pattern: bool,
        ctx: WalkContext<'_>,
    ) -> MergeResult<Vec<Value>> {
        let reference = ReferenceString::parse(raw);
        tracing::debug!("Resolving '{}' from {}", raw, ctx.current_file.display());

        let Some(file_part) = reference.file else {
            let frame = self.enter(ctx.current_file, &reference, ctx)?;
            let target = find_ref(reference.path, ctx.self_root)?;
            let value = self.walk(target, WalkContext { chain: Some(&frame), ..ctx })?;
            return Ok(vec![value]);
        };

        let dir = ctx.current_file.parent().unwrap_or(self.root_dir.as_path());
        let candidates: Vec<PathBuf> = if is_dynamic_pattern(file_part) {
            if !allow_pattern {
                return Err(MergeError::PatternNotAllowed { pattern: file_part.to_string() });
            }
            expand_pattern(dir, file_part)?
        } else {
            vec![absolutize(dir, Path::new(file_part))]
        };

        self.map_ordered(&candidates, |candidate| self.resolve_file(candidate, &reference, ctx))
    }

    fn resolve_file(
        &self,
        candidate: &Path,
        reference: &ReferenceString<'_>,
        ctx: WalkContext<'_>,
    ) -> MergeResult<Value> {
        ensure_within(&self.root_dir, candidate, reference.raw)?;
        let frame = self.enter(candidate, reference, ctx)?;
        let document = read_json_file(candidate)?;
        let target = find_ref(reference.path, &document)?;
        self.walk(
            target,
            WalkContext { current_file: candidate, self_root: &document, chain: Some(&frame) },
        )
    }

    /// Push a frame for `file#path` onto the chain, failing on a revisit when
    /// cycle detection is enabled.
    fn enter<'a>(
        &self,
        file: &'a Path,
        reference: &ReferenceString<'a>,
        ctx: WalkContext<'a>,
    ) -> MergeResult<Frame<'a>> {
        let frame = Frame { file, path: reference.path, parent: ctx.chain };
        if self.detect_cycles && frame.revisits_ancestor() {
            return Err(MergeError::CyclicReference {
                reference: reference.raw.to_string(),
                file: file.to_path_buf(),
            });
        }
        Ok(frame)
    }
}
