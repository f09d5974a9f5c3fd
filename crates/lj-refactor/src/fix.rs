use lj_tree::NodeId;
use text_size::TextRange;

use crate::error::RefactorError;

/// A single textual edit produced by a refactor, anchored to the node
/// it came from for diagnostics (§4.F "Fixes").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fix {
    Delete { range: TextRange, origin: NodeId },
    Replace { range: TextRange, text: String, origin: NodeId },
    Insert { at: text_size::TextSize, text: String, origin: NodeId },
}

impl Fix {
    pub fn origin(&self) -> NodeId {
        match self {
            Fix::Delete { origin, .. } => *origin,
            Fix::Replace { origin, .. } => *origin,
            Fix::Insert { origin, .. } => *origin,
        }
    }

    /// The range this fix touches. Inserts occupy a zero-width range at
    /// their offset: two inserts at the same point don't "overlap" by
    /// this definition, but an insert landing strictly inside a
    /// delete/replace range does.
    fn range(&self) -> TextRange {
        match self {
            Fix::Delete { range, .. } => *range,
            Fix::Replace { range, .. } => *range,
            Fix::Insert { at, .. } => TextRange::empty(*at),
        }
    }

    fn start(&self) -> text_size::TextSize {
        self.range().start()
    }
}

/// Sorts fixes by source position and checks that no two overlap,
/// mirroring `nova-core::edit::normalize_text_edits`'s validate-then-sort
/// shape. Equal-start inserts are stable-sorted in the order they were
/// produced, matching `TextRange::empty` ranges never counting as a
/// conflict with each other.
pub fn normalize_fixes(mut fixes: Vec<Fix>) -> Result<Vec<Fix>, RefactorError> {
    fixes.sort_by_key(|f| f.start());
    for pair in fixes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if ranges_conflict(&a.range(), &b.range()) {
            return Err(RefactorError::ConflictingFixes {
                a: a.origin(),
                b: b.origin(),
            });
        }
    }
    Ok(fixes)
}

fn offset(size: text_size::TextSize) -> usize {
    u32::from(size) as usize
}

fn ranges_conflict(a: &TextRange, b: &TextRange) -> bool {
    if a.is_empty() && b.is_empty() {
        return false;
    }
    a.start() < b.end() && b.start() < a.end()
}

/// Applies normalized, non-overlapping fixes to `source`, returning the
/// rewritten text. Fixes must already be sorted by `normalize_fixes`;
/// applying back-to-front avoids offset invalidation from earlier edits.
pub fn apply_fixes(source: &str, fixes: &[Fix]) -> String {
    let mut out = source.to_string();
    for fix in fixes.iter().rev() {
        match fix {
            Fix::Delete { range, .. } => {
                out.replace_range(offset(range.start())..offset(range.end()), "");
            }
            Fix::Replace { range, text, .. } => {
                out.replace_range(offset(range.start())..offset(range.end()), text);
            }
            Fix::Insert { at, text, .. } => {
                out.insert_str(offset(*at), text);
            }
        }
    }
    out
}
