use lj_tree::NodeId;
use serde::{Deserialize, Serialize};

/// A non-fatal observation surfaced on a [`crate::RefactorResult`]
/// rather than aborting the transaction (§7: "per-node errors during
/// traversal are collected and attached to the result rather than
/// aborting").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefactorWarning {
    /// A call site or declaration couldn't be resolved to a `Type`,
    /// so a builtin had no way to tell whether it matched the pattern
    /// it was asked to rewrite. The node is skipped and counted rather
    /// than treated as a non-match.
    UnresolvedSymbol(NodeId),
    /// A free-form observation a builtin chose to surface, e.g. "no
    /// matching method calls found".
    Message(String),
}
