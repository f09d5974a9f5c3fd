use lj_tree::{NodeId, TreeError};
use thiserror::Error;

/// Errors a refactor pipeline can surface (§7).
#[derive(Debug, Error)]
pub enum RefactorError {
    /// A method-signature pattern failed to compile, per §4.D's
    /// grammar (e.g. an argument list with a `..` not in trailing
    /// position, or an empty target-type pattern).
    #[error("invalid method signature pattern {pattern:?}: {reason}")]
    InvalidSignature { pattern: String, reason: String },

    /// Two fixes produced by the same transaction overlap in source
    /// range and cannot both be applied (§4.F "Fixes must not overlap;
    /// a transaction that produces overlapping fixes is an error").
    #[error("conflicting fixes at {a:?} and {b:?}")]
    ConflictingFixes { a: NodeId, b: NodeId },

    /// Propagated from a `lj-tree` lookup the pipeline performed on the
    /// caller's behalf, e.g. `RefactorTransaction::scoped` resolving a
    /// captured `NodeId` against the current tree.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
