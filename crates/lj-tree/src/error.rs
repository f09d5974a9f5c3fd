use thiserror::Error;

use crate::id::NodeId;

/// Errors raised while printing or rebuilding a tree (§7).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The printer's output failed the print-contract invariant: a
    /// fresh parse of the printed text did not reproduce the source
    /// tree's structure. Carries the offending node for diagnosis.
    #[error("print invariant violated at node {node_id:?}: {detail}")]
    PrintInvariantViolation { node_id: NodeId, detail: String },

    /// A [`NodeId`] referenced by a scoped operation does not exist in
    /// the tree it was looked up against.
    #[error("no node with id {0:?} in this tree")]
    UnknownNodeId(NodeId),
}
