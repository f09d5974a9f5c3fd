use lj_tree::{NodeId, NodeRef};
use lj_types::TypeEnv;
use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::error::RefactorError;
use crate::patch::unified_diff;
use crate::scoped::ScopedVisitor;
use crate::visitor::{walk, Visitor};
use crate::warning::RefactorWarning;

/// The outcome of running a [`RefactorTransaction`] to completion
/// (§4.F "Transaction result", §6 "External interfaces"). Serializable
/// so a CLI front-end can emit it as JSON without a bespoke encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefactorResult {
    /// The rewritten source text.
    pub fixed: String,
    /// A unified diff between the original and rewritten source.
    pub patch: String,
    /// Whether any stage actually changed the tree.
    pub changed: bool,
    /// Non-fatal observations a built-in chose to surface (e.g. an
    /// unresolved call site, or "no matching method calls found")
    /// rather than fail the transaction over.
    pub warnings: Vec<RefactorWarning>,
}

/// Stages one or more visitors over a tree and produces a
/// [`RefactorResult`] (§4.F "Pipeline").
///
/// Every stage is a full post-order [`walk`]: a rewrite from stage *N*
/// is visible to stage *N+1*, so `FindMethods` piped into
/// `ChangeMethodName` sees the tree `FindMethods` read, not a stale
/// copy. Read-only stages simply never return `Some` from their hooks,
/// leaving the tree untouched.
pub struct RefactorTransaction<'a> {
    env: &'a TypeEnv,
    original: String,
    tree: NodeRef,
    warnings: Vec<RefactorWarning>,
}

impl<'a> RefactorTransaction<'a> {
    pub fn new(env: &'a TypeEnv, tree: NodeRef, original_source: impl Into<String>) -> Self {
        Self {
            env,
            original: original_source.into(),
            tree,
            warnings: Vec::new(),
        }
    }

    pub fn env(&self) -> &'a TypeEnv {
        self.env
    }

    pub fn tree(&self) -> &NodeRef {
        &self.tree
    }

    /// Runs one visitor stage over the current tree, replacing it with
    /// whatever the stage returns (identical to the input `Rc` if
    /// nothing changed), then drains any warnings the stage accumulated.
    pub fn stage(&mut self, visitor: &mut impl Visitor) -> &mut Self {
        let mut cursor = Cursor::new();
        self.tree = walk(visitor, &mut cursor, &self.tree);
        self.warnings.extend(visitor.take_warnings());
        self
    }

    pub fn warn(&mut self, message: impl Into<String>) -> &mut Self {
        self.warnings.push(RefactorWarning::Message(message.into()));
        self
    }

    /// Wraps `inner` in a [`ScopedVisitor`] bounded to `scope`, failing
    /// up front if `scope` names no node in the current tree rather
    /// than letting a stale id (e.g. captured against a tree snapshot
    /// from before an earlier stage rewrote it) silently scope the
    /// visitor to nothing.
    pub fn scoped<V: Visitor>(&self, scope: NodeId, inner: V) -> Result<ScopedVisitor<V>, RefactorError> {
        lj_tree::search::find_by_id(&self.tree, scope)?;
        Ok(ScopedVisitor::new(scope, inner))
    }

    /// Runs a fresh visitor, scoped to each anchor in turn, over the
    /// tree (§4.E "fold(anchors, visitorFactory)"). Each anchor gets its
    /// own instance from `visitor_factory` — the same way `FindMethods`
    /// over N call sites would want N independent per-site rewrites
    /// rather than one visitor accumulating state across all of them —
    /// and stages run left to right, so a later anchor sees whatever an
    /// earlier one already rewrote. Returns each stage's own visitor
    /// (already drained of its hooks but not its own accumulated state,
    /// e.g. a `hits()` counter) in anchor order.
    pub fn fold<V: Visitor>(
        &mut self,
        anchors: &[NodeId],
        mut visitor_factory: impl FnMut() -> V,
    ) -> Result<Vec<V>, RefactorError> {
        let mut outputs = Vec::with_capacity(anchors.len());
        for &anchor in anchors {
            let mut scoped = self.scoped(anchor, visitor_factory())?;
            self.stage(&mut scoped);
            outputs.push(scoped.into_inner());
        }
        Ok(outputs)
    }

    /// Finalizes the transaction: prints the (possibly rewritten) tree
    /// and diffs it against the original source.
    pub fn finish(self) -> Result<RefactorResult, RefactorError> {
        let fixed = lj_tree::print::print(&lj_tree::print::reify(&self.tree));
        let changed = fixed != self.original;
        let patch = unified_diff(&self.original, &fixed, "<source>");
        Ok(RefactorResult {
            fixed,
            patch,
            changed,
            warnings: self.warnings,
        })
    }
}
