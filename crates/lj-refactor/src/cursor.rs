use lj_tree::{NodeId, NodeRef};

/// The chain of ancestors from the tree root down to (but not
/// including) the node currently being visited. Pushed on enter,
/// popped on exit by the visitor driver (§4.C "Cursor"), so a visitor
/// hook can answer "am I inside a try block" or "what method am I in"
/// without threading that context through every hook signature itself.
#[derive(Debug, Default)]
pub struct Cursor {
    stack: Vec<NodeRef>,
}

impl Cursor {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub(crate) fn push(&mut self, node: NodeRef) {
        self.stack.push(node);
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
    }

    /// The immediate parent of the node currently being visited, or
    /// `None` at the root.
    pub fn parent(&self) -> Option<&NodeRef> {
        self.stack.last()
    }

    /// All ancestors, root first.
    pub fn ancestors(&self) -> &[NodeRef] {
        &self.stack
    }

    /// Whether `scope` (identified by its [`NodeId`]) is one of the
    /// current ancestors — i.e. whether the node being visited lies
    /// inside `scope`. Used by [`crate::scoped::ScopedVisitor`] to gate
    /// hook dispatch to a single method/class body.
    pub fn is_scope_in_cursor_path(&self, scope: NodeId) -> bool {
        self.stack.iter().any(|n| n.id() == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lj_tree::{Formatting, IdentifierData, Node, NodeIdGen, NodeMeta};

    fn leaf(gen: &NodeIdGen) -> NodeRef {
        std::rc::Rc::new(Node::Identifier(Box::new(IdentifierData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            name: "x".into(),
        })))
    }

    #[test]
    fn push_pop_tracks_ancestor_path() {
        let gen = NodeIdGen::new();
        let mut cursor = Cursor::new();
        let a = leaf(&gen);
        let b = leaf(&gen);
        assert!(cursor.parent().is_none());
        cursor.push(a.clone());
        cursor.push(b.clone());
        assert!(cursor.is_scope_in_cursor_path(a.id()));
        assert!(cursor.is_scope_in_cursor_path(b.id()));
        cursor.pop();
        assert!(!cursor.is_scope_in_cursor_path(b.id()));
        assert!(cursor.is_scope_in_cursor_path(a.id()));
    }
}
