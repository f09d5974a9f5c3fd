use lj_tree::{NodeId, NodeRef};

use crate::cursor::Cursor;
use crate::visitor::Visitor;

/// Wraps a [`Visitor`] so its hooks only fire for nodes inside a single
/// subtree, identified by a [`NodeId`] captured once (e.g. a method
/// body found by an earlier pass). Outside that subtree the wrapped
/// visitor is never called and no node is ever replaced, which is what
/// lets a refactor say "rewrite calls to `foo()`, but only inside
/// `Bar.baz()`" without re-deriving the scope on every hook (§4.C
/// "Scoped visitors").
#[derive(Debug)]
pub struct ScopedVisitor<V> {
    inner: V,
    scope: NodeId,
}

impl<V> ScopedVisitor<V> {
    pub fn new(scope: NodeId, inner: V) -> Self {
        Self { inner, scope }
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    fn in_scope(&self, node: &NodeRef, cursor: &Cursor) -> bool {
        node.id() == self.scope || cursor.is_scope_in_cursor_path(self.scope)
    }
}

macro_rules! delegate_hooks {
    ($($method:ident),+ $(,)?) => {
        impl<V: Visitor> Visitor for ScopedVisitor<V> {
            $(
                fn $method(&mut self, node: &NodeRef, cursor: &Cursor) -> Option<NodeRef> {
                    if self.in_scope(node, cursor) {
                        self.inner.$method(node, cursor)
                    } else {
                        None
                    }
                }
            )+

            fn take_warnings(&mut self) -> Vec<crate::warning::RefactorWarning> {
                self.inner.take_warnings()
            }
        }
    };
}

delegate_hooks!(
    compilation_unit,
    package,
    import,
    class_decl,
    method_decl,
    variable_decls,
    variable_declarator,
    block,
    annotation,
    array_access,
    array_type,
    assign,
    compound_assign,
    binary,
    break_stmt,
    case,
    catch,
    continue_stmt,
    do_while,
    empty,
    enum_value,
    field_access,
    for_each,
    for_stmt,
    identifier,
    if_stmt,
    instance_of,
    label,
    lambda,
    literal,
    method_invocation,
    multi_catch,
    new_array,
    new_class,
    parameterized_type,
    parentheses,
    primitive_type,
    return_stmt,
    switch_stmt,
    synchronized,
    ternary,
    throw_stmt,
    try_stmt,
    type_cast,
    type_parameter,
    type_parameters,
    unary,
    while_stmt,
    wildcard,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::walk;
    use lj_tree::{BlockData, Formatting, IdentifierData, Node, NodeIdGen, NodeMeta};
    use std::rc::Rc;

    struct CountIdentifiers(usize);

    impl Visitor for CountIdentifiers {
        fn identifier(&mut self, _node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
            self.0 += 1;
            None
        }
    }

    fn ident(gen: &NodeIdGen, name: &str) -> NodeRef {
        Rc::new(Node::Identifier(Box::new(IdentifierData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            name: name.into(),
        })))
    }

    #[test]
    fn hooks_outside_the_scope_never_fire() {
        let gen = NodeIdGen::new();
        let outside = ident(&gen, "outside");
        let inner_scope_id = gen.next();
        let inside = ident(&gen, "inside");
        let inner_block = Rc::new(Node::Block(Box::new(BlockData {
            meta: NodeMeta::new(inner_scope_id).with_formatting(Formatting::None),
            statements: vec![inside],
        })));
        let root = Rc::new(Node::Block(Box::new(BlockData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            statements: vec![outside, inner_block],
        })));

        let mut scoped = ScopedVisitor::new(inner_scope_id, CountIdentifiers(0));
        let mut cursor = Cursor::new();
        walk(&mut scoped, &mut cursor, &root);
        assert_eq!(scoped.into_inner().0, 1);
    }
}
