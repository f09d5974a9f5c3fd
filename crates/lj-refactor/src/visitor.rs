use std::rc::Rc;

use lj_tree::{rebuild_with_children, Node, NodeRef};

use crate::cursor::Cursor;
use crate::warning::RefactorWarning;

/// Double dispatch over the closed node-kind set (§4.C "Visitor
/// framework"). One hook per [`lj_tree::SyntaxKind`], each given the
/// (possibly already-rewritten) node and the ancestor [`Cursor`].
/// Returning `Some(replacement)` swaps the node for `replacement`
/// before the walk continues upward; returning `None` keeps whatever
/// [`walk`] already built for it (the original `Rc` if nothing below
/// it changed, or a freshly rebuilt parent if a descendant did).
///
/// A read-only query like `FindMethods` only needs to override the one
/// hook it cares about and always return `None`; a rewrite like
/// `ChangeType` overrides the hooks for the node kinds it can touch and
/// returns `Some` when it actually rewrites one.
macro_rules! visitor_hooks {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        pub trait Visitor {
            $(
                fn $method(&mut self, _node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
                    None
                }
            )+

            /// Drains any non-fatal observations this stage accumulated
            /// (§7 "per-node errors ... attached to the result"). Called
            /// once by [`crate::RefactorTransaction::stage`] after the
            /// walk completes. Most visitors never override this.
            fn take_warnings(&mut self) -> Vec<RefactorWarning> {
                Vec::new()
            }
        }

        fn dispatch(visitor: &mut impl Visitor, node: &NodeRef, cursor: &Cursor) -> Option<NodeRef> {
            match &**node {
                $(Node::$variant(_) => visitor.$method(node, cursor)),+
            }
        }
    };
}

visitor_hooks!(
    compilation_unit => CompilationUnit,
    package => Package,
    import => Import,
    class_decl => ClassDecl,
    method_decl => MethodDecl,
    variable_decls => VariableDecls,
    variable_declarator => VariableDeclarator,
    block => Block,
    annotation => Annotation,
    array_access => ArrayAccess,
    array_type => ArrayType,
    assign => Assign,
    compound_assign => CompoundAssign,
    binary => Binary,
    break_stmt => Break,
    case => Case,
    catch => Catch,
    continue_stmt => Continue,
    do_while => DoWhile,
    empty => Empty,
    enum_value => EnumValue,
    field_access => FieldAccess,
    for_each => ForEach,
    for_stmt => For,
    identifier => Identifier,
    if_stmt => If,
    instance_of => InstanceOf,
    label => Label,
    lambda => Lambda,
    literal => Literal,
    method_invocation => MethodInvocation,
    multi_catch => MultiCatch,
    new_array => NewArray,
    new_class => NewClass,
    parameterized_type => ParameterizedType,
    parentheses => Parentheses,
    primitive_type => PrimitiveType,
    return_stmt => Return,
    switch_stmt => Switch,
    synchronized => Synchronized,
    ternary => Ternary,
    throw_stmt => Throw,
    try_stmt => Try,
    type_cast => TypeCast,
    type_parameter => TypeParameter,
    type_parameters => TypeParameters,
    unary => Unary,
    while_stmt => While,
    wildcard => Wildcard,
);

/// Walks `node` post-order: children are walked (and potentially
/// replaced) first, a parent is rebuilt only if at least one child
/// actually changed, and the node's own hook runs last on that
/// (possibly rebuilt) node. Unchanged subtrees are returned as the same
/// `Rc` all the way up, so a visitor that touches one leaf in a
/// thousand-node tree allocates proportional to its depth, not its
/// size.
pub fn walk(visitor: &mut impl Visitor, cursor: &mut Cursor, node: &NodeRef) -> NodeRef {
    #[cfg(feature = "trace-visitor")]
    tracing::trace!(node_id = ?node.id(), kind = ?node.kind(), "visiting node");

    cursor.push(node.clone());
    let children = node.children();
    let mut new_children = Vec::with_capacity(children.len());
    let mut changed = false;
    for child in &children {
        let rewritten = walk(visitor, cursor, child);
        if !Rc::ptr_eq(&rewritten, child) {
            changed = true;
        }
        new_children.push(rewritten);
    }
    cursor.pop();

    let rebuilt = if changed {
        Rc::new(rebuild_with_children(node, new_children))
    } else {
        node.clone()
    };

    match dispatch(visitor, &rebuilt, cursor) {
        Some(replacement) => replacement,
        None => rebuilt,
    }
}
