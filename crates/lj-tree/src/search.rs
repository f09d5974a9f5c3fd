use lj_types::{ClassId, Type};

use crate::error::TreeError;
use crate::id::NodeId;
use crate::node::{MethodInvocationData, Node, NodeRef};

/// Looks up the node with the given stable [`NodeId`] anywhere in
/// `root`'s subtree. Used by callers (e.g. an LSP front end resolving a
/// code-action target) that only have an id to go on, not a `NodeRef`.
pub fn find_by_id(root: &NodeRef, id: NodeId) -> Result<NodeRef, TreeError> {
    find_all(root, &|n| n.id() == id)
        .into_iter()
        .next()
        .ok_or(TreeError::UnknownNodeId(id))
}

/// Depth-first pre-order walk collecting every node for which `pred`
/// returns `true`. The generic building block `find_methods`,
/// `find_fields`, `has_type` and `has_import` are all expressed in
/// terms of (§4.E read-only queries, no visitor state needed).
pub fn find_all(root: &NodeRef, pred: &impl Fn(&Node) -> bool) -> Vec<NodeRef> {
    let mut out = Vec::new();
    find_all_into(root, pred, &mut out);
    out
}

fn find_all_into(node: &NodeRef, pred: &impl Fn(&Node) -> bool, out: &mut Vec<NodeRef>) {
    if pred(node) {
        out.push(node.clone());
    }
    for child in node.children() {
        find_all_into(&child, pred, out);
    }
}

/// All method-invocation nodes whose resolved receiver type (if any)
/// is `on_type`, or whose receiver could not be resolved and `on_type`
/// is `None` (unqualified, same-class calls).
pub fn find_method_calls(root: &NodeRef, name: &str, on_type: Option<ClassId>) -> Vec<NodeRef> {
    find_all(root, &|n| match n {
        Node::MethodInvocation(d) => d.name == name && receiver_matches(d, on_type),
        _ => false,
    })
}

fn receiver_matches(d: &MethodInvocationData, on_type: Option<ClassId>) -> bool {
    match (d.target.as_ref().and_then(|t| t.ty()), on_type) {
        (Some(Type::Class(id)), Some(want)) => *id == want,
        (None, None) => true,
        _ => false,
    }
}

/// All field-declaration nodes (`VariableDecls` at class member scope,
/// not local variables) declared directly on `class`.
pub fn find_fields(class_body: &NodeRef) -> Vec<NodeRef> {
    match &**class_body {
        Node::ClassDecl(d) => d
            .members
            .iter()
            .filter(|m| matches!(***m, Node::VariableDecls(_)))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Fields visible on `class`, including those declared on its
/// supertypes, walking `supertype_of` until it returns `None`.
pub fn find_inherited_fields(
    class: &NodeRef,
    supertype_of: &impl Fn(&NodeRef) -> Option<NodeRef>,
) -> Vec<NodeRef> {
    let mut out = find_fields(class);
    let mut cur = supertype_of(class);
    while let Some(c) = cur {
        out.extend(find_fields(&c));
        cur = supertype_of(&c);
    }
    out
}

/// Whether any node in the tree resolves to `ty` — used by
/// `HasType`/matcher guard checks that gate a rewrite on the presence
/// of a type before spending effort constructing fixes for it.
pub fn has_type(root: &NodeRef, ty: &Type) -> bool {
    !find_all(root, &|n| n.ty() == Some(ty)).is_empty()
}

/// Whether the compilation unit imports `qualified_name`, either
/// exactly or via a star import of its package.
pub fn has_import(root: &NodeRef, qualified_name: &str) -> bool {
    let pkg = qualified_name.rsplit_once('.').map(|(pkg, _)| pkg);
    !find_all(root, &|n| match n {
        Node::Import(d) if !d.is_static => {
            d.qualified_name == qualified_name
                || (d.is_star && Some(d.qualified_name.as_str()) == pkg)
        }
        _ => false,
    })
    .is_empty()
}
