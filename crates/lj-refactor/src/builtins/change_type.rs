use std::rc::Rc;

use lj_types::{ClassId, Type};

use crate::cursor::Cursor;
use crate::visitor::Visitor;
use lj_tree::{CompilationUnitData, ImportData, Node, NodeIdGen, NodeMeta, NodeRef};

/// Rewrites every reference to `from` into a reference to `to` (§4.F
/// "ChangeType"). Only nodes whose *resolved* type is `from` are
/// touched — an `Identifier` named `"List"` that happens to resolve to
/// some unrelated `com.acme.List` is left alone, since matching is by
/// resolved symbol, not by spelling.
///
/// Only bare `Identifier` type references are rewritten (the common
/// case: an unqualified type name in a declaration, cast, or
/// `instanceof`). A qualified `FieldAccess` spelling of the same type
/// is a separate reference shape this refactor does not (yet) rewrite
/// in place — it would need to replace a `FieldAccess` node with a
/// plain `Identifier`, a different node kind.
///
/// Once any identifier is rewritten, the compilation unit's import list
/// is brought in line: an import for `to` is added unless already
/// covered (exactly or by a star import), and the import for `from` is
/// dropped once nothing in the tree resolves to it any more.
pub struct ChangeType<'a> {
    from: ClassId,
    to: ClassId,
    to_simple_name: String,
    id_gen: &'a NodeIdGen,
    hits: usize,
}

impl<'a> ChangeType<'a> {
    pub fn new(from: ClassId, to: ClassId, id_gen: &'a NodeIdGen) -> Self {
        let to_simple_name = to
            .fully_qualified_name()
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            from,
            to,
            to_simple_name,
            id_gen,
            hits: 0,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl<'a> Visitor for ChangeType<'a> {
    fn identifier(&mut self, node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
        let matches = matches!(node.ty(), Some(Type::Class(id)) if *id == self.from);
        if !matches {
            return None;
        }
        let Node::Identifier(d) = &**node else {
            return None;
        };
        self.hits += 1;
        let mut new_data = (**d).clone();
        new_data.name = self.to_simple_name.as_str().into();
        new_data.meta.ty = Some(Type::Class(self.to));
        Some(Rc::new(Node::Identifier(Box::new(new_data))))
    }

    fn compilation_unit(&mut self, node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
        if self.hits == 0 {
            return None;
        }
        let Node::CompilationUnit(d) = &**node else {
            return None;
        };

        let from_fqn = self.from.fully_qualified_name();
        let to_fqn = self.to.fully_qualified_name();
        let to_pkg = to_fqn.rsplit_once('.').map(|(pkg, _)| pkg);

        let to_covered = d.imports.iter().any(|imp| match &**imp {
            Node::Import(i) if !i.is_static => {
                i.qualified_name == to_fqn || (i.is_star && Some(i.qualified_name.as_str()) == to_pkg)
            }
            _ => false,
        });

        let from_still_referenced = d.types.iter().any(|t| references_class(t, self.from))
            || d
                .package
                .as_ref()
                .is_some_and(|p| references_class(p, self.from));

        let mut imports: Vec<NodeRef> = d
            .imports
            .iter()
            .filter(|imp| match &***imp {
                Node::Import(i) if !i.is_static && !i.is_star && i.qualified_name == from_fqn => {
                    from_still_referenced
                }
                _ => true,
            })
            .cloned()
            .collect();
        let removed_from = imports.len() != d.imports.len();

        let mut added_to = false;
        if !to_covered {
            imports.push(Rc::new(Node::Import(Box::new(ImportData {
                meta: NodeMeta::new(self.id_gen.next()),
                is_static: false,
                is_star: false,
                qualified_name: to_fqn.to_string(),
            }))));
            added_to = true;
        }

        if !removed_from && !added_to {
            return None;
        }

        let new_data = CompilationUnitData {
            meta: d.meta.clone(),
            package: d.package.clone(),
            imports,
            types: d.types.clone(),
        };
        Some(Rc::new(Node::CompilationUnit(Box::new(new_data))))
    }
}

/// Whether `node` or any descendant resolves to `target`.
fn references_class(node: &NodeRef, target: ClassId) -> bool {
    if matches!(node.ty(), Some(Type::Class(id)) if *id == target) {
        return true;
    }
    node.children().iter().any(|c| references_class(c, target))
}
