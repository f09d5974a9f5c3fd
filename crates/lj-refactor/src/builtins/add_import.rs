use std::rc::Rc;

use crate::cursor::Cursor;
use crate::visitor::Visitor;
use lj_tree::{CompilationUnitData, Formatting, ImportData, Node, NodeIdGen, NodeMeta, NodeRef};

/// Inserts an import declaration for `qualified_name` if the
/// compilation unit doesn't already have an equivalent one (§4.F
/// "AddImport ... is a no-op if an exact or covering star import is
/// already present"). The new node's formatting is left as `Infer`; it
/// gets a concrete prefix/suffix the first time the tree is printed.
pub struct AddImport<'a> {
    qualified_name: String,
    is_static: bool,
    id_gen: &'a NodeIdGen,
    added: bool,
}

impl<'a> AddImport<'a> {
    pub fn new(qualified_name: impl Into<String>, is_static: bool, id_gen: &'a NodeIdGen) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            is_static,
            id_gen,
            added: false,
        }
    }

    pub fn added(&self) -> bool {
        self.added
    }

    fn already_covered(&self, imports: &[NodeRef]) -> bool {
        let pkg = self.qualified_name.rsplit_once('.').map(|(pkg, _)| pkg);
        imports.iter().any(|imp| match &**imp {
            Node::Import(i) if i.is_static == self.is_static => {
                i.qualified_name == self.qualified_name
                    || (i.is_star && Some(i.qualified_name.as_str()) == pkg)
            }
            _ => false,
        })
    }
}

impl<'a> Visitor for AddImport<'a> {
    fn compilation_unit(&mut self, node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
        let Node::CompilationUnit(d) = &**node else {
            return None;
        };
        if self.already_covered(&d.imports) {
            return None;
        }
        let new_import: NodeRef = Rc::new(Node::Import(Box::new(ImportData {
            meta: NodeMeta::new(self.id_gen.next()),
            is_static: self.is_static,
            is_star: false,
            qualified_name: self.qualified_name.clone(),
        })));
        let mut imports = d.imports.clone();
        imports.push(new_import);
        self.added = true;
        let new_data = CompilationUnitData {
            meta: d.meta.clone(),
            package: d.package.clone(),
            imports,
            types: d.types.clone(),
        };
        Some(Rc::new(Node::CompilationUnit(Box::new(new_data))))
    }
}
