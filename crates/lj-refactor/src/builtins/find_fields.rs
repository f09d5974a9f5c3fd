use lj_tree::NodeRef;

/// All field-declaration nodes on `class_decl`, optionally walking
/// supertypes when `include_inherited` is set (§4.F "FindFields").
pub fn find_fields(
    class_decl: &NodeRef,
    include_inherited: bool,
    supertype_of: &impl Fn(&NodeRef) -> Option<NodeRef>,
) -> Vec<NodeRef> {
    if include_inherited {
        lj_tree::search::find_inherited_fields(class_decl, supertype_of)
    } else {
        lj_tree::search::find_fields(class_decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lj_tree::{ClassDeclData, ClassKind, Formatting, Node, NodeIdGen, NodeMeta, VariableDeclsData};
    use lj_types::{PrimitiveTag, Type};
    use std::rc::Rc;

    fn field(gen: &NodeIdGen, name: &str) -> NodeRef {
        Rc::new(Node::VariableDecls(Box::new(VariableDeclsData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            annotations: Vec::new(),
            modifiers: Vec::new(),
            declared_type: Rc::new(Node::PrimitiveType(Box::new(lj_tree::PrimitiveTypeData {
                meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
                keyword: lj_tree::PrimitiveKeyword::Int,
            }))),
            declarators: vec![Rc::new(Node::VariableDeclarator(Box::new(
                lj_tree::VariableDeclaratorData {
                    meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
                    name: name.into(),
                    extra_dims: 0,
                    initializer: None,
                },
            )))],
        })))
    }

    #[test]
    fn finds_fields_declared_directly_on_the_class() {
        let gen = NodeIdGen::new();
        let class: NodeRef = Rc::new(Node::ClassDecl(Box::new(ClassDeclData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            annotations: Vec::new(),
            modifiers: Vec::new(),
            kind: ClassKind::Class,
            name: "Widget".into(),
            type_parameters: None,
            extends: Vec::new(),
            implements: Vec::new(),
            members: vec![field(&gen, "count")],
        })));

        let found = find_fields(&class, false, &|_| None);
        assert_eq!(found.len(), 1);
        let _ = Type::Primitive(PrimitiveTag::Int);
    }
}
