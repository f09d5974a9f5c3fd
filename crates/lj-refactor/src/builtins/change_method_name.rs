use std::rc::Rc;

use lj_types::{Type, TypeEnv};

use crate::cursor::Cursor;
use crate::matcher::MethodPattern;
use crate::visitor::Visitor;
use crate::warning::RefactorWarning;
use lj_tree::{Node, NodeRef};

/// Whether a node's resolved type matches the pattern, or couldn't be
/// resolved at all. A call site with no resolved `Type::Method` isn't
/// necessarily a non-match — it may just be a node the type-resolution
/// boundary never annotated — so it's tracked separately rather than
/// folded into "doesn't match".
enum Resolution {
    Matches,
    DoesNotMatch,
    Unresolved,
}

/// Renames both the declaration and every call site of methods
/// matching `pattern` to `new_name` (§4.F "ChangeMethodName"). A
/// declaration and its call sites are linked purely through the
/// resolved `Type::Method` each carries — no name-based guessing.
pub struct ChangeMethodName<'a> {
    env: &'a TypeEnv,
    pattern: MethodPattern,
    new_name: String,
    hits: usize,
    unresolved: Vec<lj_tree::NodeId>,
}

impl<'a> ChangeMethodName<'a> {
    pub fn new(env: &'a TypeEnv, pattern: MethodPattern, new_name: impl Into<String>) -> Self {
        Self {
            env,
            pattern,
            new_name: new_name.into(),
            hits: 0,
            unresolved: Vec::new(),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    fn resolve(&self, node: &Node) -> Resolution {
        match node.ty() {
            Some(Type::Method(mid)) => match self.env.method(*mid) {
                Some(m) if self.pattern.matches(self.env, m) => Resolution::Matches,
                Some(_) => Resolution::DoesNotMatch,
                None => Resolution::Unresolved,
            },
            Some(_) => Resolution::DoesNotMatch,
            None => Resolution::Unresolved,
        }
    }
}

impl<'a> Visitor for ChangeMethodName<'a> {
    fn method_decl(&mut self, node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
        match self.resolve(node) {
            Resolution::Matches => {}
            Resolution::Unresolved => {
                self.unresolved.push(node.id());
                return None;
            }
            Resolution::DoesNotMatch => return None,
        }
        let Node::MethodDecl(d) = &**node else {
            return None;
        };
        self.hits += 1;
        let mut new_data = (**d).clone();
        new_data.name = self.new_name.as_str().into();
        Some(Rc::new(Node::MethodDecl(Box::new(new_data))))
    }

    fn method_invocation(&mut self, node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
        match self.resolve(node) {
            Resolution::Matches => {}
            Resolution::Unresolved => {
                self.unresolved.push(node.id());
                return None;
            }
            Resolution::DoesNotMatch => return None,
        }
        let Node::MethodInvocation(d) = &**node else {
            return None;
        };
        self.hits += 1;
        let mut new_data = (**d).clone();
        new_data.name = self.new_name.as_str().into();
        Some(Rc::new(Node::MethodInvocation(Box::new(new_data))))
    }

    fn take_warnings(&mut self) -> Vec<RefactorWarning> {
        self.unresolved
            .drain(..)
            .map(RefactorWarning::UnresolvedSymbol)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::walk;
    use lj_tree::{Formatting, MethodInvocationData, NodeIdGen, NodeMeta};
    use lj_types::{ClassData, MethodData, Owner, PrimitiveTag};

    #[test]
    fn renames_call_sites_whose_resolved_method_matches() {
        let mut env = TypeEnv::new();
        let owner = env.build("com.example.Widget").unwrap();
        env.define_class(
            owner,
            ClassData {
                fully_qualified_name: "com.example.Widget".into(),
                owner: Some(Owner::Package("com.example".into())),
                supertype: None,
                interfaces: Vec::new(),
                members: Vec::new(),
            },
        );
        let method_id = env.add_method(MethodData {
            declaring_type: owner,
            name: "oldName".into(),
            generic_signature: None,
            resolved_signature: None,
            param_types: Vec::new(),
            return_type: Type::Primitive(PrimitiveTag::Void),
        });

        let gen = NodeIdGen::new();
        let call: NodeRef = Rc::new(Node::MethodInvocation(Box::new(MethodInvocationData {
            meta: NodeMeta::new(gen.next())
                .with_formatting(Formatting::reified("", ""))
                .with_type(Type::Method(method_id)),
            target: None,
            type_arguments: Vec::new(),
            name: "oldName".into(),
            arguments: Vec::new(),
        })));

        let pattern = MethodPattern::compile("com.example.Widget oldName()").unwrap();
        let mut visitor = ChangeMethodName::new(&env, pattern, "newName");
        let mut cursor = Cursor::new();
        let result = walk(&mut visitor, &mut cursor, &call);

        assert_eq!(visitor.hits(), 1);
        match &*result {
            Node::MethodInvocation(d) => assert_eq!(d.name, "newName"),
            _ => panic!("expected method invocation"),
        }
    }

    #[test]
    fn call_sites_with_no_resolved_type_are_reported_as_warnings_not_renamed() {
        let mut env = TypeEnv::new();
        let owner = env.build("com.example.Widget").unwrap();
        env.define_class(
            owner,
            ClassData {
                fully_qualified_name: "com.example.Widget".into(),
                owner: Some(Owner::Package("com.example".into())),
                supertype: None,
                interfaces: Vec::new(),
                members: Vec::new(),
            },
        );

        let gen = NodeIdGen::new();
        let unresolved_id = gen.next();
        let call: NodeRef = Rc::new(Node::MethodInvocation(Box::new(MethodInvocationData {
            meta: NodeMeta::new(unresolved_id).with_formatting(Formatting::reified("", "")),
            target: None,
            type_arguments: Vec::new(),
            name: "oldName".into(),
            arguments: Vec::new(),
        })));

        let pattern = MethodPattern::compile("com.example.Widget oldName()").unwrap();
        let mut visitor = ChangeMethodName::new(&env, pattern, "newName");
        let mut cursor = Cursor::new();
        let result = walk(&mut visitor, &mut cursor, &call);

        assert_eq!(visitor.hits(), 0);
        assert!(matches!(&*result, Node::MethodInvocation(d) if d.name == "oldName"));
        assert_eq!(
            visitor.take_warnings(),
            vec![RefactorWarning::UnresolvedSymbol(unresolved_id)]
        );
    }
}
