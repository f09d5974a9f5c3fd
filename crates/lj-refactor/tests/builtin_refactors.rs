use std::rc::Rc;

use lj_refactor::builtins::{ChangeMethodName, ChangeType, RemoveImport};
use lj_refactor::{MethodPattern, RefactorTransaction, Visitor};
use lj_tree::{
    print, BinaryData, BlockData, ClassDeclData, ClassKind, CompilationUnitData, Formatting,
    IdentifierData, ImportData, MethodDeclData, MethodInvocationData, Node, NodeIdGen, NodeMeta,
    NodeRef, PrimitiveKeyword, PrimitiveTypeData, ReturnData,
};
use lj_types::{ClassData, MethodData, Owner, PrimitiveTag, Type, TypeEnv};
use pretty_assertions::assert_eq;

fn ident(gen: &NodeIdGen, name: &str, prefix: &str, suffix: &str) -> NodeRef {
    Rc::new(Node::Identifier(Box::new(IdentifierData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified(prefix, suffix)),
        name: name.into(),
    })))
}

/// Renaming a method with a single argument renames both the
/// declaration and every call site, leaving argument lists untouched.
#[test]
fn method_rename_with_a_single_argument_call_site() {
    let mut env = TypeEnv::new();
    let owner = env.build("com.example.Greeter").unwrap();
    env.define_class(
        owner,
        ClassData {
            fully_qualified_name: "com.example.Greeter".into(),
            owner: Some(Owner::Package("com.example".into())),
            supertype: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        },
    );
    let mid = env.add_method(MethodData {
        declaring_type: owner,
        name: "sayHello".into(),
        generic_signature: None,
        resolved_signature: None,
        param_types: vec![Type::Class(
            lj_types::intern_class("java.lang.String").unwrap(),
        )],
        return_type: Type::Primitive(PrimitiveTag::Void),
    });

    let gen = NodeIdGen::new();
    let arg = ident(&gen, "name", "", "");
    let call: NodeRef = Rc::new(Node::MethodInvocation(Box::new(MethodInvocationData {
        meta: NodeMeta::new(gen.next())
            .with_formatting(Formatting::reified("", ";"))
            .with_type(Type::Method(mid)),
        target: None,
        type_arguments: Vec::new(),
        name: "sayHello".into(),
        arguments: vec![arg],
    })));

    let source = print::print(&call);
    let pattern = MethodPattern::compile("com.example.Greeter sayHello(java.lang.String)").unwrap();
    let mut txn = RefactorTransaction::new(&env, call, source.clone());
    txn.stage(&mut ChangeMethodName::new(&env, pattern, "greet"));
    let result = txn.finish().unwrap();

    assert!(result.changed);
    assert_eq!(result.fixed, "greet(name);");
}

/// A `..`-terminated argument pattern matches calls with extra trailing
/// arguments beyond the fixed prefix.
#[test]
fn varargs_wildcard_argument_pattern_matches_extra_arguments() {
    let mut env = TypeEnv::new();
    let owner = env.build("com.example.Logger").unwrap();
    env.define_class(
        owner,
        ClassData {
            fully_qualified_name: "com.example.Logger".into(),
            owner: Some(Owner::Package("com.example".into())),
            supertype: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        },
    );
    let mid = env.add_method(MethodData {
        declaring_type: owner,
        name: "log".into(),
        generic_signature: None,
        resolved_signature: None,
        param_types: vec![
            Type::Class(lj_types::intern_class("java.lang.String").unwrap()),
            Type::Primitive(PrimitiveTag::Int),
            Type::Primitive(PrimitiveTag::Boolean),
        ],
        return_type: Type::Primitive(PrimitiveTag::Void),
    });

    let pattern = MethodPattern::compile("com.example.Logger log(java.lang.String, ..)").unwrap();
    let method = env.method(mid).unwrap();
    assert!(pattern.matches(&env, method));
}

/// `ChangeType` rewrites nodes that resolve to the source type, leaves
/// the surrounding tree (including an unrelated import) untouched, and
/// flips the compilation unit's import from `from` to `to`.
#[test]
fn array_argument_type_change_flips_the_import() {
    let gen = NodeIdGen::new();
    let from = lj_types::intern_class("a.A1").unwrap();
    let to = lj_types::intern_class("a.A2").unwrap();
    let other = lj_types::intern_class("java.lang.String").unwrap();

    let matching = Rc::new(Node::Identifier(Box::new(IdentifierData {
        meta: NodeMeta::new(gen.next())
            .with_formatting(Formatting::reified("", ""))
            .with_type(Type::Class(from)),
        name: "A1".into(),
    })));
    let unrelated = Rc::new(Node::Identifier(Box::new(IdentifierData {
        meta: NodeMeta::new(gen.next())
            .with_formatting(Formatting::reified(", ", ""))
            .with_type(Type::Class(other)),
        name: "String".into(),
    })));
    let array_type = Rc::new(Node::ArrayType(Box::new(lj_tree::ArrayTypeData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "")),
        element_type: matching,
        dims: 1,
    })));
    let block = Rc::new(Node::Block(Box::new(BlockData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified(" ", "")),
        statements: vec![array_type, unrelated],
    })));
    let class: NodeRef = Rc::new(Node::ClassDecl(Box::new(lj_tree::ClassDeclData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
        annotations: Vec::new(),
        modifiers: vec![lj_tree::Modifier::Public],
        kind: ClassKind::Class,
        name: "Holder".into(),
        type_parameters: None,
        extends: Vec::new(),
        implements: Vec::new(),
        members: vec![block],
    })));
    let import = Rc::new(Node::Import(Box::new(ImportData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "\n")),
        is_static: false,
        is_star: false,
        qualified_name: "a.A1".into(),
    })));
    let cu: NodeRef = Rc::new(Node::CompilationUnit(Box::new(CompilationUnitData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
        package: None,
        imports: vec![import],
        types: vec![class],
    })));

    let env = TypeEnv::new();
    let source = print::print(&cu);
    let mut txn = RefactorTransaction::new(&env, cu, source);
    let id_gen = NodeIdGen::new();
    txn.stage(&mut ChangeType::new(from, to, &id_gen));
    let result = txn.finish().unwrap();

    assert!(result.changed);
    assert!(result.fixed.contains("A2[]"));
    assert!(result.fixed.contains(", String"));
    assert!(!result.fixed.contains("a.A1"));
    assert!(result.fixed.contains("a.A2"));
}

/// A star import collapses to the single-type import once the other
/// member of its package it used to cover is gone: `import a.*;`
/// referencing only `a.A1` and `a.A2`, a removal pass targeting an
/// unrelated class is a no-op, and once `a.A2` stops being referenced
/// the star collapses to `import a.A1;`.
#[test]
fn star_import_collapses_once_a_single_member_remains_referenced() {
    let gen = NodeIdGen::new();
    let a1 = lj_types::intern_class("a.A1").unwrap();
    let a2 = lj_types::intern_class("a.A2").unwrap();

    let star = Rc::new(Node::Import(Box::new(ImportData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "\n")),
        is_static: false,
        is_star: true,
        qualified_name: "a".into(),
    })));
    let ref_a1 = Rc::new(Node::Identifier(Box::new(IdentifierData {
        meta: NodeMeta::new(gen.next())
            .with_formatting(Formatting::reified("", ""))
            .with_type(Type::Class(a1)),
        name: "A1".into(),
    })));
    let ref_a2 = Rc::new(Node::Identifier(Box::new(IdentifierData {
        meta: NodeMeta::new(gen.next())
            .with_formatting(Formatting::reified(", ", ""))
            .with_type(Type::Class(a2)),
        name: "A2".into(),
    })));
    let cu: NodeRef = Rc::new(Node::CompilationUnit(Box::new(CompilationUnitData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
        package: None,
        imports: vec![star],
        types: vec![ref_a1.clone(), ref_a2],
    })));

    let env = TypeEnv::new();

    // Both a.A1 and a.A2 are still referenced, so a removal pass
    // targeting an unrelated class of the same package changes nothing.
    let source = print::print(&cu);
    let mut txn = RefactorTransaction::new(&env, cu.clone(), source.clone());
    txn.stage(&mut RemoveImport::new(&env, "a.B"));
    let untouched = txn.finish().unwrap();
    assert!(!untouched.changed);

    // Once a.A2's only reference is gone (as if an earlier stage
    // removed it), RemoveImport("a") collapses the star to the single
    // remaining member.
    let cu_without_a2: NodeRef = Rc::new(Node::CompilationUnit(Box::new(CompilationUnitData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
        package: None,
        imports: match &*cu {
            Node::CompilationUnit(d) => d.imports.clone(),
            _ => unreachable!(),
        },
        types: vec![ref_a1],
    })));
    let source_without_a2 = print::print(&cu_without_a2);
    let mut txn = RefactorTransaction::new(&env, cu_without_a2, source_without_a2);
    txn.stage(&mut RemoveImport::new(&env, "a"));
    let result = txn.finish().unwrap();

    assert!(result.changed);
    assert!(!result.fixed.contains("a.*"));
    assert!(result.fixed.contains("import a.A1;"));
}

/// Identity refactor: a no-op visitor stage never changes the printed
/// output, regardless of tree shape.
#[test]
fn identity_refactor_never_changes_source() {
    struct NoOp;
    impl Visitor for NoOp {}

    let gen = NodeIdGen::new();
    let return_stmt: NodeRef = Rc::new(Node::Return(Box::new(ReturnData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "")),
        value: Some(Rc::new(Node::Binary(Box::new(BinaryData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            left: ident(&gen, "a", " ", ""),
            op: lj_tree::BinaryOp::Add(Formatting::reified(" ", " ")),
            right: ident(&gen, "b", "", ""),
        })))),
    })));

    let env = TypeEnv::new();
    let source = print::print(&return_stmt);
    let mut txn = RefactorTransaction::new(&env, return_stmt, source.clone());
    txn.stage(&mut NoOp);
    let result = txn.finish().unwrap();

    assert!(!result.changed);
    assert_eq!(result.fixed, source);
}

/// A method declaration embedded in a class is renamed consistently
/// with `ChangeMethodName`, independent of surrounding modifiers.
#[test]
fn method_declaration_rename_inside_a_class_body() {
    let mut env = TypeEnv::new();
    let owner = env.build("com.example.Service").unwrap();
    env.define_class(
        owner,
        ClassData {
            fully_qualified_name: "com.example.Service".into(),
            owner: Some(Owner::Package("com.example".into())),
            supertype: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        },
    );
    let mid = env.add_method(MethodData {
        declaring_type: owner,
        name: "handle".into(),
        generic_signature: None,
        resolved_signature: None,
        param_types: Vec::new(),
        return_type: Type::Primitive(PrimitiveTag::Void),
    });

    let gen = NodeIdGen::new();
    let method_decl: NodeRef = Rc::new(Node::MethodDecl(Box::new(MethodDeclData {
        meta: NodeMeta::new(gen.next())
            .with_formatting(Formatting::reified("\n  ", ""))
            .with_type(Type::Method(mid)),
        annotations: Vec::new(),
        modifiers: vec![lj_tree::Modifier::Public],
        type_parameters: None,
        return_type: Some(Rc::new(Node::PrimitiveType(Box::new(PrimitiveTypeData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            keyword: PrimitiveKeyword::Void,
        })))),
        name: "handle".into(),
        params: Vec::new(),
        throws: Vec::new(),
        body: Some(Rc::new(Node::Block(Box::new(BlockData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified(" ", "")),
            statements: Vec::new(),
        })))),
    })));
    let class: NodeRef = Rc::new(Node::ClassDecl(Box::new(ClassDeclData {
        meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "")),
        annotations: Vec::new(),
        modifiers: vec![lj_tree::Modifier::Public],
        kind: ClassKind::Class,
        name: "Service".into(),
        type_parameters: None,
        extends: Vec::new(),
        implements: Vec::new(),
        members: vec![method_decl],
    })));

    let pattern = MethodPattern::compile("com.example.Service handle()").unwrap();
    let source = print::print(&class);
    let mut txn = RefactorTransaction::new(&env, class, source);
    txn.stage(&mut ChangeMethodName::new(&env, pattern, "process"));
    let result = txn.finish().unwrap();

    assert!(result.changed);
    assert!(result.fixed.contains("void process()"));
    assert!(!result.fixed.contains("handle"));
}
