use std::collections::HashMap;

use crate::formatting::Formatting;
use crate::node::*;

/// Renders a tree back to source text (§4.B "Printing").
///
/// Every node contributes `prefix + token(s)/children + suffix`. Nodes
/// with `Formatting::Reified` or `Formatting::None` print back
/// byte-for-byte what they held before any rewrite touched them;
/// `Formatting::Infer` nodes (fresh nodes created by a refactor, or
/// nodes whose own formatting was never captured) get a synthesized
/// prefix/suffix from [`default_formatting`] instead.
pub fn print(node: &Node) -> String {
    let mut out = String::new();
    emit(node, &mut out);
    out
}

/// Reifies every `Formatting::Infer` node in the tree into a concrete
/// `Formatting::Reified`, returning a new tree. Subtrees that are
/// already fully reified (or `None`) are returned as the *same* `Rc`
/// allocation rather than rebuilt, preserving the identity-sharing
/// invariant for everything a rewrite didn't touch (§3.1 Lifecycle).
/// A rewrite that synthesizes one new `Identifier` node only pays the
/// reification cost for that node and its ancestors, not the whole
/// tree.
pub fn reify(node: &NodeRef) -> NodeRef {
    let mut cache = HashMap::new();
    reify_cached(node, &mut cache)
}

fn reify_cached(node: &NodeRef, cache: &mut HashMap<u64, NodeRef>) -> NodeRef {
    let id = node.id().as_u64();
    if let Some(hit) = cache.get(&id) {
        return hit.clone();
    }
    let result = reify_one(node, cache);
    cache.insert(id, result.clone());
    result
}

/// Synthesized default prefix/suffix for an `Infer` node, based on its
/// kind (§4.B "Formatting inference"). A real pretty-printer would
/// inspect the nearest sibling of the same category; this is the
/// fallback that heuristic uses when no sibling exists, and is applied
/// uniformly here since nodes built programmatically rarely have
/// siblings to copy from anyway.
fn default_formatting(node: &Node) -> (&'static str, &'static str) {
    use SyntaxKindCategory::*;
    match category(node) {
        Statement => ("", "\n"),
        BlockMember => ("\n", ""),
        Operand => (" ", " "),
        ListItem => ("", ", "),
        Bare => ("", ""),
    }
}

enum SyntaxKindCategory {
    Statement,
    BlockMember,
    Operand,
    ListItem,
    Bare,
}

fn category(node: &Node) -> SyntaxKindCategory {
    match node {
        Node::Import(_) | Node::Package(_) => SyntaxKindCategory::Statement,
        Node::ClassDecl(_) | Node::MethodDecl(_) | Node::VariableDecls(_) => {
            SyntaxKindCategory::BlockMember
        }
        Node::Identifier(_) | Node::Literal(_) | Node::Binary(_) | Node::Unary(_) => {
            SyntaxKindCategory::Operand
        }
        _ => SyntaxKindCategory::Bare,
    }
}

fn reify_formatting(node: &Node) -> Formatting {
    match node.formatting() {
        Formatting::Infer => {
            let (prefix, suffix) = default_formatting(node);
            Formatting::reified(prefix, suffix)
        }
        other => other.clone(),
    }
}

// A hand-written per-variant reification would be enormous; instead
// the generic `children()` walk below is reused to decide whether any
// descendant needs reifying, and only the node's own formatting (plus
// children already reified through the cache) is replaced when so.
fn reify_one(node: &NodeRef, cache: &mut HashMap<u64, NodeRef>) -> NodeRef {
    let needs_self = node.formatting().is_infer();
    let children = node.children();
    let mut new_children = Vec::with_capacity(children.len());
    let mut any_child_changed = false;
    for c in &children {
        let r = reify_cached(c, cache);
        if !std::rc::Rc::ptr_eq(&r, c) {
            any_child_changed = true;
        }
        new_children.push(r);
    }

    if !needs_self && !any_child_changed {
        return node.clone();
    }

    let mut rebuilt = (**node).clone();
    if rebuilt.formatting().is_infer() {
        let formatting = reify_formatting(&rebuilt);
        tracing::debug!(node_id = ?rebuilt.id(), kind = ?rebuilt.kind(), "reified inferred formatting");
        rebuilt.meta_mut().formatting = formatting;
    }
    replace_children(&mut rebuilt, new_children);
    std::rc::Rc::new(rebuilt)
}

/// Clones `node` with its children replaced by `new_children`, given
/// in the same order [`Node::children`] reads them in. A rewriting
/// visitor uses this to fold a transformed child list back into a
/// freshly rebuilt parent without hand-writing per-kind reconstruction
/// logic at every call site.
pub fn rebuild_with_children(node: &Node, new_children: Vec<NodeRef>) -> Node {
    let mut rebuilt = node.clone();
    replace_children(&mut rebuilt, new_children);
    rebuilt
}

/// Writes `new_children` back into `node` in the same positions
/// `Node::children()` read them from.
fn replace_children(node: &mut Node, mut new_children: Vec<NodeRef>) {
    let mut it = new_children.drain(..);
    macro_rules! next {
        () => {
            it.next().expect("children()/replace_children() arity mismatch")
        };
    }
    match node {
        Node::CompilationUnit(d) => {
            if d.package.is_some() {
                d.package = Some(next!());
            }
            for x in d.imports.iter_mut() {
                *x = next!();
            }
            for x in d.types.iter_mut() {
                *x = next!();
            }
        }
        Node::Package(d) => {
            for x in d.annotations.iter_mut() {
                *x = next!();
            }
        }
        Node::Import(_) => {}
        Node::ClassDecl(d) => {
            for x in d.annotations.iter_mut() {
                *x = next!();
            }
            if d.type_parameters.is_some() {
                d.type_parameters = Some(next!());
            }
            for x in d.extends.iter_mut() {
                *x = next!();
            }
            for x in d.implements.iter_mut() {
                *x = next!();
            }
            for x in d.members.iter_mut() {
                *x = next!();
            }
        }
        Node::MethodDecl(d) => {
            for x in d.annotations.iter_mut() {
                *x = next!();
            }
            if d.type_parameters.is_some() {
                d.type_parameters = Some(next!());
            }
            if d.return_type.is_some() {
                d.return_type = Some(next!());
            }
            for x in d.params.iter_mut() {
                *x = next!();
            }
            for x in d.throws.iter_mut() {
                *x = next!();
            }
            if d.body.is_some() {
                d.body = Some(next!());
            }
        }
        Node::VariableDecls(d) => {
            for x in d.annotations.iter_mut() {
                *x = next!();
            }
            d.declared_type = next!();
            for x in d.declarators.iter_mut() {
                *x = next!();
            }
        }
        Node::VariableDeclarator(d) => {
            if d.initializer.is_some() {
                d.initializer = Some(next!());
            }
        }
        Node::Block(d) => {
            for x in d.statements.iter_mut() {
                *x = next!();
            }
        }
        Node::Annotation(d) => {
            d.type_name = next!();
            for x in d.arguments.iter_mut() {
                *x = next!();
            }
        }
        Node::ArrayAccess(d) => {
            d.array = next!();
            d.index = next!();
        }
        Node::ArrayType(d) => {
            d.element_type = next!();
        }
        Node::Assign(d) => {
            d.target = next!();
            d.value = next!();
        }
        Node::CompoundAssign(d) => {
            d.target = next!();
            d.value = next!();
        }
        Node::Binary(d) => {
            d.left = next!();
            d.right = next!();
        }
        Node::Break(_) | Node::Continue(_) | Node::Empty(_) => {}
        Node::Case(d) => {
            for x in d.labels.iter_mut() {
                *x = next!();
            }
            for x in d.statements.iter_mut() {
                *x = next!();
            }
        }
        Node::Catch(d) => {
            for x in d.exception_types.iter_mut() {
                *x = next!();
            }
            d.body = next!();
        }
        Node::DoWhile(d) => {
            d.body = next!();
            d.condition = next!();
        }
        Node::EnumValue(d) => {
            for x in d.annotations.iter_mut() {
                *x = next!();
            }
            for x in d.arguments.iter_mut() {
                *x = next!();
            }
            if d.body.is_some() {
                d.body = Some(next!());
            }
        }
        Node::FieldAccess(d) => {
            d.target = next!();
        }
        Node::ForEach(d) => {
            d.variable = next!();
            d.iterable = next!();
            d.body = next!();
        }
        Node::For(d) => {
            for x in d.init.iter_mut() {
                *x = next!();
            }
            if d.condition.is_some() {
                d.condition = Some(next!());
            }
            for x in d.update.iter_mut() {
                *x = next!();
            }
            d.body = next!();
        }
        Node::Identifier(_) => {}
        Node::If(d) => {
            d.condition = next!();
            d.then_branch = next!();
            if d.else_branch.is_some() {
                d.else_branch = Some(next!());
            }
        }
        Node::InstanceOf(d) => {
            d.expr = next!();
            d.checked_type = next!();
        }
        Node::Label(d) => {
            d.statement = next!();
        }
        Node::Lambda(d) => {
            for x in d.params.iter_mut() {
                *x = next!();
            }
            d.body = next!();
        }
        Node::Literal(_) => {}
        Node::MethodInvocation(d) => {
            if d.target.is_some() {
                d.target = Some(next!());
            }
            for x in d.type_arguments.iter_mut() {
                *x = next!();
            }
            for x in d.arguments.iter_mut() {
                *x = next!();
            }
        }
        Node::MultiCatch(d) => {
            for x in d.alternatives.iter_mut() {
                *x = next!();
            }
            d.body = next!();
        }
        Node::NewArray(d) => {
            d.element_type = next!();
            for dim in d.dimensions.iter_mut() {
                if dim.is_some() {
                    *dim = Some(next!());
                }
            }
            if let Some(inits) = d.initializers.as_mut() {
                for x in inits.iter_mut() {
                    *x = next!();
                }
            }
        }
        Node::NewClass(d) => {
            if d.enclosing.is_some() {
                d.enclosing = Some(next!());
            }
            d.class_type = next!();
            for x in d.arguments.iter_mut() {
                *x = next!();
            }
            if let Some(body) = d.anonymous_body.as_mut() {
                for x in body.iter_mut() {
                    *x = next!();
                }
            }
        }
        Node::ParameterizedType(d) => {
            d.raw_type = next!();
            for x in d.type_arguments.iter_mut() {
                *x = next!();
            }
        }
        Node::Parentheses(d) => {
            d.inner = next!();
        }
        Node::PrimitiveType(_) => {}
        Node::Return(d) => {
            if d.value.is_some() {
                d.value = Some(next!());
            }
        }
        Node::Switch(d) => {
            d.selector = next!();
            for x in d.cases.iter_mut() {
                *x = next!();
            }
        }
        Node::Synchronized(d) => {
            d.lock = next!();
            d.body = next!();
        }
        Node::Ternary(d) => {
            d.condition = next!();
            d.then_expr = next!();
            d.else_expr = next!();
        }
        Node::Throw(d) => {
            d.expr = next!();
        }
        Node::Try(d) => {
            for x in d.resources.iter_mut() {
                *x = next!();
            }
            d.body = next!();
            for x in d.catches.iter_mut() {
                *x = next!();
            }
            if d.finally_block.is_some() {
                d.finally_block = Some(next!());
            }
        }
        Node::TypeCast(d) => {
            d.target_type = next!();
            d.expr = next!();
        }
        Node::TypeParameter(d) => {
            for x in d.bounds.iter_mut() {
                *x = next!();
            }
        }
        Node::TypeParameters(d) => {
            for x in d.params.iter_mut() {
                *x = next!();
            }
        }
        Node::Unary(d) => {
            d.operand = next!();
        }
        Node::While(d) => {
            d.condition = next!();
            d.body = next!();
        }
        Node::Wildcard(d) => {
            if d.bound.is_some() {
                d.bound = Some(next!());
            }
        }
    }
}

/// Verifies the print-contract invariant (§7 "PrintInvariantViolation"):
/// printing a tree the parser just handed us must reproduce the exact
/// source text it was built from. This is the boundary where a parser
/// producing fully-`Reified` nodes would call in before handing a tree
/// to the rest of the engine; `lj-tree` itself never builds trees from
/// source text, so nothing internal calls this, but it's the contract
/// any producer of a tree for this crate must uphold.
pub fn check_print_invariant(node: &Node, source: &str) -> Result<(), crate::error::TreeError> {
    let printed = print(node);
    if printed == source {
        return Ok(());
    }
    tracing::warn!(node_id = ?node.id(), kind = ?node.kind(), "print invariant violated");
    Err(crate::error::TreeError::PrintInvariantViolation {
        node_id: node.id(),
        detail: format!("printed {} bytes, source is {} bytes", printed.len(), source.len()),
    })
}

/// A human-readable, indented dump of a tree's shape: one line per
/// node, `kind(children...)`, mirroring the golden tree-dump fixtures
/// used elsewhere for parser testing. Not part of the printing
/// contract — purely a debugging/test aid.
pub fn debug_dump(node: &Node) -> String {
    let mut out = String::new();
    dump_one(node, 0, &mut out);
    out
}

fn dump_one(node: &Node, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.kind().name());
    out.push('\n');
    for child in node.children() {
        dump_one(&child, depth + 1, out);
    }
}

fn emit(node: &Node, out: &mut String) {
    let (prefix, suffix) = node.formatting().prefix_suffix();
    out.push_str(prefix);
    emit_core(node, out);
    out.push_str(suffix);
}

fn emit_opt(node: &Option<NodeRef>, out: &mut String) {
    if let Some(n) = node {
        emit(n, out);
    }
}

fn emit_list(nodes: &[NodeRef], out: &mut String) {
    for n in nodes {
        emit(n, out);
    }
}

fn emit_core(node: &Node, out: &mut String) {
    match node {
        Node::CompilationUnit(d) => {
            emit_opt(&d.package, out);
            emit_list(&d.imports, out);
            emit_list(&d.types, out);
        }
        Node::Package(d) => {
            emit_list(&d.annotations, out);
            out.push_str("package ");
            out.push_str(&d.qualified_name);
            out.push(';');
        }
        Node::Import(d) => {
            out.push_str("import ");
            if d.is_static {
                out.push_str("static ");
            }
            out.push_str(&d.qualified_name);
            if d.is_star {
                out.push_str(".*");
            }
            out.push(';');
        }
        Node::ClassDecl(d) => {
            emit_list(&d.annotations, out);
            for m in &d.modifiers {
                out.push_str(modifier_text(*m));
                out.push(' ');
            }
            out.push_str(class_kind_text(d.kind));
            out.push(' ');
            out.push_str(&d.name);
            emit_opt(&d.type_parameters, out);
            if !d.extends.is_empty() {
                out.push_str(" extends ");
                emit_comma_list(&d.extends, out);
            }
            if !d.implements.is_empty() {
                out.push_str(" implements ");
                emit_comma_list(&d.implements, out);
            }
            out.push_str(" {");
            emit_list(&d.members, out);
            out.push('}');
        }
        Node::MethodDecl(d) => {
            emit_list(&d.annotations, out);
            for m in &d.modifiers {
                out.push_str(modifier_text(*m));
                out.push(' ');
            }
            emit_opt(&d.type_parameters, out);
            match &d.return_type {
                Some(rt) => emit(rt, out),
                None => out.push_str("void"),
            }
            out.push(' ');
            out.push_str(&d.name);
            out.push('(');
            emit_comma_list(&d.params, out);
            out.push(')');
            if !d.throws.is_empty() {
                out.push_str(" throws ");
                emit_comma_list(&d.throws, out);
            }
            match &d.body {
                Some(body) => emit(body, out),
                None => out.push(';'),
            }
        }
        Node::VariableDecls(d) => {
            emit_list(&d.annotations, out);
            for m in &d.modifiers {
                out.push_str(modifier_text(*m));
                out.push(' ');
            }
            emit(&d.declared_type, out);
            out.push(' ');
            emit_comma_list(&d.declarators, out);
            out.push(';');
        }
        Node::VariableDeclarator(d) => {
            out.push_str(&d.name);
            for _ in 0..d.extra_dims {
                out.push_str("[]");
            }
            if let Some(init) = &d.initializer {
                out.push_str(" = ");
                emit(init, out);
            }
        }
        Node::Block(d) => {
            out.push('{');
            emit_list(&d.statements, out);
            out.push('}');
        }
        Node::Annotation(d) => {
            out.push('@');
            emit(&d.type_name, out);
            if !d.arguments.is_empty() {
                out.push('(');
                emit_comma_list(&d.arguments, out);
                out.push(')');
            }
        }
        Node::ArrayAccess(d) => {
            emit(&d.array, out);
            out.push('[');
            emit(&d.index, out);
            out.push(']');
        }
        Node::ArrayType(d) => {
            emit(&d.element_type, out);
            for _ in 0..d.dims {
                out.push_str("[]");
            }
        }
        Node::Assign(d) => {
            emit(&d.target, out);
            out.push_str(" = ");
            emit(&d.value, out);
        }
        Node::CompoundAssign(d) => {
            emit(&d.target, out);
            let (p, s) = d.op.formatting().prefix_suffix();
            out.push_str(p);
            out.push_str(d.op.token_text());
            out.push_str(s);
            emit(&d.value, out);
        }
        Node::Binary(d) => {
            emit(&d.left, out);
            let (p, s) = d.op.formatting().prefix_suffix();
            out.push_str(p);
            out.push_str(d.op.token_text());
            out.push_str(s);
            emit(&d.right, out);
        }
        Node::Break(d) => {
            out.push_str("break");
            if let Some(label) = &d.label {
                out.push(' ');
                out.push_str(label);
            }
            out.push(';');
        }
        Node::Case(d) => {
            if d.is_default {
                out.push_str("default:");
            } else {
                out.push_str("case ");
                emit_comma_list(&d.labels, out);
                out.push(':');
            }
            emit_list(&d.statements, out);
        }
        Node::Catch(d) => {
            out.push_str("catch (");
            if let Some(first) = d.exception_types.first() {
                emit(first, out);
                for t in &d.exception_types[1..] {
                    out.push_str(" | ");
                    emit(t, out);
                }
            }
            out.push(' ');
            out.push_str(&d.param_name);
            out.push(')');
            emit(&d.body, out);
        }
        Node::Continue(d) => {
            out.push_str("continue");
            if let Some(label) = &d.label {
                out.push(' ');
                out.push_str(label);
            }
            out.push(';');
        }
        Node::DoWhile(d) => {
            out.push_str("do ");
            emit(&d.body, out);
            out.push_str(" while (");
            emit(&d.condition, out);
            out.push_str(");");
        }
        Node::Empty(_) => {
            out.push(';');
        }
        Node::EnumValue(d) => {
            emit_list(&d.annotations, out);
            out.push_str(&d.name);
            if !d.arguments.is_empty() {
                out.push('(');
                emit_comma_list(&d.arguments, out);
                out.push(')');
            }
            if let Some(body) = &d.body {
                out.push(' ');
                emit(body, out);
            }
        }
        Node::FieldAccess(d) => {
            emit(&d.target, out);
            out.push('.');
            out.push_str(&d.name);
        }
        Node::ForEach(d) => {
            out.push_str("for (");
            emit(&d.variable, out);
            out.push_str(" : ");
            emit(&d.iterable, out);
            out.push(')');
            emit(&d.body, out);
        }
        Node::For(d) => {
            out.push_str("for (");
            emit_comma_list(&d.init, out);
            out.push(';');
            emit_opt(&d.condition, out);
            out.push(';');
            emit_comma_list(&d.update, out);
            out.push(')');
            emit(&d.body, out);
        }
        Node::Identifier(d) => {
            out.push_str(&d.name);
        }
        Node::If(d) => {
            out.push_str("if (");
            emit(&d.condition, out);
            out.push(')');
            emit(&d.then_branch, out);
            if let Some(e) = &d.else_branch {
                out.push_str(" else ");
                emit(e, out);
            }
        }
        Node::InstanceOf(d) => {
            emit(&d.expr, out);
            out.push_str(" instanceof ");
            emit(&d.checked_type, out);
        }
        Node::Label(d) => {
            out.push_str(&d.name);
            out.push(':');
            emit(&d.statement, out);
        }
        Node::Lambda(d) => {
            if d.params.len() == 1 {
                emit(&d.params[0], out);
            } else {
                out.push('(');
                emit_comma_list(&d.params, out);
                out.push(')');
            }
            out.push_str(" -> ");
            emit(&d.body, out);
        }
        Node::Literal(d) => {
            out.push_str(&crate::literal::format_literal(&d.value));
        }
        Node::MethodInvocation(d) => {
            if let Some(t) = &d.target {
                emit(t, out);
                out.push('.');
            }
            if !d.type_arguments.is_empty() {
                out.push('<');
                emit_comma_list(&d.type_arguments, out);
                out.push('>');
            }
            out.push_str(&d.name);
            out.push('(');
            emit_comma_list(&d.arguments, out);
            out.push(')');
        }
        Node::MultiCatch(d) => {
            out.push_str("catch (");
            if let Some(first) = d.alternatives.first() {
                emit(first, out);
                for t in &d.alternatives[1..] {
                    out.push_str(" | ");
                    emit(t, out);
                }
            }
            out.push(' ');
            out.push_str(&d.param_name);
            out.push(')');
            emit(&d.body, out);
        }
        Node::NewArray(d) => {
            out.push_str("new ");
            emit(&d.element_type, out);
            for dim in &d.dimensions {
                out.push('[');
                emit_opt(dim, out);
                out.push(']');
            }
            if let Some(inits) = &d.initializers {
                out.push('{');
                emit_comma_list(inits, out);
                out.push('}');
            }
        }
        Node::NewClass(d) => {
            if let Some(enclosing) = &d.enclosing {
                emit(enclosing, out);
                out.push('.');
            }
            out.push_str("new ");
            emit(&d.class_type, out);
            out.push('(');
            emit_comma_list(&d.arguments, out);
            out.push(')');
            if let Some(body) = &d.anonymous_body {
                out.push('{');
                emit_list(body, out);
                out.push('}');
            }
        }
        Node::ParameterizedType(d) => {
            emit(&d.raw_type, out);
            out.push('<');
            emit_comma_list(&d.type_arguments, out);
            out.push('>');
        }
        Node::Parentheses(d) => {
            out.push('(');
            emit(&d.inner, out);
            out.push(')');
        }
        Node::PrimitiveType(d) => {
            out.push_str(primitive_keyword_text(d.keyword));
        }
        Node::Return(d) => {
            out.push_str("return");
            if let Some(v) = &d.value {
                out.push(' ');
                emit(v, out);
            }
            out.push(';');
        }
        Node::Switch(d) => {
            out.push_str("switch (");
            emit(&d.selector, out);
            out.push_str(") {");
            emit_list(&d.cases, out);
            out.push('}');
        }
        Node::Synchronized(d) => {
            out.push_str("synchronized (");
            emit(&d.lock, out);
            out.push(')');
            emit(&d.body, out);
        }
        Node::Ternary(d) => {
            emit(&d.condition, out);
            out.push_str(" ? ");
            emit(&d.then_expr, out);
            out.push_str(" : ");
            emit(&d.else_expr, out);
        }
        Node::Throw(d) => {
            out.push_str("throw ");
            emit(&d.expr, out);
            out.push(';');
        }
        Node::Try(d) => {
            out.push_str("try ");
            if !d.resources.is_empty() {
                out.push('(');
                emit_comma_list(&d.resources, out);
                out.push(')');
            }
            emit(&d.body, out);
            emit_list(&d.catches, out);
            if let Some(f) = &d.finally_block {
                out.push_str(" finally ");
                emit(f, out);
            }
        }
        Node::TypeCast(d) => {
            out.push('(');
            emit(&d.target_type, out);
            out.push(')');
            emit(&d.expr, out);
        }
        Node::TypeParameter(d) => {
            out.push_str(&d.name);
            if !d.bounds.is_empty() {
                out.push_str(" extends ");
                for (i, b) in d.bounds.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" & ");
                    }
                    emit(b, out);
                }
            }
        }
        Node::TypeParameters(d) => {
            out.push('<');
            emit_comma_list(&d.params, out);
            out.push('>');
        }
        Node::Unary(d) => {
            let (p, s) = d.op.formatting().prefix_suffix();
            if d.op.is_postfix() {
                emit(&d.operand, out);
                out.push_str(p);
                out.push_str(d.op.token_text());
                out.push_str(s);
            } else {
                out.push_str(p);
                out.push_str(d.op.token_text());
                out.push_str(s);
                emit(&d.operand, out);
            }
        }
        Node::While(d) => {
            out.push_str("while (");
            emit(&d.condition, out);
            out.push(')');
            emit(&d.body, out);
        }
        Node::Wildcard(d) => {
            out.push('?');
            if let Some(b) = &d.bound {
                out.push_str(if d.bound_is_extends {
                    " extends "
                } else {
                    " super "
                });
                emit(b, out);
            }
        }
    }
}

fn emit_comma_list(nodes: &[NodeRef], out: &mut String) {
    for (i, n) in nodes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        emit(n, out);
    }
}

fn modifier_text(m: Modifier) -> &'static str {
    match m {
        Modifier::Public => "public",
        Modifier::Private => "private",
        Modifier::Protected => "protected",
        Modifier::Static => "static",
        Modifier::Final => "final",
        Modifier::Abstract => "abstract",
        Modifier::Synchronized => "synchronized",
        Modifier::Native => "native",
        Modifier::Transient => "transient",
        Modifier::Volatile => "volatile",
        Modifier::Strictfp => "strictfp",
        Modifier::Default => "default",
    }
}

fn class_kind_text(k: ClassKind) -> &'static str {
    match k {
        ClassKind::Class => "class",
        ClassKind::Interface => "interface",
        ClassKind::Enum => "enum",
        ClassKind::Annotation => "@interface",
    }
}

fn primitive_keyword_text(k: PrimitiveKeyword) -> &'static str {
    match k {
        PrimitiveKeyword::Boolean => "boolean",
        PrimitiveKeyword::Byte => "byte",
        PrimitiveKeyword::Char => "char",
        PrimitiveKeyword::Short => "short",
        PrimitiveKeyword::Int => "int",
        PrimitiveKeyword::Long => "long",
        PrimitiveKeyword::Float => "float",
        PrimitiveKeyword::Double => "double",
        PrimitiveKeyword::Void => "void",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeIdGen;
    use pretty_assertions::assert_eq;

    fn ident(gen: &NodeIdGen, name: &str) -> NodeRef {
        std::rc::Rc::new(Node::Identifier(Box::new(IdentifierData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            name: name.into(),
        })))
    }

    #[test]
    fn reified_formatting_round_trips_byte_exact() {
        let gen = NodeIdGen::new();
        let lit = Node::Literal(Box::new(LiteralData {
            meta: NodeMeta::new(gen.next())
                .with_formatting(Formatting::reified("  ", " /* trailing */")),
            value: LiteralValue::Int(7),
        }));
        assert_eq!(print(&lit), "  7 /* trailing */");
    }

    #[test]
    fn infer_formatting_is_reified_on_print_via_reify() {
        let gen = NodeIdGen::new();
        let id = ident(&gen, "x");
        let decl = std::rc::Rc::new(Node::VariableDeclarator(Box::new(VariableDeclaratorData {
            meta: NodeMeta::new(gen.next()),
            name: "y".into(),
            extra_dims: 0,
            initializer: Some(id),
        })));
        let reified = reify(&decl);
        assert!(!reified.formatting().is_infer());
    }

    #[test]
    fn reify_preserves_identity_of_already_reified_subtrees() {
        let gen = NodeIdGen::new();
        let child = ident(&gen, "unchanged");
        let block = std::rc::Rc::new(Node::Block(Box::new(BlockData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            statements: vec![child.clone()],
        })));
        let reified = reify(&block);
        match &*reified {
            Node::Block(d) => assert!(std::rc::Rc::ptr_eq(&d.statements[0], &child)),
            _ => panic!("expected block"),
        }
    }

    #[test]
    fn binary_operator_prints_its_own_formatting() {
        let gen = NodeIdGen::new();
        let left = ident(&gen, "a");
        let right = ident(&gen, "b");
        let bin = Node::Binary(Box::new(BinaryData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            left,
            op: crate::operator::BinaryOp::Add(Formatting::reified(" ", " ")),
            right,
        }));
        assert_eq!(print(&bin), "a + b");
    }

    #[test]
    fn check_print_invariant_passes_when_printed_text_matches_source() {
        let gen = NodeIdGen::new();
        let lit = Node::Literal(Box::new(LiteralData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "")),
            value: LiteralValue::Int(7),
        }));
        assert!(check_print_invariant(&lit, "7").is_ok());
    }

    #[test]
    fn check_print_invariant_reports_a_mismatch() {
        let gen = NodeIdGen::new();
        let lit = Node::Literal(Box::new(LiteralData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified("", "")),
            value: LiteralValue::Int(7),
        }));
        let err = check_print_invariant(&lit, "8").unwrap_err();
        assert!(matches!(err, crate::error::TreeError::PrintInvariantViolation { .. }));
    }

    #[test]
    fn debug_dump_lists_every_descendant_indented_by_depth() {
        let gen = NodeIdGen::new();
        let child = ident(&gen, "x");
        let block = Node::Block(Box::new(BlockData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            statements: vec![child],
        }));
        let dump = debug_dump(&block);
        assert_eq!(dump, "Block\n  Identifier\n");
    }
}
