use std::rc::Rc;

use crate::cursor::Cursor;
use crate::visitor::Visitor;
use lj_tree::{LiteralValue, Node, NodeRef};

/// Applies a pure value transform to every literal it sees (§4.F
/// "ChangeLiteral(scope, transform) ... for every literal within the
/// scope"). The scope itself isn't this visitor's concern — pair it
/// with [`crate::RefactorTransaction::scoped`] to bound it to a single
/// expression anchor, the way any other scoped rewrite is built.
/// Recomputing a literal's printed form (suffix reattachment, escaping)
/// is `lj-tree`'s job; this only ever touches the resolved value.
pub struct ChangeLiteral<F> {
    transform: F,
    hits: usize,
}

impl<F> ChangeLiteral<F>
where
    F: Fn(&LiteralValue) -> LiteralValue,
{
    pub fn new(transform: F) -> Self {
        Self { transform, hits: 0 }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl<F> Visitor for ChangeLiteral<F>
where
    F: Fn(&LiteralValue) -> LiteralValue,
{
    fn literal(&mut self, node: &NodeRef, _cursor: &Cursor) -> Option<NodeRef> {
        let Node::Literal(d) = &**node else {
            return None;
        };
        let new_value = (self.transform)(&d.value);
        if new_value == d.value {
            return None;
        }
        self.hits += 1;
        let mut new_data = (**d).clone();
        new_data.value = new_value;
        Some(Rc::new(Node::Literal(Box::new(new_data))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::walk;
    use lj_tree::{BinaryData, BinaryOp, Formatting, LiteralData, NodeIdGen, NodeMeta};

    fn int(gen: &NodeIdGen, value: i32, prefix: &str, suffix: &str) -> NodeRef {
        Rc::new(Node::Literal(Box::new(LiteralData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified(prefix, suffix)),
            value: LiteralValue::Int(value),
        })))
    }

    #[test]
    fn swaps_the_value_and_keeps_formatting() {
        let gen = NodeIdGen::new();
        let node = int(&gen, 1, "  ", " // was 1");

        let mut visitor = ChangeLiteral::new(|v: &LiteralValue| match v {
            LiteralValue::Int(_) => LiteralValue::Int(2),
            other => other.clone(),
        });
        let mut cursor = Cursor::new();
        let result = walk(&mut visitor, &mut cursor, &node);

        assert_eq!(visitor.hits(), 1);
        assert_eq!(lj_tree::print::print(&result), "  2 // was 1");
    }

    /// Every literal within the scope is transformed, including ones
    /// reached only through string concatenation (nested `Binary`
    /// nodes), not just a single targeted occurrence.
    #[test]
    fn transforms_every_literal_reachable_through_concatenation() {
        let gen = NodeIdGen::new();
        let left = int(&gen, 3, "", "");
        let right = int(&gen, 4, "", "");
        let sum: NodeRef = Rc::new(Node::Binary(Box::new(BinaryData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            left,
            op: BinaryOp::Add(Formatting::reified(" ", " ")),
            right,
        })));

        let mut visitor = ChangeLiteral::new(|v: &LiteralValue| match v {
            LiteralValue::Int(n) => LiteralValue::Int(n * 10),
            other => other.clone(),
        });
        let mut cursor = Cursor::new();
        let result = walk(&mut visitor, &mut cursor, &sum);

        assert_eq!(visitor.hits(), 2);
        assert_eq!(lj_tree::print::print(&result), "30 + 40");
    }

    #[test]
    fn leaves_literals_the_transform_maps_to_themselves_unchanged() {
        let gen = NodeIdGen::new();
        let node = int(&gen, 5, "", "");

        let mut visitor = ChangeLiteral::new(|v: &LiteralValue| v.clone());
        let mut cursor = Cursor::new();
        let result = walk(&mut visitor, &mut cursor, &node);

        assert_eq!(visitor.hits(), 0);
        assert!(Rc::ptr_eq(&result, &node));
    }
}
