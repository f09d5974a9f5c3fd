use lj_tree::{print, Formatting, IdentifierData, Node, NodeIdGen, NodeMeta};
use proptest::prelude::*;

fn whitespace_fragment() -> impl Strategy<Value = String> {
    "[ \n\t]{0,4}"
}

fn identifier_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
}

proptest! {
    /// A node with fully reified formatting prints back exactly
    /// `prefix + token + suffix`: printing never drops or duplicates
    /// the captured trivia.
    #[test]
    fn reified_identifier_round_trips_byte_exact(
        prefix in whitespace_fragment(),
        suffix in whitespace_fragment(),
        name in identifier_name(),
    ) {
        let gen = NodeIdGen::new();
        let node = Node::Identifier(Box::new(IdentifierData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified(prefix.clone(), suffix.clone())),
            name: name.clone().into(),
        }));
        let printed = print::print(&node);
        prop_assert_eq!(printed, format!("{prefix}{name}{suffix}"));
    }

    /// Reifying an already-fully-reified tree is a no-op on its printed
    /// form: `reify` never changes what a tree prints to, only whether
    /// its `Infer` markers have been resolved.
    #[test]
    fn reify_does_not_change_printed_output_of_a_reified_tree(
        prefix in whitespace_fragment(),
        suffix in whitespace_fragment(),
        name in identifier_name(),
    ) {
        let gen = NodeIdGen::new();
        let node = std::rc::Rc::new(Node::Identifier(Box::new(IdentifierData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::reified(prefix, suffix)),
            name: name.into(),
        })));
        let before = print::print(&node);
        let reified = print::reify(&node);
        let after = print::print(&reified);
        prop_assert_eq!(before, after);
    }

    /// An `Infer`-formatted node always reifies to something printable
    /// without panicking, regardless of its name.
    #[test]
    fn inferred_formatting_always_reifies_without_panicking(name in identifier_name()) {
        let gen = NodeIdGen::new();
        let node = std::rc::Rc::new(Node::Identifier(Box::new(IdentifierData {
            meta: NodeMeta::new(gen.next()),
            name: name.into(),
        })));
        let reified = print::reify(&node);
        prop_assert!(!reified.formatting().is_infer());
        let _ = print::print(&reified);
    }
}
