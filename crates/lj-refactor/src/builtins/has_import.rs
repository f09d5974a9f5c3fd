use lj_tree::NodeRef;

/// Whether `root` already imports `qualified_name`, either directly or
/// via a covering star import (§4.F "HasImport"). `AddImport` uses the
/// same logic internally; this is the standalone query form for
/// callers that only need the boolean.
pub fn has_import(root: &NodeRef, qualified_name: &str) -> bool {
    lj_tree::search::has_import(root, qualified_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lj_tree::{Formatting, ImportData, Node, NodeIdGen, NodeMeta};
    use std::rc::Rc;

    #[test]
    fn reports_exact_and_star_imports() {
        let gen = NodeIdGen::new();
        let root: NodeRef = Rc::new(Node::Import(Box::new(ImportData {
            meta: NodeMeta::new(gen.next()).with_formatting(Formatting::None),
            is_static: false,
            is_star: true,
            qualified_name: "java.util".into(),
        })));
        assert!(has_import(&root, "java.util.List"));
        assert!(!has_import(&root, "java.io.File"));
    }
}
