use lj_tree::NodeRef;
use lj_types::Type;

/// Whether `ty` appears anywhere as a resolved type in `root` (§4.F
/// "HasType"). Used as a guard before running an expensive rewrite: no
/// point constructing a `ChangeType` pass over a tree that never
/// references the type to begin with.
pub fn has_type(root: &NodeRef, ty: &Type) -> bool {
    lj_tree::search::has_type(root, ty)
}
