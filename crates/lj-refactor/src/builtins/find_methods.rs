use lj_tree::NodeRef;
use lj_types::{Type, TypeEnv};

use crate::matcher::MethodPattern;

/// All method-invocation nodes in `root` whose resolved method matches
/// `pattern` (§4.F "FindMethods"). A read-only query: callers typically
/// pipe the result into a scoped mutating visitor rather than rewrite
/// directly here.
pub fn find_methods(root: &NodeRef, env: &TypeEnv, pattern: &MethodPattern) -> Vec<NodeRef> {
    lj_tree::search::find_all(root, &|n| match n.ty() {
        Some(Type::Method(mid)) => env
            .method(*mid)
            .is_some_and(|m| pattern.matches(env, m)),
        _ => false,
    })
}
