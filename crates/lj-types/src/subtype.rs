use crate::ty::Type;
use crate::{ClassId, TypeEnv};

/// `isAssignableFrom(super, sub)` per §3.2/§4.A: is `sub <: super`?
///
/// Reflexive; transitive through `supertype`; transitive through each
/// interface; arrays are covariant in element type.
pub fn is_assignable_from(env: &TypeEnv, super_: &Type, sub: &Type) -> bool {
    match (super_, sub) {
        (Type::Array(a), Type::Array(b)) => is_assignable_from(env, &a.element, &b.element),
        (Type::Class(super_id), Type::Class(sub_id)) => {
            class_is_subtype(env, *super_id, *sub_id)
        }
        _ => super_ == sub,
    }
}

fn class_is_subtype(env: &TypeEnv, super_id: ClassId, sub_id: ClassId) -> bool {
    if super_id == sub_id {
        return true;
    }
    let mut stack = vec![sub_id];
    let mut visited = std::collections::HashSet::new();
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(data) = env.class(id) else {
            continue;
        };
        if let Some(supertype) = data.supertype {
            if supertype == super_id {
                return true;
            }
            stack.push(supertype);
        }
        for &iface in &data.interfaces {
            if iface == super_id {
                return true;
            }
            stack.push(iface);
        }
    }
    false
}
