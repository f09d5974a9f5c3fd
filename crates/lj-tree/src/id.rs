use std::sync::atomic::{AtomicU64, Ordering};

/// A stable node identity independent of structural equality (§9 design
/// note "Node identity"). Scoped refactors anchor to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// A placeholder id for nodes constructed outside of a parse (fresh
    /// nodes built by a refactor, before they are assigned a real id by
    /// [`NodeIdGen`]).
    pub const DUMMY: NodeId = NodeId(0);

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Assigns monotonically increasing [`NodeId`]s, one generator per parse.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: AtomicU64,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> NodeId {
        NodeId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_distinct() {
        let gen = NodeIdGen::new();
        let a = gen.next();
        let b = gen.next();
        assert_ne!(a, b);
        assert!(a.as_u64() < b.as_u64());
    }
}
