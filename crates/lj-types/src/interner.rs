use std::sync::OnceLock;

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A globally-interned handle to a class's fully-qualified name.
///
/// Two calls to [`intern_class`] with the same string always return an
/// equal `ClassId` (§4.A: "two invocations with identical strings yield
/// equal instances"), and the interner backing this is a process-wide,
/// thread-safe concurrent map (§5), so `ClassId`s may be freely shared
/// and compared across threads without synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Spur);

impl ClassId {
    /// The class's fully-qualified name, resolved back out of the
    /// interner. O(1): `lasso` stores the backing string contiguously.
    pub fn fully_qualified_name(self) -> &'static str {
        interner().resolve(&self.0)
    }
}

impl Serialize for ClassId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.fully_qualified_name())
    }
}

impl<'de> Deserialize<'de> for ClassId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fqn = String::deserialize(deserializer)?;
        intern_class(&fqn).map_err(serde::de::Error::custom)
    }
}

fn interner() -> &'static ThreadedRodeo {
    static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();
    INTERNER.get_or_init(ThreadedRodeo::new)
}

/// Interns a class's fully-qualified name, equivalent to the design's
/// `Class.build(fqn)`.
pub fn intern_class(fqn: &str) -> Result<ClassId, TypeError> {
    if fqn.is_empty() {
        return Err(TypeError::EmptyClassName);
    }
    if fqn.split('.').any(str::is_empty) {
        return Err(TypeError::EmptySegment(fqn.to_string()));
    }
    Ok(ClassId(interner().get_or_intern(fqn)))
}
