//! Resolved symbol descriptors for the lossless Java refactor engine.
//!
//! This crate is intentionally small: it defines the closed `Type` sum
//! type (§3.2/§4.A of the design) and the subtype relation the rest of
//! the engine needs, plus the global `Class` interner.

mod error;
mod interner;
mod subtype;
mod ty;

pub use error::TypeError;
pub use interner::{intern_class, ClassId};
pub use subtype::is_assignable_from;
pub use ty::{
    ArrayType, ClassData, GenericTypeVariable, MethodData, MethodId, Owner, PrimitiveTag, Type,
    VarData, VarId,
};

/// Global registry of resolved symbols (classes, methods, vars).
///
/// A transaction or test fixture owns one `TypeEnv`; `ClassId`s minted by
/// [`intern_class`] are globally stable (interning is process-wide, per
/// §5's "thread-safe ... stable-identity semantics"), but method/var
/// descriptors and class member lists are local to an environment so
/// that two unrelated test fixtures don't leak state into each other.
#[derive(Debug, Default)]
pub struct TypeEnv {
    classes: std::collections::HashMap<ClassId, ClassData>,
    methods: Vec<MethodData>,
    vars: Vec<VarData>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `fqn` and returns its `ClassId`, registering a placeholder
    /// `ClassData` (no supertype, no interfaces, no members) if this
    /// environment has not seen the class before. Mirrors
    /// `nova-types`'s `TypeStore::intern_class_id` /
    /// `TypeStore::define_class` split: interning never fails, defining
    /// details is a separate step.
    pub fn build(&mut self, fqn: &str) -> Result<ClassId, TypeError> {
        let id = intern_class(fqn)?;
        self.classes.entry(id).or_insert_with(|| ClassData {
            fully_qualified_name: fqn.to_string(),
            owner: None,
            supertype: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        });
        Ok(id)
    }

    /// Records (or overwrites) the full definition of an already-interned
    /// class.
    pub fn define_class(&mut self, id: ClassId, data: ClassData) {
        self.classes.insert(id, data);
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassData> {
        self.classes.get(&id)
    }

    pub fn add_method(&mut self, data: MethodData) -> MethodId {
        self.methods.push(data);
        MethodId(self.methods.len() - 1)
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodData> {
        self.methods.get(id.0)
    }

    pub fn add_var(&mut self, data: VarData) -> VarId {
        self.vars.push(data);
        VarId(self.vars.len() - 1)
    }

    pub fn var(&self, id: VarId) -> Option<&VarData> {
        self.vars.get(id.0)
    }

    /// Safe narrowing: returns the backing [`ClassData`] if `ty` is a
    /// `Type::Class` known to this environment.
    pub fn as_class(&self, ty: &Type) -> Option<&ClassData> {
        match ty {
            Type::Class(id) => self.classes.get(id),
            _ => None,
        }
    }

    /// Safe narrowing: returns the package name if `ty`'s owner (or `ty`
    /// itself, for a bare package reference) names a package rather than
    /// an enclosing class.
    pub fn as_package(&self, ty: &Type) -> Option<&str> {
        match ty {
            Type::Class(id) => match self.classes.get(id)?.owner.as_ref()? {
                Owner::Package(name) => Some(name.as_str()),
                Owner::Class(_) => None,
            },
            _ => None,
        }
    }
}
