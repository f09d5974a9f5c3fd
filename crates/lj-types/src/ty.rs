use serde::{Deserialize, Serialize};

use crate::interner::ClassId;

/// A resolved symbol, per §3.2. Closed sum type: every variant the
/// design names, no more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Class(ClassId),
    Method(MethodId),
    Var(VarId),
    GenericTypeVariable(Box<GenericTypeVariable>),
    Primitive(PrimitiveTag),
    Array(ArrayType),
}

impl Type {
    pub fn array_of(element: Type) -> Type {
        Type::Array(ArrayType {
            element: Box::new(element),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: Box<Type>,
}

/// A class, interface, enum, or annotation type, plus enough shape to
/// compute the subtype relation and member lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassData {
    pub fully_qualified_name: String,
    pub owner: Option<Owner>,
    pub supertype: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub members: Vec<Type>,
}

/// The enclosing scope of a class: either a package or an enclosing
/// class (for nested types).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Package(String),
    Class(ClassId),
}

/// A strongly-typed handle into a [`crate::TypeEnv`]'s method table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodData {
    pub declaring_type: ClassId,
    pub name: String,
    pub generic_signature: Option<String>,
    pub resolved_signature: Option<String>,
    pub param_types: Vec<Type>,
    pub return_type: Type,
}

/// A strongly-typed handle into a [`crate::TypeEnv`]'s variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarData {
    pub name: String,
    pub owner: Option<ClassId>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericTypeVariable {
    pub name: String,
    pub bounds: Vec<Type>,
}

/// Tags for primitive and other "not a class" resolved kinds.
///
/// `String` here is the *literal token tag* only — see the Open
/// Question decision recorded in `DESIGN.md` and `SPEC_FULL.md`: the
/// resolved `Type` of a string-literal expression is always
/// `Type::Class("java.lang.String")`, never `Type::Primitive(PrimitiveTag::String)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveTag {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
    String,
    Wildcard,
    Null,
    None,
}
