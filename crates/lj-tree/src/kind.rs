use serde_repr::{Deserialize_repr, Serialize_repr};

/// The closed set of node kinds (§3.1). Kept as a plain discriminant
/// enum separate from [`crate::Node`] so it can be used as a compact,
/// stable serialization tag and for debug dumps, mirroring
/// `nova-syntax`'s own `SyntaxKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum SyntaxKind {
    CompilationUnit = 0,
    Package = 1,
    Import = 2,
    ClassDecl = 3,
    MethodDecl = 4,
    VariableDecls = 5,
    VariableDeclarator = 6,
    Block = 7,
    Annotation = 8,
    ArrayAccess = 9,
    ArrayType = 10,
    Assign = 11,
    CompoundAssign = 12,
    Binary = 13,
    Break = 14,
    Case = 15,
    Catch = 16,
    Continue = 17,
    DoWhile = 18,
    Empty = 19,
    EnumValue = 20,
    FieldAccess = 21,
    ForEach = 22,
    For = 23,
    Identifier = 24,
    If = 25,
    InstanceOf = 26,
    Label = 27,
    Lambda = 28,
    Literal = 29,
    MethodInvocation = 30,
    MultiCatch = 31,
    NewArray = 32,
    NewClass = 33,
    ParameterizedType = 34,
    Parentheses = 35,
    PrimitiveType = 36,
    Return = 37,
    Switch = 38,
    Synchronized = 39,
    Ternary = 40,
    Throw = 41,
    Try = 42,
    TypeCast = 43,
    TypeParameter = 44,
    TypeParameters = 45,
    Unary = 46,
    While = 47,
    Wildcard = 48,
}

impl SyntaxKind {
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::CompilationUnit => "CompilationUnit",
            SyntaxKind::Package => "Package",
            SyntaxKind::Import => "Import",
            SyntaxKind::ClassDecl => "ClassDecl",
            SyntaxKind::MethodDecl => "MethodDecl",
            SyntaxKind::VariableDecls => "VariableDecls",
            SyntaxKind::VariableDeclarator => "VariableDeclarator",
            SyntaxKind::Block => "Block",
            SyntaxKind::Annotation => "Annotation",
            SyntaxKind::ArrayAccess => "ArrayAccess",
            SyntaxKind::ArrayType => "ArrayType",
            SyntaxKind::Assign => "Assign",
            SyntaxKind::CompoundAssign => "CompoundAssign",
            SyntaxKind::Binary => "Binary",
            SyntaxKind::Break => "Break",
            SyntaxKind::Case => "Case",
            SyntaxKind::Catch => "Catch",
            SyntaxKind::Continue => "Continue",
            SyntaxKind::DoWhile => "DoWhile",
            SyntaxKind::Empty => "Empty",
            SyntaxKind::EnumValue => "EnumValue",
            SyntaxKind::FieldAccess => "FieldAccess",
            SyntaxKind::ForEach => "ForEach",
            SyntaxKind::For => "For",
            SyntaxKind::Identifier => "Identifier",
            SyntaxKind::If => "If",
            SyntaxKind::InstanceOf => "InstanceOf",
            SyntaxKind::Label => "Label",
            SyntaxKind::Lambda => "Lambda",
            SyntaxKind::Literal => "Literal",
            SyntaxKind::MethodInvocation => "MethodInvocation",
            SyntaxKind::MultiCatch => "MultiCatch",
            SyntaxKind::NewArray => "NewArray",
            SyntaxKind::NewClass => "NewClass",
            SyntaxKind::ParameterizedType => "ParameterizedType",
            SyntaxKind::Parentheses => "Parentheses",
            SyntaxKind::PrimitiveType => "PrimitiveType",
            SyntaxKind::Return => "Return",
            SyntaxKind::Switch => "Switch",
            SyntaxKind::Synchronized => "Synchronized",
            SyntaxKind::Ternary => "Ternary",
            SyntaxKind::Throw => "Throw",
            SyntaxKind::Try => "Try",
            SyntaxKind::TypeCast => "TypeCast",
            SyntaxKind::TypeParameter => "TypeParameter",
            SyntaxKind::TypeParameters => "TypeParameters",
            SyntaxKind::Unary => "Unary",
            SyntaxKind::While => "While",
            SyntaxKind::Wildcard => "Wildcard",
        }
    }
}
