use std::rc::Rc;

use lj_types::Type;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::formatting::Formatting;
use crate::id::NodeId;
use crate::kind::SyntaxKind;
use crate::operator::{AssignOp, BinaryOp, UnaryOp};

/// A child node reference. `Rc` gives the tree value semantics for
/// equality/printing while letting unchanged subtrees be shared by
/// identity across transformations (§3.1 Lifecycle), which is exactly
/// what a refactor that only touches one statement in a 500-line method
/// wants: the other 499 lines are the *same allocation*, not a deep
/// copy.
pub type NodeRef = Rc<Node>;

/// Fields every node carries regardless of kind (§3.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    pub id: NodeId,
    pub formatting: Formatting,
    /// Resolved type, where the node's syntactic role carries one.
    /// Not re-derived on deserialize: a tree round-tripped through
    /// serde keeps whatever type was resolved before serialization,
    /// since re-resolution requires a classpath the tree itself does
    /// not carry (§6 "Tree serialization").
    pub ty: Option<Type>,
}

impl NodeMeta {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            formatting: Formatting::Infer,
            ty: None,
        }
    }

    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }
}

/// Java modifiers: a set, since any combination of these may appear on
/// a declaration (duplicates are a parser-level concern, not this
/// model's).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnitData {
    pub meta: NodeMeta,
    pub package: Option<NodeRef>,
    pub imports: Vec<NodeRef>,
    pub types: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageData {
    pub meta: NodeMeta,
    pub annotations: Vec<NodeRef>,
    pub qualified_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportData {
    pub meta: NodeMeta,
    pub is_static: bool,
    /// `true` when the import ends in `.*` (on-demand/star import).
    pub is_star: bool,
    pub qualified_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDeclData {
    pub meta: NodeMeta,
    pub annotations: Vec<NodeRef>,
    pub modifiers: Vec<Modifier>,
    pub kind: ClassKind,
    pub name: SmolStr,
    pub type_parameters: Option<NodeRef>,
    pub extends: Vec<NodeRef>,
    pub implements: Vec<NodeRef>,
    pub members: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclData {
    pub meta: NodeMeta,
    pub annotations: Vec<NodeRef>,
    pub modifiers: Vec<Modifier>,
    pub type_parameters: Option<NodeRef>,
    pub return_type: Option<NodeRef>,
    pub name: SmolStr,
    pub params: Vec<NodeRef>,
    pub throws: Vec<NodeRef>,
    pub body: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclsData {
    pub meta: NodeMeta,
    pub annotations: Vec<NodeRef>,
    pub modifiers: Vec<Modifier>,
    pub declared_type: NodeRef,
    pub declarators: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaratorData {
    pub meta: NodeMeta,
    pub name: SmolStr,
    pub extra_dims: u32,
    pub initializer: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    pub meta: NodeMeta,
    pub statements: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationData {
    pub meta: NodeMeta,
    pub type_name: NodeRef,
    pub arguments: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayAccessData {
    pub meta: NodeMeta,
    pub array: NodeRef,
    pub index: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayTypeData {
    pub meta: NodeMeta,
    pub element_type: NodeRef,
    pub dims: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignData {
    pub meta: NodeMeta,
    pub target: NodeRef,
    pub value: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundAssignData {
    pub meta: NodeMeta,
    pub target: NodeRef,
    pub op: AssignOp,
    pub value: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryData {
    pub meta: NodeMeta,
    pub left: NodeRef,
    pub op: BinaryOp,
    pub right: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakData {
    pub meta: NodeMeta,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseData {
    pub meta: NodeMeta,
    pub labels: Vec<NodeRef>,
    pub statements: Vec<NodeRef>,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchData {
    pub meta: NodeMeta,
    pub exception_types: Vec<NodeRef>,
    pub param_name: SmolStr,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueData {
    pub meta: NodeMeta,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileData {
    pub meta: NodeMeta,
    pub body: NodeRef,
    pub condition: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyData {
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueData {
    pub meta: NodeMeta,
    pub annotations: Vec<NodeRef>,
    pub name: SmolStr,
    pub arguments: Vec<NodeRef>,
    pub body: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAccessData {
    pub meta: NodeMeta,
    pub target: NodeRef,
    pub name: SmolStr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachData {
    pub meta: NodeMeta,
    pub variable: NodeRef,
    pub iterable: NodeRef,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForData {
    pub meta: NodeMeta,
    pub init: Vec<NodeRef>,
    pub condition: Option<NodeRef>,
    pub update: Vec<NodeRef>,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierData {
    pub meta: NodeMeta,
    pub name: SmolStr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfData {
    pub meta: NodeMeta,
    pub condition: NodeRef,
    pub then_branch: NodeRef,
    pub else_branch: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceOfData {
    pub meta: NodeMeta,
    pub expr: NodeRef,
    pub checked_type: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelData {
    pub meta: NodeMeta,
    pub name: SmolStr,
    pub statement: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaData {
    pub meta: NodeMeta,
    pub params: Vec<NodeRef>,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Char(char),
    String(String),
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralData {
    pub meta: NodeMeta,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodInvocationData {
    pub meta: NodeMeta,
    pub target: Option<NodeRef>,
    pub type_arguments: Vec<NodeRef>,
    pub name: SmolStr,
    pub arguments: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiCatchData {
    pub meta: NodeMeta,
    pub alternatives: Vec<NodeRef>,
    pub param_name: SmolStr,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArrayData {
    pub meta: NodeMeta,
    pub element_type: NodeRef,
    pub dimensions: Vec<Option<NodeRef>>,
    pub initializers: Option<Vec<NodeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClassData {
    pub meta: NodeMeta,
    pub enclosing: Option<NodeRef>,
    pub class_type: NodeRef,
    pub arguments: Vec<NodeRef>,
    pub anonymous_body: Option<Vec<NodeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterizedTypeData {
    pub meta: NodeMeta,
    pub raw_type: NodeRef,
    pub type_arguments: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesesData {
    pub meta: NodeMeta,
    pub inner: NodeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKeyword {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveTypeData {
    pub meta: NodeMeta,
    pub keyword: PrimitiveKeyword,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnData {
    pub meta: NodeMeta,
    pub value: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchData {
    pub meta: NodeMeta,
    pub selector: NodeRef,
    pub cases: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynchronizedData {
    pub meta: NodeMeta,
    pub lock: NodeRef,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryData {
    pub meta: NodeMeta,
    pub condition: NodeRef,
    pub then_expr: NodeRef,
    pub else_expr: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowData {
    pub meta: NodeMeta,
    pub expr: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryData {
    pub meta: NodeMeta,
    pub resources: Vec<NodeRef>,
    pub body: NodeRef,
    pub catches: Vec<NodeRef>,
    pub finally_block: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCastData {
    pub meta: NodeMeta,
    pub target_type: NodeRef,
    pub expr: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameterData {
    pub meta: NodeMeta,
    pub name: SmolStr,
    pub bounds: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParametersData {
    pub meta: NodeMeta,
    pub params: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryData {
    pub meta: NodeMeta,
    pub op: UnaryOp,
    pub operand: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileData {
    pub meta: NodeMeta,
    pub condition: NodeRef,
    pub body: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildcardData {
    pub meta: NodeMeta,
    pub bound: Option<NodeRef>,
    pub bound_is_extends: bool,
}

/// The closed set of ~45 node kinds from §3.1, as a single tagged
/// variant per kind (§9 design note "Deep sealed hierarchy").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    CompilationUnit(Box<CompilationUnitData>),
    Package(Box<PackageData>),
    Import(Box<ImportData>),
    ClassDecl(Box<ClassDeclData>),
    MethodDecl(Box<MethodDeclData>),
    VariableDecls(Box<VariableDeclsData>),
    VariableDeclarator(Box<VariableDeclaratorData>),
    Block(Box<BlockData>),
    Annotation(Box<AnnotationData>),
    ArrayAccess(Box<ArrayAccessData>),
    ArrayType(Box<ArrayTypeData>),
    Assign(Box<AssignData>),
    CompoundAssign(Box<CompoundAssignData>),
    Binary(Box<BinaryData>),
    Break(Box<BreakData>),
    Case(Box<CaseData>),
    Catch(Box<CatchData>),
    Continue(Box<ContinueData>),
    DoWhile(Box<DoWhileData>),
    Empty(Box<EmptyData>),
    EnumValue(Box<EnumValueData>),
    FieldAccess(Box<FieldAccessData>),
    ForEach(Box<ForEachData>),
    For(Box<ForData>),
    Identifier(Box<IdentifierData>),
    If(Box<IfData>),
    InstanceOf(Box<InstanceOfData>),
    Label(Box<LabelData>),
    Lambda(Box<LambdaData>),
    Literal(Box<LiteralData>),
    MethodInvocation(Box<MethodInvocationData>),
    MultiCatch(Box<MultiCatchData>),
    NewArray(Box<NewArrayData>),
    NewClass(Box<NewClassData>),
    ParameterizedType(Box<ParameterizedTypeData>),
    Parentheses(Box<ParenthesesData>),
    PrimitiveType(Box<PrimitiveTypeData>),
    Return(Box<ReturnData>),
    Switch(Box<SwitchData>),
    Synchronized(Box<SynchronizedData>),
    Ternary(Box<TernaryData>),
    Throw(Box<ThrowData>),
    Try(Box<TryData>),
    TypeCast(Box<TypeCastData>),
    TypeParameter(Box<TypeParameterData>),
    TypeParameters(Box<TypeParametersData>),
    Unary(Box<UnaryData>),
    While(Box<WhileData>),
    Wildcard(Box<WildcardData>),
}

macro_rules! meta_accessors {
    ($($variant:ident),+ $(,)?) => {
        impl Node {
            pub fn meta(&self) -> &NodeMeta {
                match self {
                    $(Node::$variant(d) => &d.meta),+
                }
            }

            pub fn meta_mut(&mut self) -> &mut NodeMeta {
                match self {
                    $(Node::$variant(d) => &mut d.meta),+
                }
            }

            pub fn kind(&self) -> SyntaxKind {
                match self {
                    $(Node::$variant(_) => SyntaxKind::$variant),+
                }
            }
        }
    };
}

meta_accessors!(
    CompilationUnit, Package, Import, ClassDecl, MethodDecl, VariableDecls, VariableDeclarator,
    Block, Annotation, ArrayAccess, ArrayType, Assign, CompoundAssign, Binary, Break, Case, Catch,
    Continue, DoWhile, Empty, EnumValue, FieldAccess, ForEach, For, Identifier, If, InstanceOf,
    Label, Lambda, Literal, MethodInvocation, MultiCatch, NewArray, NewClass, ParameterizedType,
    Parentheses, PrimitiveType, Return, Switch, Synchronized, Ternary, Throw, Try, TypeCast,
    TypeParameter, TypeParameters, Unary, While, Wildcard,
);

impl Node {
    pub fn id(&self) -> NodeId {
        self.meta().id
    }

    pub fn formatting(&self) -> &Formatting {
        &self.meta().formatting
    }

    pub fn ty(&self) -> Option<&Type> {
        self.meta().ty.as_ref()
    }

    /// Direct child nodes, in source order. Used by generic scans
    /// (`has_type`, `has_import`, the printer) that don't need
    /// kind-specific behavior.
    pub fn children(&self) -> Vec<NodeRef> {
        match self {
            Node::CompilationUnit(d) => chain(&d.package, &d.imports, &d.types),
            Node::Package(d) => d.annotations.clone(),
            Node::Import(_) => vec![],
            Node::ClassDecl(d) => chain_many(&[
                &d.annotations,
                &opt_vec(&d.type_parameters),
                &d.extends,
                &d.implements,
                &d.members,
            ]),
            Node::MethodDecl(d) => chain_many(&[
                &d.annotations,
                &opt_vec(&d.type_parameters),
                &opt_vec(&d.return_type),
                &d.params,
                &d.throws,
                &opt_vec(&d.body),
            ]),
            Node::VariableDecls(d) => chain_many(&[
                &d.annotations,
                &vec![d.declared_type.clone()],
                &d.declarators,
            ]),
            Node::VariableDeclarator(d) => opt_vec(&d.initializer),
            Node::Block(d) => d.statements.clone(),
            Node::Annotation(d) => {
                let mut v = vec![d.type_name.clone()];
                v.extend(d.arguments.iter().cloned());
                v
            }
            Node::ArrayAccess(d) => vec![d.array.clone(), d.index.clone()],
            Node::ArrayType(d) => vec![d.element_type.clone()],
            Node::Assign(d) => vec![d.target.clone(), d.value.clone()],
            Node::CompoundAssign(d) => vec![d.target.clone(), d.value.clone()],
            Node::Binary(d) => vec![d.left.clone(), d.right.clone()],
            Node::Break(_) => vec![],
            Node::Case(d) => chain_many(&[&d.labels, &d.statements]),
            Node::Catch(d) => {
                let mut v = d.exception_types.clone();
                v.push(d.body.clone());
                v
            }
            Node::Continue(_) => vec![],
            Node::DoWhile(d) => vec![d.body.clone(), d.condition.clone()],
            Node::Empty(_) => vec![],
            Node::EnumValue(d) => chain_many(&[&d.annotations, &d.arguments, &opt_vec(&d.body)]),
            Node::FieldAccess(d) => vec![d.target.clone()],
            Node::ForEach(d) => vec![d.variable.clone(), d.iterable.clone(), d.body.clone()],
            Node::For(d) => chain_many(&[
                &d.init,
                &opt_vec(&d.condition),
                &d.update,
                &vec![d.body.clone()],
            ]),
            Node::Identifier(_) => vec![],
            Node::If(d) => {
                let mut v = vec![d.condition.clone(), d.then_branch.clone()];
                if let Some(e) = &d.else_branch {
                    v.push(e.clone());
                }
                v
            }
            Node::InstanceOf(d) => vec![d.expr.clone(), d.checked_type.clone()],
            Node::Label(d) => vec![d.statement.clone()],
            Node::Lambda(d) => {
                let mut v = d.params.clone();
                v.push(d.body.clone());
                v
            }
            Node::Literal(_) => vec![],
            Node::MethodInvocation(d) => chain_many(&[
                &opt_vec(&d.target),
                &d.type_arguments,
                &d.arguments,
            ]),
            Node::MultiCatch(d) => {
                let mut v = d.alternatives.clone();
                v.push(d.body.clone());
                v
            }
            Node::NewArray(d) => {
                let mut v = vec![d.element_type.clone()];
                v.extend(d.dimensions.iter().flatten().cloned());
                if let Some(inits) = &d.initializers {
                    v.extend(inits.iter().cloned());
                }
                v
            }
            Node::NewClass(d) => chain_many(&[
                &opt_vec(&d.enclosing),
                &vec![d.class_type.clone()],
                &d.arguments,
                &d.anonymous_body.clone().unwrap_or_default(),
            ]),
            Node::ParameterizedType(d) => {
                let mut v = vec![d.raw_type.clone()];
                v.extend(d.type_arguments.iter().cloned());
                v
            }
            Node::Parentheses(d) => vec![d.inner.clone()],
            Node::PrimitiveType(_) => vec![],
            Node::Return(d) => opt_vec(&d.value),
            Node::Switch(d) => {
                let mut v = vec![d.selector.clone()];
                v.extend(d.cases.iter().cloned());
                v
            }
            Node::Synchronized(d) => vec![d.lock.clone(), d.body.clone()],
            Node::Ternary(d) => vec![d.condition.clone(), d.then_expr.clone(), d.else_expr.clone()],
            Node::Throw(d) => vec![d.expr.clone()],
            Node::Try(d) => chain_many(&[
                &d.resources,
                &vec![d.body.clone()],
                &d.catches,
                &opt_vec(&d.finally_block),
            ]),
            Node::TypeCast(d) => vec![d.target_type.clone(), d.expr.clone()],
            Node::TypeParameter(d) => d.bounds.clone(),
            Node::TypeParameters(d) => d.params.clone(),
            Node::Unary(d) => vec![d.operand.clone()],
            Node::While(d) => vec![d.condition.clone(), d.body.clone()],
            Node::Wildcard(d) => opt_vec(&d.bound),
        }
    }
}

fn opt_vec(o: &Option<NodeRef>) -> Vec<NodeRef> {
    o.iter().cloned().collect()
}

fn chain(first: &Option<NodeRef>, mid: &[NodeRef], last: &[NodeRef]) -> Vec<NodeRef> {
    let mut v = opt_vec(first);
    v.extend(mid.iter().cloned());
    v.extend(last.iter().cloned());
    v
}

fn chain_many(groups: &[&Vec<NodeRef>]) -> Vec<NodeRef> {
    let mut v = Vec::new();
    for g in groups {
        v.extend((*g).iter().cloned());
    }
    v
}
