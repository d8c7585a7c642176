//! The VDL abstract syntax tree.
//!
//! Every node carries a [`Span`] so downstream components (the symbol
//! collector, the validators, the LSP) never need to re-derive
//! positions from raw source text.

use vdl_diagnostic::Span;

#[derive(Debug, Clone)]
pub struct Ast {
    pub includes: Vec<IncludeStmt>,
    pub types: Vec<TypeDecl>,
    pub enums: Vec<EnumDecl>,
    pub consts: Vec<ConstDecl>,
    pub patterns: Vec<PatternDecl>,
    /// Triple-quoted blocks that are not attached to any declaration,
    /// in file-walk order.
    pub standalone_docs: Vec<DocBlock>,
}

impl Ast {
    pub fn empty() -> Self {
        Self {
            includes: Vec::new(),
            types: Vec::new(),
            enums: Vec::new(),
            consts: Vec::new(),
            patterns: Vec::new(),
            standalone_docs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IncludeStmt {
    pub path: String,
    pub span: Span,
}

/// A docstring attached to a declaration, or a standalone doc block.
/// `content` is mutated in place by the resolver when it turns out to
/// be an external `.md` reference.
#[derive(Debug, Clone)]
pub struct DocBlock {
    pub content: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AnnotationUse {
    pub name: String,
    pub name_span: Span,
    pub literal: Option<ConstLiteral>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SpreadRef {
    pub name: String,
    pub name_span: Span,
    /// Present when the source wrote `...Name.Member`, which is always
    /// a semantic error (see `vdl-validate`) but parses fine.
    pub member: Option<String>,
    pub member_span: Option<Span>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub name_span: Span,
    pub fields: Vec<FieldDecl>,
    pub spreads: Vec<SpreadRef>,
    pub docstring: Option<DocBlock>,
    pub annotations: Vec<AnnotationUse>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub name_span: Span,
    pub optional: bool,
    pub ty: FieldType,
    pub docstring: Option<DocBlock>,
    pub annotations: Vec<AnnotationUse>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldType {
    pub kind: FieldTypeKind,
    /// Number of trailing `[]`; applies uniformly to every variant.
    pub array_dims: u32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum FieldTypeKind {
    Primitive(String),
    Custom(String, Span),
    Map(Box<FieldType>),
    Object(InlineObject),
}

#[derive(Debug, Clone)]
pub struct InlineObject {
    pub fields: Vec<FieldDecl>,
    pub spreads: Vec<SpreadRef>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub name_span: Span,
    pub members: Vec<EnumMemberDecl>,
    pub spreads: Vec<SpreadRef>,
    pub docstring: Option<DocBlock>,
    pub annotations: Vec<AnnotationUse>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumMemberDecl {
    pub name: String,
    pub name_span: Span,
    pub value: Option<EnumValueLiteral>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum EnumValueLiteral {
    Str(String, Span),
    Int(i64, Span),
}

#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: String,
    pub name_span: Span,
    pub type_name: Option<String>,
    pub type_span: Option<Span>,
    pub value: ConstLiteral,
    pub docstring: Option<DocBlock>,
    pub annotations: Vec<AnnotationUse>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ConstLiteral {
    Str(String, Span),
    Int(i64, Span),
    Float(f64, Span),
    Bool(bool, Span),
    Object(ObjectLiteral),
    Array(ArrayLiteral),
    Reference(ReferenceLit),
}

impl ConstLiteral {
    pub fn span(&self) -> &Span {
        match self {
            ConstLiteral::Str(_, s)
            | ConstLiteral::Int(_, s)
            | ConstLiteral::Float(_, s)
            | ConstLiteral::Bool(_, s) => s,
            ConstLiteral::Object(o) => &o.span,
            ConstLiteral::Array(a) => &a.span,
            ConstLiteral::Reference(r) => &r.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectLiteral {
    pub entries: Vec<ObjectEntry>,
    pub spreads: Vec<SpreadRef>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectEntry {
    pub key: String,
    pub key_span: Span,
    pub value: ConstLiteral,
}

#[derive(Debug, Clone)]
pub struct ArrayLiteral {
    pub elements: Vec<ConstLiteral>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReferenceLit {
    pub name: String,
    pub member: Option<String>,
    pub member_span: Option<Span>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PatternDecl {
    pub name: String,
    pub name_span: Span,
    pub template: String,
    pub template_span: Span,
    pub docstring: Option<DocBlock>,
    pub annotations: Vec<AnnotationUse>,
    pub span: Span,
}
