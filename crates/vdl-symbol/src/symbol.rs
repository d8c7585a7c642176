//! Symbol records.
//!
//! Resolved links (`FieldTypeInfo::Custom::resolved_type` /
//! `resolved_enum`) are modeled as the target symbol's *name* rather
//! than an owning pointer or `Rc`: a lookup by name in the owning
//! [`crate::table::SymbolTable`] always resolves to the same canonical
//! record. This keeps the graph of references acyclic at the Rust
//! ownership level even though the schema it describes may not be.

use std::path::PathBuf;
use vdl_diagnostic::Span;

/// One distinct annotation name applied to a symbol, collapsing
/// repeated uses of the same name into a single record with every
/// occurrence's position recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub literal: Option<AnnotationLiteral>,
    pub positions: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationLiteral {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Fields common to every symbol kind.
#[derive(Debug, Clone)]
pub struct SymbolCommon {
    pub name: String,
    pub declaring_file: PathBuf,
    pub start: vdl_diagnostic::Position,
    pub end: vdl_diagnostic::Position,
    pub resolved_docstring: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl SymbolCommon {
    pub fn span(&self) -> Span {
        Span::new(self.start.clone(), self.end.clone())
    }
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub common: SymbolCommon,
    pub fields: Vec<FieldSymbol>,
    pub spreads: Vec<SpreadRef>,
    /// The declaration this symbol was built from, kept for structural
    /// traversal (cycle detection needs to walk inline objects again).
    pub ast: vdl_syntax::ast::TypeDecl,
}

#[derive(Debug, Clone)]
pub struct FieldSymbol {
    pub common: SymbolCommon,
    pub optional: bool,
    pub field_type: FieldTypeInfo,
}

#[derive(Debug, Clone)]
pub struct FieldTypeInfo {
    pub kind: FieldTypeKind,
    pub array_dimensions: u32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum FieldTypeKind {
    Primitive(PrimitiveKind),
    Custom {
        name: String,
        name_span: Span,
        resolved_type: Option<String>,
        resolved_enum: Option<String>,
    },
    Map(Box<FieldTypeInfo>),
    Object(InlineObject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Int,
    Float,
    Bool,
    Datetime,
}

impl PrimitiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "datetime" => Some(Self::Datetime),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
        }
    }

    pub const ALL: [&'static str; 5] = ["string", "int", "float", "bool", "datetime"];
}

#[derive(Debug, Clone)]
pub struct InlineObject {
    pub fields: Vec<FieldSymbol>,
    pub spreads: Vec<SpreadRef>,
}

#[derive(Debug, Clone)]
pub struct SpreadRef {
    pub name: String,
    pub name_span: Span,
    pub member: Option<String>,
    pub member_span: Option<Span>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumSymbol {
    pub common: SymbolCommon,
    pub members: Vec<EnumMemberSymbol>,
    pub spreads: Vec<SpreadRef>,
    /// Set by the enum validator after spread expansion.
    pub value_type: Option<EnumValueType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValueType {
    String,
    Int,
}

#[derive(Debug, Clone)]
pub struct EnumMemberSymbol {
    pub name: String,
    pub name_span: Span,
    pub value: String,
    pub has_explicit_value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstValueType {
    String,
    Int,
    Float,
    Bool,
    Object,
    Array,
    Reference,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ConstSymbol {
    pub common: SymbolCommon,
    pub type_name: Option<String>,
    pub type_span: Option<Span>,
    pub value_type: ConstValueType,
    /// Scalar string form; empty for Object/Array/Reference/Unknown.
    pub value: String,
    pub literal: vdl_syntax::ast::ConstLiteral,
}

#[derive(Debug, Clone)]
pub struct PatternSymbol {
    pub common: SymbolCommon,
    pub template: String,
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DocSymbol {
    pub content: String,
    pub start: vdl_diagnostic::Position,
    pub end: vdl_diagnostic::Position,
    pub file: PathBuf,
}

/// Extract `{identifier}` placeholders from a pattern template, in
/// order of appearance; a name may repeat.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut out = Vec::new();
    let chars: Vec<char> = template.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '{' {
            let mut j = i + 1;
            let mut name = String::new();
            let mut valid = j < chars.len() && (chars[j].is_ascii_alphabetic() || chars[j] == '_');
            while valid && j < chars.len() && chars[j] != '}' {
                if chars[j].is_ascii_alphanumeric() || chars[j] == '_' {
                    name.push(chars[j]);
                    j += 1;
                } else {
                    valid = false;
                }
            }
            if valid && j < chars.len() && chars[j] == '}' {
                out.push(name);
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_placeholders_in_order_allowing_repeats() {
        let ph = extract_placeholders("Hello, {name}! You are {age} years old, {name}.");
        assert_eq!(ph, vec!["name", "age", "name"]);
    }

    #[test]
    fn ignores_malformed_braces() {
        let ph = extract_placeholders("{1invalid} {valid_one} {}");
        assert_eq!(ph, vec!["valid_one"]);
    }
}
