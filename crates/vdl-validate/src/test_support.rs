//! Shared builders for validator unit tests. Every symbol is positioned
//! in a fake `t.vdl` at a caller-supplied line so diagnostics can assert
//! on real positions without every test hand-rolling an `Ast` link.

use std::path::PathBuf;
use vdl_diagnostic::{Position, Span};
use vdl_symbol::*;

pub fn pos(line: u32) -> Position {
    Position::new(PathBuf::from("t.vdl"), line, 1, 0)
}

pub fn span(line: u32) -> Span {
    Span::point(pos(line))
}

pub fn common(name: &str, line: u32) -> SymbolCommon {
    SymbolCommon {
        name: name.to_string(),
        declaring_file: PathBuf::from("t.vdl"),
        start: pos(line),
        end: pos(line),
        resolved_docstring: None,
        annotations: Vec::new(),
    }
}

pub fn common_with_annotations(name: &str, line: u32, annotations: Vec<Annotation>) -> SymbolCommon {
    let mut c = common(name, line);
    c.annotations = annotations;
    c
}

pub fn annotation(name: &str, line: u32) -> Annotation {
    Annotation {
        name: name.to_string(),
        literal: None,
        positions: vec![span(line)],
    }
}

fn empty_type_decl(name: &str, line: u32) -> vdl_syntax::ast::TypeDecl {
    vdl_syntax::ast::TypeDecl {
        name: name.to_string(),
        name_span: span(line),
        fields: Vec::new(),
        spreads: Vec::new(),
        docstring: None,
        annotations: Vec::new(),
        span: span(line),
    }
}

pub fn make_type(name: &str, line: u32, fields: Vec<FieldSymbol>, spreads: Vec<SpreadRef>) -> TypeSymbol {
    TypeSymbol {
        common: common(name, line),
        fields,
        spreads,
        ast: empty_type_decl(name, line),
    }
}

pub fn field(name: &str, line: u32, optional: bool, field_type: FieldTypeInfo) -> FieldSymbol {
    FieldSymbol {
        common: common(name, line),
        optional,
        field_type,
    }
}

pub fn primitive(kind: PrimitiveKind, line: u32) -> FieldTypeInfo {
    FieldTypeInfo {
        kind: FieldTypeKind::Primitive(kind),
        array_dimensions: 0,
        span: span(line),
    }
}

pub fn custom(name: &str, line: u32) -> FieldTypeInfo {
    FieldTypeInfo {
        kind: FieldTypeKind::Custom {
            name: name.to_string(),
            name_span: span(line),
            resolved_type: None,
            resolved_enum: None,
        },
        array_dimensions: 0,
        span: span(line),
    }
}

pub fn map_of(value: FieldTypeInfo, line: u32) -> FieldTypeInfo {
    FieldTypeInfo {
        kind: FieldTypeKind::Map(Box::new(value)),
        array_dimensions: 0,
        span: span(line),
    }
}

pub fn object_of(fields: Vec<FieldSymbol>, spreads: Vec<SpreadRef>, line: u32) -> FieldTypeInfo {
    FieldTypeInfo {
        kind: FieldTypeKind::Object(InlineObject { fields, spreads }),
        array_dimensions: 0,
        span: span(line),
    }
}

pub fn spread(name: &str, line: u32) -> SpreadRef {
    SpreadRef {
        name: name.to_string(),
        name_span: span(line),
        member: None,
        member_span: None,
        span: span(line),
    }
}

pub fn spread_with_member(name: &str, member: &str, line: u32) -> SpreadRef {
    SpreadRef {
        name: name.to_string(),
        name_span: span(line),
        member: Some(member.to_string()),
        member_span: Some(span(line)),
        span: span(line),
    }
}

pub fn make_enum(name: &str, line: u32, members: Vec<EnumMemberSymbol>, spreads: Vec<SpreadRef>) -> EnumSymbol {
    EnumSymbol {
        common: common(name, line),
        members,
        spreads,
        value_type: None,
    }
}

pub fn enum_member(name: &str, line: u32, value: Option<&str>) -> EnumMemberSymbol {
    EnumMemberSymbol {
        name: name.to_string(),
        name_span: span(line),
        value: value.unwrap_or(name).to_string(),
        has_explicit_value: value.is_some(),
        span: span(line),
    }
}

pub fn make_const(name: &str, line: u32, value_type: ConstValueType, value: &str, literal: vdl_syntax::ast::ConstLiteral) -> ConstSymbol {
    ConstSymbol {
        common: common(name, line),
        type_name: None,
        type_span: None,
        value_type,
        value: value.to_string(),
        literal,
    }
}

pub fn str_literal(value: &str, line: u32) -> vdl_syntax::ast::ConstLiteral {
    vdl_syntax::ast::ConstLiteral::Str(value.to_string(), span(line))
}

pub fn int_literal(value: i64, line: u32) -> vdl_syntax::ast::ConstLiteral {
    vdl_syntax::ast::ConstLiteral::Int(value, span(line))
}

pub fn reference_literal(name: &str, member: Option<&str>, line: u32) -> vdl_syntax::ast::ConstLiteral {
    vdl_syntax::ast::ConstLiteral::Reference(vdl_syntax::ast::ReferenceLit {
        name: name.to_string(),
        member: member.map(str::to_string),
        member_span: member.map(|_| span(line)),
        span: span(line),
    })
}

pub fn ast_spread(name: &str, line: u32) -> vdl_syntax::ast::SpreadRef {
    vdl_syntax::ast::SpreadRef {
        name: name.to_string(),
        name_span: span(line),
        member: None,
        member_span: None,
        span: span(line),
    }
}

pub fn object_literal(
    entries: Vec<(&str, vdl_syntax::ast::ConstLiteral)>,
    spreads: Vec<vdl_syntax::ast::SpreadRef>,
    line: u32,
) -> vdl_syntax::ast::ConstLiteral {
    vdl_syntax::ast::ConstLiteral::Object(vdl_syntax::ast::ObjectLiteral {
        entries: entries
            .into_iter()
            .map(|(key, value)| vdl_syntax::ast::ObjectEntry {
                key: key.to_string(),
                key_span: span(line),
                value,
            })
            .collect(),
        spreads,
        span: span(line),
    })
}

pub fn array_literal(elements: Vec<vdl_syntax::ast::ConstLiteral>, line: u32) -> vdl_syntax::ast::ConstLiteral {
    vdl_syntax::ast::ConstLiteral::Array(vdl_syntax::ast::ArrayLiteral { elements, span: span(line) })
}
