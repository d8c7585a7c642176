//! Folds every resolved file's AST into a single [`SymbolTable`] (§4.2).
//!
//! Declaration order within a file is preserved in every ordered
//! collection the resulting symbols carry (fields, spreads, enum
//! members); across files, collection proceeds in sorted-path order so
//! that duplicate-name diagnostics are deterministic even though the
//! spec only requires they be order-independent as a *set*.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use vdl_diagnostic::{CancellationToken, Diagnostic};
use vdl_resolver::ResolvedFile;
use vdl_symbol::*;
use vdl_syntax::ast;

/// Collect every file into one symbol table. Returns `None` only if
/// `token` is observed cancelled between files.
pub fn collect(
    files: &HashMap<PathBuf, ResolvedFile>,
    token: &CancellationToken,
) -> Option<(SymbolTable, Vec<Diagnostic>)> {
    let mut table = SymbolTable::new();
    let mut diags = Vec::new();

    let mut paths: Vec<&PathBuf> = files.keys().collect();
    paths.sort();

    for path in paths {
        if token.is_cancelled() {
            return None;
        }
        collect_file(path, &files[path].ast, &mut table, &mut diags);
    }

    Some((table, diags))
}

fn collect_file(path: &Path, ast: &ast::Ast, table: &mut SymbolTable, diags: &mut Vec<Diagnostic>) {
    for ty in &ast.types {
        table.register_type(build_type(path, ty), diags);
    }
    for e in &ast.enums {
        table.register_enum(build_enum(path, e), diags);
    }
    for c in &ast.consts {
        table.register_const(build_const(path, c), diags);
    }
    for p in &ast.patterns {
        table.register_pattern(build_pattern(path, p), diags);
    }
    for doc in &ast.standalone_docs {
        table.add_standalone_doc(DocSymbol {
            content: doc.content.clone(),
            start: doc.span.start.clone(),
            end: doc.span.end.clone(),
            file: path.to_path_buf(),
        });
    }
}

fn common(
    path: &Path,
    name: &str,
    span: &vdl_diagnostic::Span,
    docstring: Option<&ast::DocBlock>,
    annotations: &[ast::AnnotationUse],
) -> SymbolCommon {
    SymbolCommon {
        name: name.to_string(),
        declaring_file: path.to_path_buf(),
        start: span.start.clone(),
        end: span.end.clone(),
        resolved_docstring: docstring.map(|d| d.content.clone()),
        annotations: build_annotations(annotations),
    }
}

/// Collapse repeated uses of the same annotation name into a single
/// record, in first-seen order, recording every occurrence's position.
fn build_annotations(uses: &[ast::AnnotationUse]) -> Vec<Annotation> {
    let mut out: Vec<Annotation> = Vec::new();
    for u in uses {
        match out.iter_mut().find(|a| a.name == u.name) {
            Some(existing) => {
                existing.positions.push(u.span.clone());
                if existing.literal.is_none() {
                    existing.literal = u.literal.as_ref().and_then(annotation_literal);
                }
            }
            None => out.push(Annotation {
                name: u.name.clone(),
                literal: u.literal.as_ref().and_then(annotation_literal),
                positions: vec![u.span.clone()],
            }),
        }
    }
    out
}

fn annotation_literal(lit: &ast::ConstLiteral) -> Option<AnnotationLiteral> {
    match lit {
        ast::ConstLiteral::Str(s, _) => Some(AnnotationLiteral::Str(s.clone())),
        ast::ConstLiteral::Int(i, _) => Some(AnnotationLiteral::Int(*i)),
        ast::ConstLiteral::Float(f, _) => Some(AnnotationLiteral::Float(*f)),
        ast::ConstLiteral::Bool(b, _) => Some(AnnotationLiteral::Bool(*b)),
        ast::ConstLiteral::Object(_) | ast::ConstLiteral::Array(_) | ast::ConstLiteral::Reference(_) => None,
    }
}

fn build_spread(s: &ast::SpreadRef) -> SpreadRef {
    SpreadRef {
        name: s.name.clone(),
        name_span: s.name_span.clone(),
        member: s.member.clone(),
        member_span: s.member_span.clone(),
        span: s.span.clone(),
    }
}

fn build_type(path: &Path, t: &ast::TypeDecl) -> TypeSymbol {
    TypeSymbol {
        common: common(path, &t.name, &t.span, t.docstring.as_ref(), &t.annotations),
        fields: t.fields.iter().map(|f| build_field(path, f)).collect(),
        spreads: t.spreads.iter().map(build_spread).collect(),
        ast: t.clone(),
    }
}

fn build_field(path: &Path, f: &ast::FieldDecl) -> FieldSymbol {
    FieldSymbol {
        common: common(path, &f.name, &f.span, f.docstring.as_ref(), &f.annotations),
        optional: f.optional,
        field_type: build_field_type(path, &f.ty),
    }
}

fn build_field_type(path: &Path, ty: &ast::FieldType) -> FieldTypeInfo {
    let kind = match &ty.kind {
        ast::FieldTypeKind::Primitive(name) => {
            FieldTypeKind::Primitive(PrimitiveKind::from_name(name).unwrap_or(PrimitiveKind::String))
        }
        ast::FieldTypeKind::Custom(name, name_span) => FieldTypeKind::Custom {
            name: name.clone(),
            name_span: name_span.clone(),
            resolved_type: None,
            resolved_enum: None,
        },
        ast::FieldTypeKind::Map(inner) => FieldTypeKind::Map(Box::new(build_field_type(path, inner))),
        ast::FieldTypeKind::Object(obj) => FieldTypeKind::Object(build_inline_object(path, obj)),
    };
    FieldTypeInfo {
        kind,
        array_dimensions: ty.array_dims,
        span: ty.span.clone(),
    }
}

fn build_inline_object(path: &Path, obj: &ast::InlineObject) -> InlineObject {
    InlineObject {
        fields: obj.fields.iter().map(|f| build_field(path, f)).collect(),
        spreads: obj.spreads.iter().map(build_spread).collect(),
    }
}

fn build_enum(path: &Path, e: &ast::EnumDecl) -> EnumSymbol {
    EnumSymbol {
        common: common(path, &e.name, &e.span, e.docstring.as_ref(), &e.annotations),
        members: e.members.iter().map(build_enum_member).collect(),
        spreads: e.spreads.iter().map(build_spread).collect(),
        value_type: None,
    }
}

fn build_enum_member(m: &ast::EnumMemberDecl) -> EnumMemberSymbol {
    let (value, has_explicit_value) = match &m.value {
        None => (m.name.clone(), false),
        Some(ast::EnumValueLiteral::Str(s, _)) => (s.clone(), true),
        Some(ast::EnumValueLiteral::Int(i, _)) => (i.to_string(), true),
    };
    EnumMemberSymbol {
        name: m.name.clone(),
        name_span: m.name_span.clone(),
        value,
        has_explicit_value,
        span: m.span.clone(),
    }
}

fn build_const(path: &Path, c: &ast::ConstDecl) -> ConstSymbol {
    let (value_type, value) = infer_literal_shape(&c.value);
    ConstSymbol {
        common: common(path, &c.name, &c.span, c.docstring.as_ref(), &c.annotations),
        type_name: c.type_name.clone(),
        type_span: c.type_span.clone(),
        value_type,
        value,
        literal: c.value.clone(),
    }
}

/// Shape-only inference (§4.2); `vdl-validate::validators::constants`
/// re-derives and overwrites this after resolving references and spreads.
fn infer_literal_shape(lit: &ast::ConstLiteral) -> (ConstValueType, String) {
    match lit {
        ast::ConstLiteral::Str(s, _) => (ConstValueType::String, s.clone()),
        ast::ConstLiteral::Int(i, _) => (ConstValueType::Int, i.to_string()),
        ast::ConstLiteral::Float(f, _) => (ConstValueType::Float, f.to_string()),
        ast::ConstLiteral::Bool(b, _) => (ConstValueType::Bool, b.to_string()),
        ast::ConstLiteral::Object(_) => (ConstValueType::Object, String::new()),
        ast::ConstLiteral::Array(_) => (ConstValueType::Array, String::new()),
        ast::ConstLiteral::Reference(_) => (ConstValueType::Reference, String::new()),
    }
}

fn build_pattern(path: &Path, p: &ast::PatternDecl) -> PatternSymbol {
    PatternSymbol {
        common: common(path, &p.name, &p.span, p.docstring.as_ref(), &p.annotations),
        template: p.template.clone(),
        placeholders: extract_placeholders(&p.template),
    }
}
