//! PascalCase / camelCase enforcement (§4.3.1).

use vdl_diagnostic::{Diagnostic, E101_NOT_PASCAL_CASE, E102_NOT_CAMEL_CASE, E103_ENUM_MEMBER_NOT_PASCAL};
use vdl_symbol::{Annotation, FieldSymbol, FieldTypeKind, InlineObject, SymbolTable};

fn is_pascal_case(name: &str) -> bool {
    !name.contains('_') && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn is_camel_case(name: &str) -> bool {
    !name.contains('_') && name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

fn check_annotations(annotations: &[Annotation], diags: &mut Vec<Diagnostic>) {
    for annotation in annotations {
        if !is_camel_case(&annotation.name) {
            let pos = annotation.positions.first().cloned().expect("every annotation has at least one occurrence");
            diags.push(Diagnostic::new(
                pos,
                E102_NOT_CAMEL_CASE,
                format!("annotation \"{}\" must be camelCase", annotation.name),
            ));
        }
    }
}

fn check_field(field: &FieldSymbol, diags: &mut Vec<Diagnostic>) {
    if !is_camel_case(&field.common.name) {
        diags.push(Diagnostic::new(
            field.common.span(),
            E102_NOT_CAMEL_CASE,
            format!("field \"{}\" must be camelCase", field.common.name),
        ));
    }
    check_annotations(&field.common.annotations, diags);
    if let FieldTypeKind::Object(obj) = &field.field_type.kind {
        check_inline_object(obj, diags);
    }
}

fn check_inline_object(obj: &InlineObject, diags: &mut Vec<Diagnostic>) {
    for field in &obj.fields {
        check_field(field, diags);
    }
}

pub fn run(table: &SymbolTable) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    for ty in table.types.values() {
        if !is_pascal_case(&ty.common.name) {
            diags.push(Diagnostic::new(
                ty.common.span(),
                E101_NOT_PASCAL_CASE,
                format!("type \"{}\" must be PascalCase", ty.common.name),
            ));
        }
        check_annotations(&ty.common.annotations, &mut diags);
        for field in &ty.fields {
            check_field(field, &mut diags);
        }
    }

    for e in table.enums.values() {
        if !is_pascal_case(&e.common.name) {
            diags.push(Diagnostic::new(
                e.common.span(),
                E101_NOT_PASCAL_CASE,
                format!("enum \"{}\" must be PascalCase", e.common.name),
            ));
        }
        check_annotations(&e.common.annotations, &mut diags);
        for member in &e.members {
            if !is_pascal_case(&member.name) {
                diags.push(Diagnostic::new(
                    member.span.clone(),
                    E103_ENUM_MEMBER_NOT_PASCAL,
                    format!("enum member \"{}\" must be PascalCase", member.name),
                ));
            }
        }
    }

    for c in table.consts.values() {
        if !is_camel_case(&c.common.name) {
            diags.push(Diagnostic::new(
                c.common.span(),
                E102_NOT_CAMEL_CASE,
                format!("const \"{}\" must be camelCase", c.common.name),
            ));
        }
        check_annotations(&c.common.annotations, &mut diags);
    }

    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use vdl_symbol::PrimitiveKind;

    #[test]
    fn flags_non_camel_annotation_name() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        let ty = vdl_symbol::TypeSymbol {
            common: common_with_annotations("User", 1, vec![annotation("Not_Camel", 1)]),
            fields: Vec::new(),
            spreads: Vec::new(),
            ast: vdl_syntax::ast::TypeDecl {
                name: "User".to_string(),
                name_span: span(1),
                fields: Vec::new(),
                spreads: Vec::new(),
                docstring: None,
                annotations: Vec::new(),
                span: span(1),
            },
        };
        table.register_type(ty, &mut discard);

        let diags = run(&table);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E102_NOT_CAMEL_CASE);
    }

    #[test]
    fn flags_non_pascal_type_and_non_camel_field() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(
            make_type("user_profile", 1, vec![field("Name", 2, false, primitive(PrimitiveKind::String, 2))], vec![]),
            &mut discard,
        );

        let diags = run(&table);
        assert!(diags.iter().any(|d| d.code == E101_NOT_PASCAL_CASE));
        assert!(diags.iter().any(|d| d.code == E102_NOT_CAMEL_CASE));
    }

    #[test]
    fn well_formed_names_are_silent() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(
            make_type("User", 1, vec![field("name", 2, false, primitive(PrimitiveKind::String, 2))], vec![]),
            &mut discard,
        );
        assert!(run(&table).is_empty());
    }

    #[test]
    fn recurses_into_inline_objects() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        let inline = object_of(vec![field("Bad_Name", 3, false, primitive(PrimitiveKind::String, 3))], vec![], 2);
        table.register_type(make_type("User", 1, vec![field("address", 2, false, inline)], vec![]), &mut discard);

        let diags = run(&table);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E102_NOT_CAMEL_CASE);
    }

    #[test]
    fn enum_member_must_be_pascal_case() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(make_enum("Status", 1, vec![enum_member("active", 2, None)], vec![]), &mut discard);

        let diags = run(&table);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E103_ENUM_MEMBER_NOT_PASCAL);
    }
}
