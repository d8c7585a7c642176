//! Field-type resolution (§4.3.2): link `Custom` references to the type
//! or enum they name, or report `E201` with fuzzy suggestions.

use std::collections::HashSet;

use vdl_diagnostic::{fuzzy_suggestions, with_suggestion, Diagnostic, E201_TYPE_NOT_DECLARED};
use vdl_symbol::{FieldTypeInfo, FieldTypeKind, PrimitiveKind, SymbolTable};

pub fn run(table: &mut SymbolTable) -> Vec<Diagnostic> {
    let type_names: HashSet<String> = table.types.keys().cloned().collect();
    let enum_names: HashSet<String> = table.enums.keys().cloned().collect();
    let mut diags = Vec::new();

    for ty in table.types.values_mut() {
        for field in &mut ty.fields {
            check(&mut field.field_type, &type_names, &enum_names, &mut diags);
        }
    }

    diags
}

fn check(info: &mut FieldTypeInfo, type_names: &HashSet<String>, enum_names: &HashSet<String>, diags: &mut Vec<Diagnostic>) {
    match &mut info.kind {
        FieldTypeKind::Primitive(_) => {}
        FieldTypeKind::Custom {
            name,
            name_span,
            resolved_type,
            resolved_enum,
        } => {
            if type_names.contains(name.as_str()) {
                *resolved_type = Some(name.clone());
            } else if enum_names.contains(name.as_str()) {
                *resolved_enum = Some(name.clone());
            } else {
                let pool: Vec<&str> = PrimitiveKind::ALL
                    .iter()
                    .copied()
                    .chain(type_names.iter().map(String::as_str))
                    .chain(enum_names.iter().map(String::as_str))
                    .collect();
                let suggestions = fuzzy_suggestions(name, pool);
                diags.push(Diagnostic::new(
                    name_span.clone(),
                    E201_TYPE_NOT_DECLARED,
                    with_suggestion(format!("type \"{name}\" is not declared"), &suggestions),
                ));
            }
        }
        FieldTypeKind::Map(value) => check(value, type_names, enum_names, diags),
        FieldTypeKind::Object(obj) => {
            for field in &mut obj.fields {
                check(&mut field.field_type, type_names, enum_names, diags);
            }
        }
    }
}
