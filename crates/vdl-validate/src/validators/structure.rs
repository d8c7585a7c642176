//! Structural name uniqueness (§4.3.7): declared field names within a
//! type or inline object, and object-literal keys within a constant.

use std::collections::HashMap;

use vdl_diagnostic::{Diagnostic, Span, E701_DUPLICATE_FIELD};
use vdl_symbol::{FieldSymbol, FieldTypeKind, SymbolTable};
use vdl_syntax::ast::ConstLiteral;

pub fn run(table: &SymbolTable) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    for ty in table.types.values() {
        check_fields(&ty.fields, &mut diags);
    }

    for c in table.consts.values() {
        check_literal(&c.literal, &mut diags);
    }

    diags
}

fn check_fields(fields: &[FieldSymbol], diags: &mut Vec<Diagnostic>) {
    let mut seen: HashMap<&str, Span> = HashMap::new();
    for f in fields {
        if let Some(first) = seen.get(f.common.name.as_str()) {
            diags.push(Diagnostic::new(
                f.common.span(),
                E701_DUPLICATE_FIELD,
                format!(
                    "field \"{}\" is already declared at {}:{}:{}",
                    f.common.name, first.start.filename.display(), first.start.line, first.start.column
                ),
            ));
        } else {
            seen.insert(&f.common.name, f.common.span());
        }
        if let FieldTypeKind::Object(obj) = &f.field_type.kind {
            check_fields(&obj.fields, diags);
        }
    }
}

fn check_literal(literal: &ConstLiteral, diags: &mut Vec<Diagnostic>) {
    match literal {
        ConstLiteral::Object(obj) => {
            let mut seen: HashMap<&str, Span> = HashMap::new();
            for entry in &obj.entries {
                if let Some(first) = seen.get(entry.key.as_str()) {
                    diags.push(Diagnostic::new(
                        entry.key_span.clone(),
                        E701_DUPLICATE_FIELD,
                        format!(
                            "key \"{}\" is already declared at {}:{}:{}",
                            entry.key, first.start.filename.display(), first.start.line, first.start.column
                        ),
                    ));
                } else {
                    seen.insert(&entry.key, entry.key_span.clone());
                }
                check_literal(&entry.value, diags);
            }
        }
        ConstLiteral::Array(arr) => {
            for el in &arr.elements {
                check_literal(el, diags);
            }
        }
        _ => {}
    }
}
