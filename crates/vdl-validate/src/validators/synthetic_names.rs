//! Synthetic-name collision detection (§4.3.9, optional extension).
//!
//! Code generation derives names from enums (`<Name>List`, `is<Name>`,
//! `<Name>Value`). The `<Name>Input`/`<Name>Output` rule for RPC procs
//! and streams has no source symbol in this data model — procedures and
//! streams are not part of the collected `Program` — so only the
//! enum-derived rules are checked here.

use std::collections::HashMap;

use vdl_diagnostic::{Diagnostic, E901_SYNTHETIC_NAME_COLLISION};
use vdl_symbol::SymbolTable;

struct Declared<'a> {
    kind: &'a str,
    span: vdl_diagnostic::Span,
}

pub fn run(table: &SymbolTable) -> Vec<Diagnostic> {
    let mut declared: HashMap<&str, Declared> = HashMap::new();
    for ty in table.types.values() {
        declared.insert(&ty.common.name, Declared { kind: "type", span: ty.common.span() });
    }
    for e in table.enums.values() {
        declared.insert(&e.common.name, Declared { kind: "enum", span: e.common.span() });
    }
    for c in table.consts.values() {
        declared.insert(&c.common.name, Declared { kind: "const", span: c.common.span() });
    }

    let mut diags = Vec::new();
    let mut enum_names: Vec<&str> = table.enums.keys().map(String::as_str).collect();
    enum_names.sort_unstable();

    for source in enum_names {
        for (reserved, rule) in reserved_names(source) {
            if let Some(found) = declared.get(reserved.as_str()) {
                if found.kind == "enum" && reserved == source {
                    continue;
                }
                diags.push(Diagnostic::new(
                    found.span.clone(),
                    E901_SYNTHETIC_NAME_COLLISION,
                    format!(
                        "{} \"{reserved}\" collides with the name code generation reserves for enum \"{source}\" ({rule})",
                        found.kind
                    ),
                ));
            }
        }
    }

    diags
}

fn reserved_names(source: &str) -> Vec<(String, &'static str)> {
    vec![
        (format!("{source}List"), "<Name>List"),
        (format!("is{source}"), "is<Name>"),
        (format!("{source}Value"), "<Name>Value"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn colliding_type_name_is_flagged() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(make_enum("Status", 1, vec![], vec![]), &mut discard);
        table.register_type(make_type("StatusList", 2, vec![], vec![]), &mut discard);
        let diags = run(&table);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E901_SYNTHETIC_NAME_COLLISION);
    }

    #[test]
    fn unrelated_names_are_silent() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(make_enum("Status", 1, vec![], vec![]), &mut discard);
        table.register_type(make_type("User", 2, vec![], vec![]), &mut discard);
        assert!(run(&table).is_empty());
    }
}
