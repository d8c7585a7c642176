//! Cross-kind name collisions (§4.3.8). Same-kind duplicates are already
//! reported by `SymbolTable::register_*`; this pass only catches a type,
//! enum, and constant sharing one name.

use std::collections::HashMap;

use vdl_diagnostic::{Diagnostic, Position, E804_DUPLICATE_NAME};
use vdl_symbol::SymbolTable;

pub fn run(table: &SymbolTable) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let mut seen: HashMap<&str, (&str, &Position)> = HashMap::new();

    let mut entries: Vec<(&str, &str, &Position, vdl_diagnostic::Span)> = Vec::new();
    for ty in table.types.values() {
        entries.push(("type", &ty.common.name, &ty.common.start, ty.common.span()));
    }
    for e in table.enums.values() {
        entries.push(("enum", &e.common.name, &e.common.start, e.common.span()));
    }
    for c in table.consts.values() {
        entries.push(("const", &c.common.name, &c.common.start, c.common.span()));
    }
    entries.sort_by(|a, b| (a.2.line, a.2.column, a.0).cmp(&(b.2.line, b.2.column, b.0)));

    for (kind, name, start, span) in entries {
        if let Some((first_kind, first_start)) = seen.get(name) {
            diags.push(Diagnostic::new(
                span,
                E804_DUPLICATE_NAME,
                format!(
                    "{kind} \"{name}\" conflicts with {first_kind} declared at {}:{}:{}",
                    first_start.filename.display(),
                    first_start.line,
                    first_start.column
                ),
            ));
        } else {
            seen.insert(name, (kind, start));
        }
    }

    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn type_and_enum_sharing_a_name_is_flagged() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(make_type("Status", 1, vec![], vec![]), &mut discard);
        table.register_enum(make_enum("Status", 5, vec![], vec![]), &mut discard);
        let diags = run(&table);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E804_DUPLICATE_NAME);
        assert!(diags[0].message.contains("conflicts with type"));
    }

    #[test]
    fn distinct_names_are_silent() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(make_type("User", 1, vec![], vec![]), &mut discard);
        table.register_enum(make_enum("Status", 2, vec![], vec![]), &mut discard);
        assert!(run(&table).is_empty());
    }
}
