//! Type-dependency cycle detection (§4.3.6). A cycle is only an error
//! when every field along it is required; an optional field anywhere
//! on the path makes the recursive shape representable.

use std::collections::{HashMap, HashSet};

use vdl_diagnostic::{Diagnostic, E601_CIRCULAR_TYPE_DEPENDENCY};
use vdl_symbol::{FieldTypeInfo, FieldTypeKind, SymbolTable};

pub fn run(table: &SymbolTable) -> Vec<Diagnostic> {
    let edges: HashMap<&str, Vec<(&str, bool)>> = table
        .types
        .values()
        .map(|ty| (ty.common.name.as_str(), direct_edges(ty)))
        .collect();

    let mut diags = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut names: Vec<&str> = edges.keys().copied().collect();
    names.sort_unstable();

    for start in names {
        if visited.contains(start) {
            continue;
        }
        let mut stack = Vec::new();
        let mut flags = Vec::new();
        if let Some((cycle, has_optional)) = walk(start, false, &edges, &mut stack, &mut flags, &mut visited) {
            if !has_optional {
                let ty = &table.types[cycle[0].as_str()];
                diags.push(Diagnostic::new(
                    ty.common.span(),
                    E601_CIRCULAR_TYPE_DEPENDENCY,
                    format!("circular type dependency with no optional field to break it: {}", cycle.join(" -> ")),
                ));
            }
        }
    }

    diags
}

fn direct_edges(ty: &vdl_symbol::TypeSymbol) -> Vec<(&str, bool)> {
    let mut edges = Vec::new();
    for field in &ty.fields {
        collect_field_edges(&field.field_type, field.optional, &mut edges);
    }
    edges
}

fn collect_field_edges<'a>(info: &'a FieldTypeInfo, optional: bool, edges: &mut Vec<(&'a str, bool)>) {
    match &info.kind {
        FieldTypeKind::Primitive(_) => {}
        FieldTypeKind::Custom { resolved_type, .. } => {
            if let Some(name) = resolved_type {
                edges.push((name.as_str(), optional));
            }
        }
        FieldTypeKind::Map(value) => collect_field_edges(value, optional, edges),
        FieldTypeKind::Object(obj) => {
            for field in &obj.fields {
                collect_field_edges(&field.field_type, optional || field.optional, edges);
            }
        }
    }
}

fn walk<'a>(
    node: &'a str,
    incoming_optional: bool,
    edges: &HashMap<&'a str, Vec<(&'a str, bool)>>,
    stack: &mut Vec<&'a str>,
    flags: &mut Vec<bool>,
    visited: &mut HashSet<&'a str>,
) -> Option<(Vec<String>, bool)> {
    if let Some(pos) = stack.iter().position(|n| *n == node) {
        let mut cycle: Vec<String> = stack[pos..].iter().map(|s| s.to_string()).collect();
        cycle.push(node.to_string());
        let has_optional = incoming_optional || flags[pos + 1..].iter().any(|&b| b);
        return Some((cycle, has_optional));
    }
    if visited.contains(node) {
        return None;
    }

    stack.push(node);
    flags.push(incoming_optional);
    if let Some(children) = edges.get(node) {
        for &(child, opt) in children {
            if let Some(result) = walk(child, opt, edges, stack, flags, visited) {
                stack.pop();
                flags.pop();
                visited.insert(node);
                return Some(result);
            }
        }
    }
    stack.pop();
    flags.pop();
    visited.insert(node);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use vdl_symbol::PrimitiveKind;

    #[test]
    fn required_self_reference_is_a_cycle() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(make_type("Node", 1, vec![field("next", 2, false, custom("Node", 2))], vec![]), &mut discard);
        crate::validators::types::run(&mut table);
        let diags = run(&table);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E601_CIRCULAR_TYPE_DEPENDENCY);
    }

    #[test]
    fn optional_field_breaks_the_cycle() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(make_type("Node", 1, vec![field("next", 2, true, custom("Node", 2))], vec![]), &mut discard);
        crate::validators::types::run(&mut table);
        assert!(run(&table).is_empty());
    }

    #[test]
    fn mutual_cycle_through_two_types_is_detected() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(make_type("A", 1, vec![field("b", 2, false, custom("B", 2))], vec![]), &mut discard);
        table.register_type(make_type("B", 3, vec![field("a", 4, false, custom("A", 4))], vec![]), &mut discard);
        crate::validators::types::run(&mut table);
        let diags = run(&table);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn cycle_through_map_and_inline_object_is_detected() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        let inline = object_of(vec![field("self", 3, false, custom("Node", 3))], vec![], 2);
        table.register_type(make_type("Node", 1, vec![field("child", 2, false, inline)], vec![]), &mut discard);
        crate::validators::types::run(&mut table);
        let diags = run(&table);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn acyclic_graph_is_silent() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_type(make_type("Leaf", 1, vec![field("v", 2, false, primitive(PrimitiveKind::String, 2))], vec![]), &mut discard);
        table.register_type(make_type("Root", 3, vec![field("leaf", 4, false, custom("Leaf", 4))], vec![]), &mut discard);
        crate::validators::types::run(&mut table);
        assert!(run(&table).is_empty());
    }
}
