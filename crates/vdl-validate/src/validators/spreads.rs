//! Type spread expansion, field-conflict detection, and spread-cycle
//! detection (§4.3.4).

use std::collections::{HashMap, HashSet};

use vdl_diagnostic::{
    fuzzy_suggestions, with_suggestion, Diagnostic, E202_SPREAD_TYPE_NOT_FOUND, E203_SPREAD_FIELD_CONFLICT,
    E204_SPREAD_CYCLE,
};
use vdl_symbol::SymbolTable;

pub fn run(table: &SymbolTable) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let type_names: Vec<&str> = table.types.keys().map(String::as_str).collect();

    for ty in table.types.values() {
        let mut seen: HashSet<&str> = ty.fields.iter().map(|f| f.common.name.as_str()).collect();

        for spread in &ty.spreads {
            if spread.member.is_some() {
                diags.push(Diagnostic::new(
                    spread.span.clone(),
                    E202_SPREAD_TYPE_NOT_FOUND,
                    format!("spread \"...{}\" must reference a bare type name, not a member", spread.name),
                ));
                continue;
            }

            let Some(target) = table.types.get(&spread.name) else {
                let suggestions = fuzzy_suggestions(&spread.name, type_names.iter().copied());
                diags.push(Diagnostic::new(
                    spread.name_span.clone(),
                    E202_SPREAD_TYPE_NOT_FOUND,
                    with_suggestion(format!("type \"{}\" is not declared", spread.name), &suggestions),
                ));
                continue;
            };

            for field in &target.fields {
                if !seen.insert(field.common.name.as_str()) {
                    diags.push(Diagnostic::new(
                        spread.span.clone(),
                        E203_SPREAD_FIELD_CONFLICT,
                        format!(
                            "field \"{}\" from spread \"...{}\" conflicts with an existing field",
                            field.common.name, spread.name
                        ),
                    ));
                }
            }
        }
    }

    diags.extend(detect_cycles(table));
    diags
}

fn detect_cycles(table: &SymbolTable) -> Vec<Diagnostic> {
    let edges: HashMap<&str, Vec<&str>> = table
        .types
        .values()
        .map(|ty| {
            let targets: Vec<&str> = ty
                .spreads
                .iter()
                .filter(|s| s.member.is_none() && table.types.contains_key(&s.name))
                .map(|s| s.name.as_str())
                .collect();
            (ty.common.name.as_str(), targets)
        })
        .collect();

    let mut diags = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    let mut names: Vec<&str> = edges.keys().copied().collect();
    names.sort_unstable();

    for start in names {
        if visited.contains(start) {
            continue;
        }
        let mut stack: Vec<&str> = Vec::new();
        if let Some(cycle) = walk(start, &edges, &mut stack, &mut visited) {
            let ty = &table.types[&cycle[0]];
            diags.push(Diagnostic::new(
                ty.common.span(),
                E204_SPREAD_CYCLE,
                format!("circular spread: {}", cycle.join(" -> ")),
            ));
        }
    }

    diags
}

fn walk<'a>(
    node: &'a str,
    edges: &HashMap<&'a str, Vec<&'a str>>,
    stack: &mut Vec<&'a str>,
    visited: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    if let Some(pos) = stack.iter().position(|n| *n == node) {
        let mut cycle: Vec<String> = stack[pos..].iter().map(|s| s.to_string()).collect();
        cycle.push(node.to_string());
        return Some(cycle);
    }
    if visited.contains(node) {
        return None;
    }

    stack.push(node);
    if let Some(children) = edges.get(node) {
        for child in children {
            if let Some(cycle) = walk(child, edges, stack, visited) {
                stack.pop();
                visited.insert(node);
                return Some(cycle);
            }
        }
    }
    stack.pop();
    visited.insert(node);
    None
}
