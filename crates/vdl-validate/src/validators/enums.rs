//! Enum spread expansion and value-type inference (§4.3.5).

use std::collections::{HashMap, HashSet};

use vdl_diagnostic::{
    fuzzy_suggestions, with_suggestion, Diagnostic, E202_SPREAD_TYPE_NOT_FOUND, E204_SPREAD_CYCLE,
    E301_ENUM_MIXED_TYPES, E302_ENUM_INT_NEEDS_VALUES, E303_ENUM_DUPLICATE_VALUE, E304_ENUM_DUPLICATE_NAME,
};
use vdl_symbol::{EnumMemberSymbol, EnumValueType, SymbolTable};

pub fn run(table: &mut SymbolTable) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let enum_names: Vec<String> = table.enums.keys().cloned().collect();

    for e in table.enums.values() {
        for spread in &e.spreads {
            if spread.member.is_some() {
                diags.push(Diagnostic::new(
                    spread.span.clone(),
                    E202_SPREAD_TYPE_NOT_FOUND,
                    format!("spread \"...{}\" must reference a bare enum name, not a member", spread.name),
                ));
            } else if !table.enums.contains_key(&spread.name) {
                let suggestions = fuzzy_suggestions(&spread.name, enum_names.iter().map(String::as_str));
                diags.push(Diagnostic::new(
                    spread.name_span.clone(),
                    E202_SPREAD_TYPE_NOT_FOUND,
                    with_suggestion(format!("enum \"{}\" is not declared", spread.name), &suggestions),
                ));
            }
        }
    }

    diags.extend(detect_cycles(table));

    let mut effective: HashMap<String, Vec<EnumMemberSymbol>> = HashMap::new();
    for name in &enum_names {
        let mut visiting = HashSet::new();
        effective.insert(name.clone(), expand(name, table, &mut visiting));
    }

    for (name, members) in &effective {
        let (value_type, mut extra) = infer_and_check(members);
        diags.append(&mut extra);
        if let Some(e) = table.enums.get_mut(name) {
            e.value_type = Some(value_type);
        }
    }

    diags
}

fn expand(name: &str, table: &SymbolTable, visiting: &mut HashSet<String>) -> Vec<EnumMemberSymbol> {
    if visiting.contains(name) {
        return Vec::new();
    }
    let Some(e) = table.enums.get(name) else {
        return Vec::new();
    };
    visiting.insert(name.to_string());

    let mut out = Vec::new();
    for spread in &e.spreads {
        if spread.member.is_none() && table.enums.contains_key(&spread.name) {
            out.extend(expand(&spread.name, table, visiting));
        }
    }
    out.extend(e.members.iter().cloned());
    out
}

fn infer_and_check(members: &[EnumMemberSymbol]) -> (EnumValueType, Vec<Diagnostic>) {
    let mut diags = Vec::new();

    let any_int = members
        .iter()
        .filter(|m| m.has_explicit_value)
        .any(|m| m.value.parse::<i64>().is_ok());
    let any_non_int = members
        .iter()
        .filter(|m| m.has_explicit_value)
        .any(|m| m.value.parse::<i64>().is_err());

    if any_int && any_non_int {
        if let Some(m) = members.iter().find(|m| m.has_explicit_value) {
            diags.push(Diagnostic::new(
                m.span.clone(),
                E301_ENUM_MIXED_TYPES,
                "enum mixes integer and string member values".to_string(),
            ));
        }
    }

    let value_type = if any_int { EnumValueType::Int } else { EnumValueType::String };

    if value_type == EnumValueType::Int {
        for m in members.iter().filter(|m| !m.has_explicit_value) {
            diags.push(Diagnostic::new(
                m.span.clone(),
                E302_ENUM_INT_NEEDS_VALUES,
                format!("member \"{}\" needs an explicit integer value", m.name),
            ));
        }
    }

    let mut seen_names: HashMap<&str, &EnumMemberSymbol> = HashMap::new();
    let mut seen_values: HashMap<&str, &EnumMemberSymbol> = HashMap::new();
    for m in members {
        if let Some(first) = seen_names.get(m.name.as_str()) {
            diags.push(Diagnostic::new(
                m.span.clone(),
                E304_ENUM_DUPLICATE_NAME,
                format!(
                    "member \"{}\" is already declared at {}:{}:{}",
                    m.name, first.span.start.filename.display(), first.span.start.line, first.span.start.column
                ),
            ));
        } else {
            seen_names.insert(&m.name, m);
        }

        if let Some(first) = seen_values.get(m.value.as_str()) {
            diags.push(Diagnostic::new(
                m.span.clone(),
                E303_ENUM_DUPLICATE_VALUE,
                format!(
                    "value \"{}\" is already used by member \"{}\" at {}:{}:{}",
                    m.value, first.name, first.span.start.filename.display(), first.span.start.line, first.span.start.column
                ),
            ));
        } else {
            seen_values.insert(&m.value, m);
        }
    }

    (value_type, diags)
}

fn detect_cycles(table: &SymbolTable) -> Vec<Diagnostic> {
    let edges: HashMap<&str, Vec<&str>> = table
        .enums
        .values()
        .map(|e| {
            let targets: Vec<&str> = e
                .spreads
                .iter()
                .filter(|s| s.member.is_none() && table.enums.contains_key(&s.name))
                .map(|s| s.name.as_str())
                .collect();
            (e.common.name.as_str(), targets)
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
        let mut stack = Vec::new();
        if let Some(cycle) = walk(start, &edges, &mut stack, &mut visited) {
            let e = &table.enums[cycle[0].as_str()];
            diags.push(Diagnostic::new(
                e.common.span(),
                E204_SPREAD_CYCLE,
                format!("circular enum spread: {}", cycle.join(" -> ")),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn infers_string_value_type_by_default() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(
            make_enum("Status", 1, vec![enum_member("Active", 2, None), enum_member("Paused", 3, None)], vec![]),
            &mut discard,
        );
        assert!(run(&mut table).is_empty());
        assert_eq!(table.enums["Status"].value_type, Some(EnumValueType::String));
    }

    #[test]
    fn mixed_explicit_values_are_flagged() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(
            make_enum(
                "Status",
                1,
                vec![enum_member("Active", 2, Some("1")), enum_member("Paused", 3, Some("paused"))],
                vec![],
            ),
            &mut discard,
        );
        let diags = run(&mut table);
        assert!(diags.iter().any(|d| d.code == E301_ENUM_MIXED_TYPES));
    }

    #[test]
    fn int_enum_requires_explicit_values_on_every_member() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(
            make_enum("Status", 1, vec![enum_member("Active", 2, Some("1")), enum_member("Paused", 3, None)], vec![]),
            &mut discard,
        );
        let diags = run(&mut table);
        assert!(diags.iter().any(|d| d.code == E302_ENUM_INT_NEEDS_VALUES));
    }

    #[test]
    fn duplicate_values_point_at_first_occurrence() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(
            make_enum(
                "Status",
                1,
                vec![enum_member("Active", 2, Some("1")), enum_member("Enabled", 3, Some("1"))],
                vec![],
            ),
            &mut discard,
        );
        let diags = run(&mut table);
        assert!(diags.iter().any(|d| d.code == E303_ENUM_DUPLICATE_VALUE));
    }

    #[test]
    fn spread_expands_members_from_target_enum() {
        let mut table = SymbolTable::new();
        let mut discard = Vec::new();
        table.register_enum(make_enum("Base", 1, vec![enum_member("Active", 1, None)], vec![]), &mut discard);
        table.register_enum(
            make_enum("Status", 2, vec![enum_member("Paused", 3, None)], vec![spread("Base", 2)]),
            &mut discard,
        );
        assert!(run(&mut table).is_empty());
    }
}
