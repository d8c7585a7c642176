//! Constant literal type inference (§4.3.3).

use std::collections::{HashMap, HashSet};

use vdl_diagnostic::{
    fuzzy_suggestions, with_suggestion, Diagnostic, E201_TYPE_NOT_DECLARED, E205_INVALID_REFERENCE,
    E206_CONST_SPREAD_NOT_OBJECT, E207_CONST_ARRAY_MIXED_TYPES, E305_ENUM_MEMBER_NOT_FOUND, E701_DUPLICATE_FIELD,
};
use vdl_symbol::{ConstValueType, EnumSymbol, EnumValueType, PrimitiveKind, SymbolTable};
use vdl_syntax::ast::{ArrayLiteral, ConstLiteral, ObjectLiteral, ReferenceLit};

pub fn run(table: &mut SymbolTable) -> Vec<Diagnostic> {
    let const_names: Vec<String> = table.consts.keys().cloned().collect();
    let mut diags = Vec::new();
    let mut computed: HashMap<String, ConstValueType> = HashMap::new();

    for name in &const_names {
        let literal = table.consts[name].literal.clone();
        let mut visiting = HashSet::new();
        let vt = infer_literal(&literal, table, &mut visiting, &mut diags);
        computed.insert(name.clone(), vt);
    }

    for (name, vt) in computed {
        if let Some(c) = table.consts.get_mut(&name) {
            c.value_type = vt;
        }
    }

    for name in &const_names {
        let c = &table.consts[name];
        if let Some(type_name) = c.type_name.clone() {
            check_explicit_type(c.value_type, &type_name, c.type_span.clone().unwrap_or_else(|| c.common.span()), table, &mut diags);
        }
    }

    diags
}

fn infer_literal(
    literal: &ConstLiteral,
    table: &SymbolTable,
    visiting: &mut HashSet<String>,
    diags: &mut Vec<Diagnostic>,
) -> ConstValueType {
    match literal {
        ConstLiteral::Str(..) => ConstValueType::String,
        ConstLiteral::Int(..) => ConstValueType::Int,
        ConstLiteral::Float(..) => ConstValueType::Float,
        ConstLiteral::Bool(..) => ConstValueType::Bool,
        ConstLiteral::Object(obj) => {
            check_object_literal(obj, table, visiting, diags);
            ConstValueType::Object
        }
        ConstLiteral::Array(arr) => {
            check_array_literal(arr, table, visiting, diags);
            ConstValueType::Array
        }
        ConstLiteral::Reference(r) => infer_reference(r, table, visiting, diags),
    }
}

fn infer_reference(r: &ReferenceLit, table: &SymbolTable, visiting: &mut HashSet<String>, diags: &mut Vec<Diagnostic>) -> ConstValueType {
    match &r.member {
        None => {
            if visiting.contains(&r.name) {
                return table.consts.get(&r.name).map(|c| c.value_type).unwrap_or(ConstValueType::Unknown);
            }
            let Some(target) = table.consts.get(&r.name) else {
                let names: Vec<&str> = table.consts.keys().map(String::as_str).collect();
                let suggestions = fuzzy_suggestions(&r.name, names);
                diags.push(Diagnostic::new(
                    r.span.clone(),
                    E205_INVALID_REFERENCE,
                    with_suggestion(format!("const \"{}\" is not declared", r.name), &suggestions),
                ));
                return ConstValueType::Unknown;
            };
            let literal = target.literal.clone();
            visiting.insert(r.name.clone());
            let vt = infer_literal(&literal, table, visiting, diags);
            visiting.remove(&r.name);
            vt
        }
        Some(member) => {
            let Some(e) = table.enums.get(&r.name) else {
                let names: Vec<&str> = table.enums.keys().map(String::as_str).collect();
                let suggestions = fuzzy_suggestions(&r.name, names);
                diags.push(Diagnostic::new(
                    r.span.clone(),
                    E205_INVALID_REFERENCE,
                    with_suggestion(format!("enum \"{}\" is not declared", r.name), &suggestions),
                ));
                return ConstValueType::Unknown;
            };
            if !e.members.iter().any(|m| &m.name == member) {
                diags.push(Diagnostic::new(
                    r.member_span.clone().unwrap_or_else(|| r.span.clone()),
                    E305_ENUM_MEMBER_NOT_FOUND,
                    format!("enum \"{}\" has no member \"{member}\"", r.name),
                ));
                return ConstValueType::Unknown;
            }
            match enum_effective_value_type(e, table) {
                EnumValueType::Int => ConstValueType::Int,
                EnumValueType::String => ConstValueType::String,
            }
        }
    }
}

/// A local, diagnostic-free re-derivation of an enum's effective value
/// type. Needed because constants are validated before enums (§4.3),
/// so `EnumSymbol::value_type` has not been computed yet when a constant
/// references `Enum.Member`.
fn enum_effective_value_type(e: &EnumSymbol, table: &SymbolTable) -> EnumValueType {
    let mut visiting = HashSet::new();
    let members = expand_enum_members(&e.common.name, table, &mut visiting);
    let any_int = members.iter().filter(|m| m.has_explicit_value).any(|m| m.value.parse::<i64>().is_ok());
    if any_int {
        EnumValueType::Int
    } else {
        EnumValueType::String
    }
}

fn expand_enum_members<'a>(name: &str, table: &'a SymbolTable, visiting: &mut HashSet<String>) -> Vec<&'a vdl_symbol::EnumMemberSymbol> {
    if visiting.contains(name) {
        return Vec::new();
    }
    let Some(e) = table.enums.get(name) else {
        return Vec::new();
    };
    visiting.insert(name.to_string());
    let mut out = Vec::new();
    for spread in &e.spreads {
        if spread.member.is_none() {
            out.extend(expand_enum_members(&spread.name, table, visiting));
        }
    }
    out.extend(e.members.iter());
    out
}

fn check_object_literal(obj: &ObjectLiteral, table: &SymbolTable, visiting: &mut HashSet<String>, diags: &mut Vec<Diagnostic>) {
    let mut seen: HashMap<&str, vdl_diagnostic::Span> = HashMap::new();
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
        infer_literal(&entry.value, table, visiting, diags);
    }

    for spread in &obj.spreads {
        if spread.member.is_some() {
            diags.push(Diagnostic::new(
                spread.span.clone(),
                E206_CONST_SPREAD_NOT_OBJECT,
                format!("spread \"...{}\" must reference a bare constant name, not a member", spread.name),
            ));
            continue;
        }
        if visiting.contains(&spread.name) {
            continue;
        }
        match table.consts.get(&spread.name) {
            Some(target) if matches!(target.literal, ConstLiteral::Object(_)) => {
                visiting.insert(spread.name.clone());
                if let ConstLiteral::Object(inner) = &target.literal {
                    check_object_literal(inner, table, visiting, diags);
                }
                visiting.remove(&spread.name);
            }
            _ => {
                diags.push(Diagnostic::new(
                    spread.span.clone(),
                    E206_CONST_SPREAD_NOT_OBJECT,
                    format!("spread \"...{}\" must reference a constant of object kind", spread.name),
                ));
            }
        }
    }
}

fn check_array_literal(arr: &ArrayLiteral, table: &SymbolTable, visiting: &mut HashSet<String>, diags: &mut Vec<Diagnostic>) {
    let mut element_type: Option<ConstValueType> = None;
    for el in &arr.elements {
        let vt = infer_literal(el, table, visiting, diags);
        if vt == ConstValueType::Unknown {
            continue;
        }
        match element_type {
            None => element_type = Some(vt),
            Some(expected) if expected != vt => {
                diags.push(Diagnostic::new(
                    el.span().clone(),
                    E207_CONST_ARRAY_MIXED_TYPES,
                    "array elements must share a single type".to_string(),
                ));
            }
            _ => {}
        }
    }
}

fn check_explicit_type(
    value_type: ConstValueType,
    type_name: &str,
    span: vdl_diagnostic::Span,
    table: &SymbolTable,
    diags: &mut Vec<Diagnostic>,
) {
    if let Some(prim) = PrimitiveKind::from_name(type_name) {
        let expected = match prim {
            PrimitiveKind::String | PrimitiveKind::Datetime => ConstValueType::String,
            PrimitiveKind::Int => ConstValueType::Int,
            PrimitiveKind::Float => ConstValueType::Float,
            PrimitiveKind::Bool => ConstValueType::Bool,
        };
        if value_type != expected && value_type != ConstValueType::Unknown {
            diags.push(Diagnostic::new(
                span,
                E201_TYPE_NOT_DECLARED,
                format!("value is {value_type:?}, but declared type is \"{type_name}\""),
            ));
        }
    } else if table.enums.contains_key(type_name) {
        if !matches!(value_type, ConstValueType::String | ConstValueType::Int) {
            diags.push(Diagnostic::new(
                span,
                E201_TYPE_NOT_DECLARED,
                format!("value is {value_type:?}, which cannot satisfy enum type \"{type_name}\""),
            ));
        }
    } else if table.types.contains_key(type_name) {
        // existence only
    } else {
        let pool: Vec<&str> = PrimitiveKind::ALL
            .iter()
            .copied()
            .chain(table.types.keys().map(String::as_str))
            .chain(table.enums.keys().map(String::as_str))
            .collect();
        let suggestions = fuzzy_suggestions(type_name, pool);
        diags.push(Diagnostic::new(
            span,
            E201_TYPE_NOT_DECLARED,
            with_suggestion(format!("type \"{type_name}\" is not declared"), &suggestions),
        ));
    }
}
