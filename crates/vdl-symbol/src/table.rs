//! The global symbol table: one flat namespace per kind, filled in by
//! the collector and then linked up by the validator pipeline.

use crate::symbol::{ConstSymbol, DocSymbol, EnumSymbol, PatternSymbol, TypeSymbol};
use std::collections::HashMap;
use vdl_diagnostic::{
    Diagnostic, Position, E801_DUPLICATE_TYPE, E802_DUPLICATE_ENUM, E803_DUPLICATE_CONST,
};

#[derive(Debug, Default)]
pub struct SymbolTable {
    pub types: HashMap<String, TypeSymbol>,
    pub enums: HashMap<String, EnumSymbol>,
    pub consts: HashMap<String, ConstSymbol>,
    pub patterns: HashMap<String, PatternSymbol>,
    pub standalone_docs: Vec<DocSymbol>,
}

fn duplicate_message(kind: &str, name: &str, first: &Position) -> String {
    format!(
        "{kind} \"{name}\" is already declared at {}:{}:{}",
        first.filename.display(),
        first.line,
        first.column
    )
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type symbol. The first declaration always wins; a
    /// second same-kind declaration produces an `E801` pointing at the
    /// new occurrence and naming the first.
    pub fn register_type(&mut self, symbol: TypeSymbol, diags: &mut Vec<Diagnostic>) {
        if let Some(existing) = self.types.get(&symbol.common.name) {
            diags.push(Diagnostic::new(
                symbol.common.span(),
                E801_DUPLICATE_TYPE,
                duplicate_message("type", &symbol.common.name, &existing.common.start),
            ));
            return;
        }
        self.types.insert(symbol.common.name.clone(), symbol);
    }

    pub fn register_enum(&mut self, symbol: EnumSymbol, diags: &mut Vec<Diagnostic>) {
        if let Some(existing) = self.enums.get(&symbol.common.name) {
            diags.push(Diagnostic::new(
                symbol.common.span(),
                E802_DUPLICATE_ENUM,
                duplicate_message("enum", &symbol.common.name, &existing.common.start),
            ));
            return;
        }
        self.enums.insert(symbol.common.name.clone(), symbol);
    }

    pub fn register_const(&mut self, symbol: ConstSymbol, diags: &mut Vec<Diagnostic>) {
        if let Some(existing) = self.consts.get(&symbol.common.name) {
            diags.push(Diagnostic::new(
                symbol.common.span(),
                E803_DUPLICATE_CONST,
                duplicate_message("const", &symbol.common.name, &existing.common.start),
            ));
            return;
        }
        self.consts.insert(symbol.common.name.clone(), symbol);
    }

    /// Patterns are not part of the global-uniqueness cross-kind check
    /// (the spec scopes that pass to types/enums/consts) but still
    /// reject same-kind duplicates, consistent with every other
    /// registration method.
    pub fn register_pattern(&mut self, symbol: PatternSymbol, diags: &mut Vec<Diagnostic>) {
        if let Some(existing) = self.patterns.get(&symbol.common.name) {
            diags.push(Diagnostic::new(
                symbol.common.span(),
                E803_DUPLICATE_CONST,
                duplicate_message("pattern", &symbol.common.name, &existing.common.start),
            ));
            return;
        }
        self.patterns.insert(symbol.common.name.clone(), symbol);
    }

    pub fn add_standalone_doc(&mut self, doc: DocSymbol) {
        self.standalone_docs.push(doc);
    }

    /// All names currently known across types and enums — the
    /// candidate pool for field-type suggestions.
    pub fn type_and_enum_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str).chain(self.enums.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::*;
    use std::path::PathBuf;
    use vdl_diagnostic::Position;

    fn common(name: &str, line: u32) -> SymbolCommon {
        let pos = Position::new(PathBuf::from("a.vdl"), line, 1, 0);
        SymbolCommon {
            name: name.to_string(),
            declaring_file: PathBuf::from("a.vdl"),
            start: pos.clone(),
            end: pos,
            resolved_docstring: None,
            annotations: Vec::new(),
        }
    }

    fn dummy_type(name: &str, line: u32) -> TypeSymbol {
        TypeSymbol {
            common: common(name, line),
            fields: Vec::new(),
            spreads: Vec::new(),
            ast: vdl_syntax::ast::TypeDecl {
                name: name.to_string(),
                name_span: vdl_diagnostic::Span::point(common(name, line).start),
                fields: Vec::new(),
                spreads: Vec::new(),
                docstring: None,
                annotations: Vec::new(),
                span: vdl_diagnostic::Span::point(Position::new(PathBuf::from("a.vdl"), line, 1, 0)),
            },
        }
    }

    #[test]
    fn first_registration_wins_and_second_emits_duplicate() {
        let mut table = SymbolTable::new();
        let mut diags = Vec::new();
        table.register_type(dummy_type("User", 1), &mut diags);
        table.register_type(dummy_type("User", 10), &mut diags);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E801_DUPLICATE_TYPE);
        assert_eq!(table.types["User"].common.start.line, 1);
    }
}
