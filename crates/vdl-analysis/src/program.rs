//! The final aggregate handed back to callers (§3, §4.4): a pure fold
//! of the resolved file map and the validated symbol table into one
//! snapshot. Never mutated after construction.

use std::collections::HashMap;
use std::path::PathBuf;

use vdl_symbol::{ConstSymbol, DocSymbol, EnumSymbol, PatternSymbol, SymbolTable, TypeSymbol};

/// One resolved file as it appears in a [`Program`] (§3 `File`).
#[derive(Debug, Clone)]
pub struct ProgramFile {
    pub path: PathBuf,
    pub ast: vdl_syntax::ast::Ast,
    pub includes: Vec<PathBuf>,
}

/// The always-present result of an analysis (§3, §8 invariant 1).
#[derive(Debug)]
pub struct Program {
    pub entry_point: PathBuf,
    pub files: HashMap<PathBuf, ProgramFile>,
    pub types: HashMap<String, TypeSymbol>,
    pub enums: HashMap<String, EnumSymbol>,
    pub consts: HashMap<String, ConstSymbol>,
    /// Not part of §3's literal definition, but §4.2 collects patterns
    /// into the same symbol table and §4.4 says to embed "the symbol
    /// table's maps" wholesale; kept so pattern symbols survive into
    /// the Program a caller actually holds.
    pub patterns: HashMap<String, PatternSymbol>,
    pub standalone_docs: Vec<DocSymbol>,
}

impl Program {
    /// An empty Program naming only the entry path, returned when the
    /// entry file itself could not be read (§7 fatal surface).
    pub fn empty(entry_point: PathBuf) -> Self {
        Self {
            entry_point,
            files: HashMap::new(),
            types: HashMap::new(),
            enums: HashMap::new(),
            consts: HashMap::new(),
            patterns: HashMap::new(),
            standalone_docs: Vec::new(),
        }
    }

    /// Embed a resolved file map and a collected/validated symbol table
    /// into a fresh Program (§4.4). Pure; never fails.
    pub fn build(
        entry_point: PathBuf,
        files: HashMap<PathBuf, vdl_resolver::ResolvedFile>,
        table: SymbolTable,
    ) -> Self {
        let files = files
            .into_iter()
            .map(|(path, f)| {
                (
                    path,
                    ProgramFile {
                        path: f.path,
                        ast: f.ast,
                        includes: f.includes,
                    },
                )
            })
            .collect();

        Self {
            entry_point,
            files,
            types: table.types,
            enums: table.enums,
            consts: table.consts,
            patterns: table.patterns,
            standalone_docs: table.standalone_docs,
        }
    }
}
