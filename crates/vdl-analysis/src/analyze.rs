//! The public entry points (§6): resolve, collect, validate, and build
//! a [`Program`] from either an entry path or a pre-parsed AST.

use std::path::Path;

use vdl_diagnostic::{CancellationToken, Diagnostic};
use vdl_fs::FileSystem;

use crate::program::Program;
use crate::{collector, program};

/// Resolve `entry` through its include closure, collect symbols,
/// validate, and build a Program. Never cancels.
pub fn analyze(fs: &dyn FileSystem, entry: &Path) -> (Program, Vec<Diagnostic>) {
    analyze_with_cancellation(&CancellationToken::new(), fs, entry)
        .unwrap_or_else(|| (Program::empty(entry.to_path_buf()), Vec::new()))
}

/// Same as [`analyze`], checking `token` at each phase boundary (§5).
/// Returns `None` ("no result, no diagnostics") if cancelled at any
/// checkpoint; callers must discard rather than publish.
pub fn analyze_with_cancellation(
    token: &CancellationToken,
    fs: &dyn FileSystem,
    entry: &Path,
) -> Option<(Program, Vec<Diagnostic>)> {
    if token.is_cancelled() {
        return None;
    }

    let cwd = entry.parent().unwrap_or_else(|| Path::new("."));
    let resolved = vdl_resolver::resolve_with_cancellation(token, fs, entry, cwd)?;
    let mut diags = resolved.diagnostics;

    if token.is_cancelled() {
        return None;
    }

    let (mut table, collector_diags) = collector::collect(&resolved.files, token)?;
    diags.extend(collector_diags);

    if token.is_cancelled() {
        return None;
    }

    let validator_diags = vdl_validate::validate(&mut table, token)?;
    diags.extend(validator_diags);

    if token.is_cancelled() {
        return None;
    }

    let program = program::Program::build(entry.to_path_buf(), resolved.files, table);
    Some((program, diags))
}

/// Analyze a single pre-parsed AST with no include traversal (§6's
/// secondary entry point) — useful for an editor analyzing a buffer
/// that has unsaved, not-yet-resolvable includes.
pub fn analyze_ast(path: &Path, ast: vdl_syntax::ast::Ast) -> (Program, Vec<Diagnostic>) {
    analyze_ast_with_cancellation(&CancellationToken::new(), path, ast)
        .unwrap_or_else(|| (Program::empty(path.to_path_buf()), Vec::new()))
}

/// Same as [`analyze_ast`], honoring cancellation at the same
/// checkpoints as [`analyze_with_cancellation`].
pub fn analyze_ast_with_cancellation(
    token: &CancellationToken,
    path: &Path,
    ast: vdl_syntax::ast::Ast,
) -> Option<(Program, Vec<Diagnostic>)> {
    if token.is_cancelled() {
        return None;
    }

    let mut files = std::collections::HashMap::new();
    files.insert(
        path.to_path_buf(),
        vdl_resolver::ResolvedFile { path: path.to_path_buf(), ast, includes: Vec::new() },
    );

    if token.is_cancelled() {
        return None;
    }

    let (mut table, mut diags) = collector::collect(&files, token)?;

    if token.is_cancelled() {
        return None;
    }

    diags.extend(vdl_validate::validate(&mut table, token)?);

    if token.is_cancelled() {
        return None;
    }

    let program = program::Program::build(path.to_path_buf(), files, table);
    Some((program, diags))
}
