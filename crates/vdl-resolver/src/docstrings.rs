//! External docstring resolution: a triple-quoted block whose trimmed
//! body is a single-line path ending in `.md` is replaced in place by
//! the referenced file's contents.

use std::path::Path;

use vdl_diagnostic::Diagnostic;
use vdl_fs::{FileSystem, ReadError};
use vdl_syntax::ast::{Ast, DocBlock, FieldDecl, InlineObject};

/// Walk every docstring reachable from `ast` (declarations, fields,
/// nested inline objects, and standalone blocks) and resolve the
/// external-reference ones in place.
pub fn resolve_external_docstrings(
    fs: &dyn FileSystem,
    current_file: &Path,
    cwd: &Path,
    ast: &mut Ast,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for ty in &mut ast.types {
        if let Some(doc) = &mut ty.docstring {
            resolve_one(fs, current_file, cwd, doc, diagnostics);
        }
        for field in &mut ty.fields {
            resolve_field(fs, current_file, cwd, field, diagnostics);
        }
    }
    for e in &mut ast.enums {
        if let Some(doc) = &mut e.docstring {
            resolve_one(fs, current_file, cwd, doc, diagnostics);
        }
    }
    for c in &mut ast.consts {
        if let Some(doc) = &mut c.docstring {
            resolve_one(fs, current_file, cwd, doc, diagnostics);
        }
    }
    for p in &mut ast.patterns {
        if let Some(doc) = &mut p.docstring {
            resolve_one(fs, current_file, cwd, doc, diagnostics);
        }
    }
    for doc in &mut ast.standalone_docs {
        resolve_one(fs, current_file, cwd, doc, diagnostics);
    }
}

fn resolve_field(fs: &dyn FileSystem, current_file: &Path, cwd: &Path, field: &mut FieldDecl, diagnostics: &mut Vec<Diagnostic>) {
    if let Some(doc) = &mut field.docstring {
        resolve_one(fs, current_file, cwd, doc, diagnostics);
    }
    if let vdl_syntax::ast::FieldTypeKind::Object(obj) = &mut field.ty.kind {
        resolve_inline_object(fs, current_file, cwd, obj, diagnostics);
    }
}

fn resolve_inline_object(
    fs: &dyn FileSystem,
    current_file: &Path,
    cwd: &Path,
    obj: &mut InlineObject,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for field in &mut obj.fields {
        resolve_field(fs, current_file, cwd, field, diagnostics);
    }
}

/// Returns the referenced path when `content` parses as an external
/// `.md` reference per the docstring grammar: trimmed, single-line,
/// non-empty once the (case-sensitive) `.md` suffix is removed.
fn external_reference(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if trimmed.contains('\n') || trimmed.contains('\r') {
        return None;
    }
    let stem = trimmed.strip_suffix(".md")?;
    if stem.is_empty() {
        return None;
    }
    Some(trimmed)
}

fn resolve_one(fs: &dyn FileSystem, current_file: &Path, cwd: &Path, doc: &mut DocBlock, diagnostics: &mut Vec<Diagnostic>) {
    let Some(raw_path) = external_reference(&doc.content) else {
        return;
    };
    let target = vdl_fs::resolve(Some(current_file), raw_path, cwd);

    match fs.read(&target) {
        Ok(contents) => doc.content = contents,
        Err(ReadError::NotFound(_)) => {
            diagnostics.push(Diagnostic::new(
                doc.span.clone(),
                vdl_diagnostic::E003_DOCSTRING_FILE_NOT_FOUND,
                format!("docstring references missing file: {}", target.display()),
            ));
        }
        Err(ReadError::Io { path, source }) => {
            diagnostics.push(Diagnostic::new(
                doc.span.clone(),
                vdl_diagnostic::E004_FILE_READ_ERROR,
                format!("error reading {}: {source}", path.display()),
            ));
        }
    }
}
