//! Multi-file include resolution and external docstring resolution.
//!
//! Transforms an entry path + virtual filesystem into an include-closed
//! map of parsed files, following `include` statements depth-first and
//! detecting cycles via a visiting set. Type cycles are a later concern
//! (`vdl-validate`); the only cycles caught here are among `include`
//! statements themselves.

mod docstrings;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use vdl_diagnostic::{CancellationToken, Diagnostic, Position};
use vdl_fs::{FileSystem, ReadError};
use vdl_syntax::ast::Ast;

/// One file's parsed AST plus its include closure, keyed by absolute path
/// in [`ResolveOutput::files`].
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub ast: Ast,
    /// Absolute paths of this file's direct `include` targets, in
    /// declaration order.
    pub includes: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ResolveOutput {
    pub files: HashMap<PathBuf, ResolvedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve `entry` and its full include closure. Never cancels.
pub fn resolve(fs: &dyn FileSystem, entry: &Path, cwd: &Path) -> ResolveOutput {
    resolve_with_cancellation(&CancellationToken::new(), fs, entry, cwd).unwrap_or_default()
}

/// Resolve `entry`, checking `token` before reading each file. Returns
/// `None` only when cancelled before any work began. A cancellation
/// observed mid-walk still surfaces the partial result gathered so far;
/// the resolver has no meaningful "discard" boundary shallower than the
/// whole walk (unlike `analyze`, which discards at the phase level).
pub fn resolve_with_cancellation(
    token: &CancellationToken,
    fs: &dyn FileSystem,
    entry: &Path,
    cwd: &Path,
) -> Option<ResolveOutput> {
    if token.is_cancelled() {
        return None;
    }

    let mut out = ResolveOutput::default();
    let mut visiting: Vec<PathBuf> = Vec::new();
    let entry = vdl_fs::clean(entry);
    resolve_one(token, fs, &entry, cwd, &mut visiting, &mut out);
    Some(out)
}

fn resolve_one(
    token: &CancellationToken,
    fs: &dyn FileSystem,
    path: &Path,
    cwd: &Path,
    visiting: &mut Vec<PathBuf>,
    out: &mut ResolveOutput,
) {
    if out.files.contains_key(path) {
        return;
    }

    if token.is_cancelled() {
        return;
    }

    if let Some(pos) = visiting.iter().position(|p| p == path) {
        let mut cycle: Vec<String> = visiting[pos..].iter().map(|p| p.display().to_string()).collect();
        cycle.push(path.display().to_string());
        let message = format!("circular include: {}", cycle.join(" -> "));
        out.diagnostics.push(Diagnostic::at(
            Position::start_of(path.to_path_buf()),
            vdl_diagnostic::E002_CIRCULAR_INCLUDE,
            message,
        ));
        return;
    }

    visiting.push(path.to_path_buf());

    let source = match fs.read(path) {
        Ok(source) => source,
        Err(ReadError::NotFound(_)) => {
            out.diagnostics.push(Diagnostic::at(
                Position::start_of(path.to_path_buf()),
                vdl_diagnostic::E001_FILE_NOT_FOUND,
                format!("file not found: {}", path.display()),
            ));
            visiting.pop();
            return;
        }
        Err(ReadError::Io { path, source }) => {
            out.diagnostics.push(Diagnostic::at(
                Position::start_of(path.clone()),
                vdl_diagnostic::E004_FILE_READ_ERROR,
                format!("error reading {}: {source}", path.display()),
            ));
            visiting.pop();
            return;
        }
    };

    let mut ast = match vdl_syntax::parse(path, &source) {
        Ok(ast) => ast,
        Err(err) => {
            out.diagnostics
                .push(Diagnostic::at(err.position, vdl_diagnostic::E005_PARSE_ERROR, err.message));
            visiting.pop();
            return;
        }
    };

    docstrings::resolve_external_docstrings(fs, path, cwd, &mut ast, &mut out.diagnostics);

    let includes: Vec<PathBuf> = ast
        .includes
        .iter()
        .map(|inc| vdl_fs::resolve(Some(path), &inc.path, cwd))
        .collect();

    for child in &includes {
        resolve_one(token, fs, child, cwd, visiting, out);
    }

    out.files.insert(
        path.to_path_buf(),
        ResolvedFile {
            path: path.to_path_buf(),
            ast,
            includes,
        },
    );

    visiting.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;
    use std::sync::Mutex;

    struct FakeFs(Mutex<StdHashMap<PathBuf, String>>);

    impl FakeFs {
        fn new(files: &[(&str, &str)]) -> Self {
            let mut map = StdHashMap::new();
            for (path, contents) in files {
                map.insert(PathBuf::from(*path), contents.to_string());
            }
            Self(Mutex::new(map))
        }
    }

    impl FileSystem for FakeFs {
        fn read(&self, path: &Path) -> Result<String, ReadError> {
            self.0
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| ReadError::NotFound(path.to_path_buf()))
        }
    }

    #[test]
    fn simple_include_closure_has_no_diagnostics() {
        let fs = FakeFs::new(&[
            ("/main.vdl", "include \"./models.vdl\"\ntype User {\n  name: string\n}"),
            ("/models.vdl", "type BaseEntity { id: string }"),
        ]);
        let out = resolve(&fs, Path::new("/main.vdl"), Path::new("/"));
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.files.len(), 2);
        assert!(out.files.contains_key(&PathBuf::from("/models.vdl")));
    }

    #[test]
    fn circular_include_is_reported_with_partial_results() {
        let fs = FakeFs::new(&[("/a.vdl", "include \"./b.vdl\""), ("/b.vdl", "include \"./a.vdl\"")]);
        let out = resolve(&fs, Path::new("/a.vdl"), Path::new("/"));
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.code == vdl_diagnostic::E002_CIRCULAR_INCLUDE));
        assert!(!out.files.is_empty());
    }

    #[test]
    fn missing_entry_file_reports_e001() {
        let fs = FakeFs::new(&[]);
        let out = resolve(&fs, Path::new("/missing.vdl"), Path::new("/"));
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, vdl_diagnostic::E001_FILE_NOT_FOUND);
        assert!(out.files.is_empty());
    }

    #[test]
    fn diamond_include_resolves_once() {
        let fs = FakeFs::new(&[
            ("/main.vdl", "include \"./a.vdl\"\ninclude \"./b.vdl\""),
            ("/a.vdl", "include \"./shared.vdl\""),
            ("/b.vdl", "include \"./shared.vdl\""),
            ("/shared.vdl", "type Shared { id: string }"),
        ]);
        let out = resolve(&fs, Path::new("/main.vdl"), Path::new("/"));
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.files.len(), 4);
    }

    #[test]
    fn cancelled_before_start_returns_none() {
        let fs = FakeFs::new(&[("/main.vdl", "type A {}")]);
        let token = CancellationToken::new();
        token.cancel();
        assert!(resolve_with_cancellation(&token, &fs, Path::new("/main.vdl"), Path::new("/")).is_none());
    }
}
