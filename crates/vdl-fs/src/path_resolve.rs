//! Path normalization rules shared by the resolver and the LSP.
//!
//! Absolute paths are cleaned; relative paths resolve against the
//! directory of the referencing file, or the process working directory
//! when there is no referencing file.

use std::path::{Component, Path, PathBuf};

/// Lexically clean a path: collapse `.` components, resolve `..`
/// against preceding components, and leave symlinks untouched (no
/// filesystem access happens here).
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Resolve `raw_path` as referenced from `base_file`.
///
/// * Absolute paths are cleaned and returned unchanged otherwise.
/// * Relative paths resolve against `base_file`'s parent directory, or
///   `cwd` when `base_file` is `None` (the entry point resolving its
///   own includes against nothing has no referencing file).
pub fn resolve(base_file: Option<&Path>, raw_path: &str, cwd: &Path) -> PathBuf {
    let raw = Path::new(raw_path);
    if raw.is_absolute() {
        return clean(raw);
    }

    let base_dir = match base_file {
        Some(f) => f.parent().unwrap_or(cwd),
        None => cwd,
    };
    clean(&base_dir.join(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_dot_and_dot_dot_components() {
        let cleaned = clean(Path::new("/a/b/../c/./d"));
        assert_eq!(cleaned, PathBuf::from("/a/c/d"));
    }

    #[test]
    fn relative_path_resolves_against_referencing_files_directory() {
        let resolved = resolve(Some(Path::new("/proj/src/main.vdl")), "./models.vdl", Path::new("/cwd"));
        assert_eq!(resolved, PathBuf::from("/proj/src/models.vdl"));
    }

    #[test]
    fn relative_path_resolves_against_cwd_when_base_is_empty() {
        let resolved = resolve(None, "models.vdl", Path::new("/cwd"));
        assert_eq!(resolved, PathBuf::from("/cwd/models.vdl"));
    }

    #[test]
    fn absolute_paths_pass_through_cleaned() {
        let resolved = resolve(Some(Path::new("/proj/src/main.vdl")), "/other/models.vdl", Path::new("/cwd"));
        assert_eq!(resolved, PathBuf::from("/other/models.vdl"));
    }
}
