//! Thread-safe virtual filesystem: an in-memory overlay over disk.
//!
//! Reads fall back to disk on a cache miss and populate the cache;
//! an explicit [`CachedFileSystem::write`] (an editor buffer) always
//! wins over whatever is on disk until [`CachedFileSystem::remove`]
//! reverts to disk fallback. There is no transaction semantics beyond
//! that — matching the LSP's "editor buffers win" contract.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read-capable filesystem, as consumed by the resolver. Implemented
/// by [`CachedFileSystem`]; tests substitute an in-memory-only fake.
pub trait FileSystem {
    fn read(&self, path: &Path) -> Result<String, ReadError>;
}

#[derive(Default)]
pub struct CachedFileSystem {
    overlay: DashMap<PathBuf, String>,
}

impl CachedFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or overwrite) an editor buffer for `path`. Wins over
    /// disk on every subsequent read until [`Self::remove`].
    pub fn write(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.overlay.insert(path.into(), contents.into());
    }

    /// Evict `path` from the overlay; subsequent reads fall back to disk.
    pub fn remove(&self, path: &Path) {
        self.overlay.remove(path);
    }

    pub fn clear(&self) {
        self.overlay.clear();
    }
}

impl FileSystem for CachedFileSystem {
    fn read(&self, path: &Path) -> Result<String, ReadError> {
        if let Some(contents) = self.overlay.get(path) {
            return Ok(contents.clone());
        }

        debug!(path = %path.display(), "cache miss, falling back to disk");
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                self.overlay.insert(path.to_path_buf(), contents.clone());
                Ok(contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ReadError::NotFound(path.to_path_buf())),
            Err(e) => Err(ReadError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn disk_fallback_populates_the_overlay() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "type A {{}}").unwrap();

        let fs = CachedFileSystem::new();
        let contents = fs.read(file.path()).unwrap();
        assert_eq!(contents, "type A {}");
    }

    #[test]
    fn editor_write_wins_over_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "on disk").unwrap();

        let fs = CachedFileSystem::new();
        fs.write(file.path(), "in editor");
        assert_eq!(fs.read(file.path()).unwrap(), "in editor");
    }

    #[test]
    fn remove_reverts_to_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "on disk").unwrap();

        let fs = CachedFileSystem::new();
        fs.write(file.path(), "in editor");
        fs.remove(file.path());
        assert_eq!(fs.read(file.path()).unwrap(), "on disk");
    }

    #[test]
    fn missing_file_is_not_found() {
        let fs = CachedFileSystem::new();
        let err = fs.read(Path::new("/does/not/exist.vdl")).unwrap_err();
        assert!(matches!(err, ReadError::NotFound(_)));
    }
}
