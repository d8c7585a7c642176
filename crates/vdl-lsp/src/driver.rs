//! The document-sync policy driver (§4.5, §5, §7). Owns the filesystem
//! cache, dependency graph, and open-document registry; issues
//! analyses and decides when to re-run them. No transport: callers
//! (a real JSON-RPC loop) push notifications in and read results back.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vdl_analysis::{analyze_with_cancellation, CancellationToken, Program};
use vdl_depgraph::DependencyGraph;
use vdl_diagnostic::Diagnostic;
use vdl_fs::CachedFileSystem;

/// The result of one analysis run, ready to publish under `path`'s URI.
pub struct AnalysisResult {
    pub path: PathBuf,
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

struct OpenDoc {
    /// Bumped on every `did_change`; a debounced task that wakes to find
    /// its generation stale means a newer edit superseded it.
    generation: u64,
    token: CancellationToken,
}

pub struct LspDriver {
    fs: Arc<CachedFileSystem>,
    graph: Arc<DependencyGraph>,
    open: Mutex<HashMap<PathBuf, OpenDoc>>,
    /// Serializes analyses: "at most one analysis runs at a time per
    /// server" (§5).
    analysis_lock: tokio::sync::Mutex<()>,
    debounce: Duration,
}

impl LspDriver {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(500))
    }

    /// As [`Self::new`], with an explicit debounce window — tests use a
    /// short one to stay fast.
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            fs: Arc::new(CachedFileSystem::new()),
            graph: Arc::new(DependencyGraph::new()),
            open: Mutex::new(HashMap::new()),
            analysis_lock: tokio::sync::Mutex::new(()),
            debounce,
        }
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// `textDocument/didOpen`: analyze immediately, no debounce, and
    /// register the file as open.
    pub async fn did_open(&self, path: PathBuf, text: String) -> Vec<AnalysisResult> {
        self.fs.write(path.clone(), text);
        let token = {
            let mut open = self.open.lock().unwrap();
            let doc = open.entry(path.clone()).or_insert_with(|| OpenDoc {
                generation: 0,
                token: CancellationToken::new(),
            });
            doc.generation += 1;
            doc.token = CancellationToken::new();
            doc.token.clone()
        };
        self.analyze_and_propagate(&path, &token, &mut HashSet::new()).await
    }

    /// `textDocument/didChange`: cancel any in-flight analysis for this
    /// file, reset the 500ms debounce timer, and analyze once it
    /// elapses without a further change. Returns an empty vector if
    /// superseded by a later change or the document was closed first.
    pub async fn did_change(&self, path: PathBuf, text: String) -> Vec<AnalysisResult> {
        self.fs.write(path.clone(), text);

        let (generation, token) = {
            let mut open = self.open.lock().unwrap();
            let doc = open.entry(path.clone()).or_insert_with(|| OpenDoc {
                generation: 0,
                token: CancellationToken::new(),
            });
            doc.token.cancel();
            doc.generation += 1;
            doc.token = CancellationToken::new();
            (doc.generation, doc.token.clone())
        };

        tokio::time::sleep(self.debounce).await;

        let still_current = {
            let open = self.open.lock().unwrap();
            matches!(open.get(&path), Some(doc) if doc.generation == generation)
        };
        if !still_current {
            return Vec::new();
        }

        self.analyze_and_propagate(&path, &token, &mut HashSet::new()).await
    }

    /// `textDocument/didClose`: evict from the cache, drop from the
    /// dependency graph, and stop tracking it as open (which clears its
    /// diagnostics from the caller's perspective — there is nothing
    /// further to publish for it).
    pub fn did_close(&self, path: &Path) {
        self.fs.remove(path);
        self.graph.remove_file(path);
        self.open.lock().unwrap().remove(path);
    }

    fn is_open(&self, path: &Path) -> bool {
        self.open.lock().unwrap().contains_key(path)
    }

    /// Run one analysis, update the dependency graph from its result,
    /// and recurse into every open dependent (§4.5's LSP integration
    /// rule), short-circuiting already-visited files to survive include
    /// cycles among open documents.
    fn analyze_and_propagate<'a>(
        &'a self,
        path: &'a Path,
        token: &'a CancellationToken,
        visited: &'a mut HashSet<PathBuf>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Vec<AnalysisResult>> + 'a>> {
        Box::pin(async move {
            if !visited.insert(path.to_path_buf()) {
                return Vec::new();
            }

            let _guard = self.analysis_lock.lock().await;
            if token.is_cancelled() {
                return Vec::new();
            }

            let Some((program, diagnostics)) = analyze_with_cancellation(token, self.fs.as_ref(), path) else {
                return Vec::new();
            };

            for file in program.files.values() {
                self.graph.update_dependencies(&file.path, &file.includes);
            }

            let mut results = vec![AnalysisResult { path: path.to_path_buf(), program, diagnostics }];

            let dependents = self.graph.get_dependents(path);
            drop(_guard);
            for dependent in dependents {
                if self.is_open(&dependent) {
                    results.extend(self.analyze_and_propagate(&dependent, token, visited).await);
                }
            }

            results
        })
    }
}

impl Default for LspDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn driver() -> LspDriver {
        LspDriver::with_debounce(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn did_open_analyzes_immediately() {
        let driver = driver();
        let results = driver.did_open(PathBuf::from("/main.vdl"), "type User { name: string }".to_string()).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].diagnostics.is_empty());
        assert!(results[0].program.types.contains_key("User"));
    }

    #[tokio::test]
    async fn did_change_debounces_and_reflects_the_latest_text() {
        let driver = driver();
        driver.did_open(PathBuf::from("/main.vdl"), "type User {}".to_string()).await;

        // Two rapid edits; only the second should actually analyze.
        let first = driver.did_change(PathBuf::from("/main.vdl"), "type User { a: string }".to_string());
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = driver.did_change(PathBuf::from("/main.vdl"), "type User { b: string }".to_string());

        let (first, second) = tokio::join!(first, second);
        assert!(first.is_empty(), "superseded edit must not publish");
        assert_eq!(second.len(), 1);
        assert!(second[0].program.types["User"].fields.iter().any(|f| f.common.name == "b"));
    }

    #[tokio::test]
    async fn did_close_evicts_cache_and_dependency_graph_entry() {
        let driver = driver();
        driver.did_open(PathBuf::from("/main.vdl"), "type User {}".to_string()).await;
        driver.did_close(Path::new("/main.vdl"));
        assert!(!driver.is_open(Path::new("/main.vdl")));
        assert!(driver.dependency_graph().get_dependents(Path::new("/main.vdl")).is_empty());
    }

    #[tokio::test]
    async fn editing_an_included_file_republishes_the_open_dependent() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.vdl");
        let b = dir.path().join("b.vdl");
        std::fs::write(&a, "type Foo {}").unwrap();
        std::fs::write(&b, format!("include \"{}\"\ntype Bar {{ f: Foo }}", a.display())).unwrap();

        let driver = driver();
        driver.did_open(a.clone(), std::fs::read_to_string(&a).unwrap()).await;
        driver.did_open(b.clone(), std::fs::read_to_string(&b).unwrap()).await;

        let results = driver.did_change(a.clone(), "type Foo { renamed: string }".to_string()).await;
        let paths: HashSet<_> = results.iter().map(|r| r.path.clone()).collect();
        assert!(paths.contains(&a));
        assert!(paths.contains(&b), "dependent open file must be re-analyzed");
    }
}
