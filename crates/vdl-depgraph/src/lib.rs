//! A concurrent, bidirectional dependency graph consumed by the LSP
//! driver (§4.5): tracks which files include which, so that editing one
//! file can trigger re-analysis of everything that depends on it.
//!
//! Modeled the way the reference monorepo's analysis-graph crate models
//! module dependencies: a `petgraph::DiGraph` plus a path → `NodeIndex`
//! map for fast lookup, here wrapped in a single reader-writer lock
//! since the graph (unlike the teacher's, which is rebuilt wholesale
//! per analysis) is mutated incrementally by concurrent LSP handlers.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

#[derive(Debug, Default)]
struct Inner {
    graph: DiGraph<PathBuf, ()>,
    nodes: HashMap<PathBuf, NodeIndex>,
}

impl Inner {
    fn node(&mut self, path: &Path) -> NodeIndex {
        if let Some(&id) = self.nodes.get(path) {
            return id;
        }
        let id = self.graph.add_node(path.to_path_buf());
        self.nodes.insert(path.to_path_buf(), id);
        id
    }
}

/// A bidirectional graph of `include` edges, guarded by a single
/// reader-writer lock (§4.5's concurrency requirement).
#[derive(Debug, Default)]
pub struct DependencyGraph {
    inner: RwLock<Inner>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace `file`'s outgoing edges with `new_children`.
    /// Idempotent: calling twice with the same arguments leaves the
    /// graph in the same state as calling once.
    pub fn update_dependencies(&self, file: &Path, new_children: &[PathBuf]) {
        let mut inner = self.inner.write().unwrap();
        let from = inner.node(file);

        let stale: Vec<_> = inner
            .graph
            .edges_directed(from, Direction::Outgoing)
            .map(|e| e.id())
            .collect();
        for edge in stale {
            inner.graph.remove_edge(edge);
        }

        for child in new_children {
            let to = inner.node(child);
            if !inner.graph.contains_edge(from, to) {
                inner.graph.add_edge(from, to, ());
            }
        }
    }

    /// Direct parents of `file` — files whose `includes` name it.
    pub fn get_dependents(&self, file: &Path) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let Some(&id) = inner.nodes.get(file) else { return Vec::new() };
        inner
            .graph
            .neighbors_directed(id, Direction::Incoming)
            .map(|n| inner.graph[n].clone())
            .collect()
    }

    /// Transitive closure of dependents, breadth-first, excluding
    /// `file` itself; cycles are broken by a visited set.
    pub fn get_all_dependents(&self, file: &Path) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let Some(&start) = inner.nodes.get(file) else { return Vec::new() };

        let mut visited = HashSet::new();
        visited.insert(start);
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(start);
        let mut out = Vec::new();

        while let Some(id) = queue.pop_front() {
            for parent in inner.graph.neighbors_directed(id, Direction::Incoming) {
                if visited.insert(parent) {
                    out.push(inner.graph[parent].clone());
                    queue.push_back(parent);
                }
            }
        }
        out
    }

    /// Drop both outgoing and incoming edges for `file`, removing it
    /// from the graph entirely.
    pub fn remove_file(&self, file: &Path) {
        let mut inner = self.inner.write().unwrap();
        let Some(id) = inner.nodes.remove(file) else { return };

        let last_index = inner.graph.node_count().checked_sub(1).map(NodeIndex::new);
        inner.graph.remove_node(id);

        // `remove_node` swap-removes: the node that used to sit at
        // `last_index` now lives at `id`. Repoint its path entry.
        if let Some(last_index) = last_index {
            if last_index != id {
                if let Some(moved_path) = inner.graph.node_weight(id).cloned() {
                    inner.nodes.insert(moved_path, id);
                }
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.graph.clear();
        inner.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn paths(v: &[&str]) -> Vec<PathBuf> {
        v.iter().map(PathBuf::from).collect()
    }

    fn as_set(v: Vec<PathBuf>) -> HashSet<PathBuf> {
        v.into_iter().collect()
    }

    #[test]
    fn direct_dependents_sees_only_immediate_parents() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl"]));
        g.update_dependencies(Path::new("/b.vdl"), &paths(&["/c.vdl"]));

        assert_eq!(as_set(g.get_dependents(Path::new("/b.vdl"))), as_set(paths(&["/a.vdl"])));
        assert_eq!(as_set(g.get_dependents(Path::new("/c.vdl"))), as_set(paths(&["/b.vdl"])));
        assert!(g.get_dependents(Path::new("/a.vdl")).is_empty());
    }

    #[test]
    fn transitive_dependents_excludes_the_starting_node() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl"]));
        g.update_dependencies(Path::new("/b.vdl"), &paths(&["/c.vdl"]));

        let all = as_set(g.get_all_dependents(Path::new("/c.vdl")));
        assert_eq!(all, as_set(paths(&["/a.vdl", "/b.vdl"])));
        assert!(!all.contains(&PathBuf::from("/c.vdl")));
    }

    #[test]
    fn transitive_dependents_breaks_cycles() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl"]));
        g.update_dependencies(Path::new("/b.vdl"), &paths(&["/a.vdl"]));

        let all = g.get_all_dependents(Path::new("/a.vdl"));
        assert_eq!(as_set(all), as_set(paths(&["/b.vdl"])));
    }

    #[test]
    fn update_dependencies_is_idempotent() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl", "/c.vdl"]));
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl", "/c.vdl"]));

        assert_eq!(as_set(g.get_dependents(Path::new("/b.vdl"))), as_set(paths(&["/a.vdl"])));
        assert_eq!(as_set(g.get_dependents(Path::new("/c.vdl"))), as_set(paths(&["/a.vdl"])));
    }

    #[test]
    fn update_dependencies_drops_edges_no_longer_present() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl"]));
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/c.vdl"]));

        assert!(g.get_dependents(Path::new("/b.vdl")).is_empty());
        assert_eq!(as_set(g.get_dependents(Path::new("/c.vdl"))), as_set(paths(&["/a.vdl"])));
    }

    #[test]
    fn remove_file_restores_pre_registration_state() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl"]));
        g.remove_file(Path::new("/a.vdl"));

        assert!(g.get_dependents(Path::new("/b.vdl")).is_empty());
        assert!(g.get_all_dependents(Path::new("/b.vdl")).is_empty());
    }

    #[test]
    fn remove_file_does_not_corrupt_other_nodes_after_index_swap() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/x.vdl"]));
        g.update_dependencies(Path::new("/b.vdl"), &paths(&["/x.vdl"]));
        g.update_dependencies(Path::new("/c.vdl"), &paths(&["/x.vdl"]));

        g.remove_file(Path::new("/a.vdl"));

        assert_eq!(as_set(g.get_dependents(Path::new("/x.vdl"))), as_set(paths(&["/b.vdl", "/c.vdl"])));
    }

    #[test]
    fn clear_empties_the_graph() {
        let g = DependencyGraph::new();
        g.update_dependencies(Path::new("/a.vdl"), &paths(&["/b.vdl"]));
        g.clear();
        assert!(g.get_dependents(Path::new("/b.vdl")).is_empty());
    }
}
