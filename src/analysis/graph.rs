use crate::model::SourceFile;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Whole-project dependency graph over scanned files.
///
/// Nodes are project-relative paths in scan order. `depends_on` holds the
/// distinct resolved local imports of a node in first-import order;
/// `dependents` is its exact inverse, filled in only after every forward
/// edge exists.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
    depends_on: Vec<Vec<NodeIndex>>,
    dependents: Vec<Vec<NodeIndex>>,
}

impl DependencyGraph {
    pub fn build(files: &[SourceFile]) -> Self {
        let mut graph = DiGraph::with_capacity(files.len(), 0);
        let mut node_indices = HashMap::with_capacity(files.len());

        for file in files {
            let idx = graph.add_node(file.path.clone());
            node_indices.insert(file.path.clone(), idx);
        }

        // Pass 1: forward edges for every node.
        let mut depends_on: Vec<Vec<NodeIndex>> = vec![Vec::new(); files.len()];
        for file in files {
            let Some(&from) = node_indices.get(&file.path) else {
                continue;
            };
            for target in file.imports.iter().filter_map(|i| i.resolved_target.as_ref()) {
                let Some(&to) = node_indices.get(target) else {
                    continue;
                };
                let edges = &mut depends_on[from.index()];
                if !edges.contains(&to) {
                    edges.push(to);
                    graph.add_edge(from, to, ());
                }
            }
        }

        // Pass 2: invert, once the forward relation is complete.
        let mut dependents: Vec<Vec<NodeIndex>> = vec![Vec::new(); files.len()];
        for (from, targets) in depends_on.iter().enumerate() {
            for to in targets {
                dependents[to.index()].push(NodeIndex::new(from));
            }
        }

        Self {
            graph,
            node_indices,
            depends_on,
            dependents,
        }
    }

    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    fn index_of(&self, path: &str) -> Option<NodeIndex> {
        self.node_indices.get(path).copied()
    }

    pub fn path(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn depends_on_indices(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.depends_on[idx.index()]
    }

    pub fn depends_on(&self, path: &str) -> Vec<&str> {
        self.lookup(path, &self.depends_on)
    }

    pub fn dependents(&self, path: &str) -> Vec<&str> {
        self.lookup(path, &self.dependents)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    fn lookup<'a>(&'a self, path: &str, adjacency: &'a [Vec<NodeIndex>]) -> Vec<&'a str> {
        match self.index_of(path) {
            Some(idx) => adjacency[idx.index()]
                .iter()
                .map(|n| self.graph[*n].as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}
