use crate::analysis::DependencyGraph;
use crate::model::Cycle;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet, VecDeque};

/// How cycles are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CycleMode {
    /// One cycle per back edge met during a single depth-first pass.
    /// Linear time; dense components are not fully enumerated.
    #[default]
    BackEdge,
    /// One shortest witness cycle per strongly-connected component.
    Scc,
}

pub fn detect_cycles(graph: &DependencyGraph, mode: CycleMode) -> Vec<Cycle> {
    match mode {
        CycleMode::BackEdge => back_edge_cycles(graph),
        CycleMode::Scc => scc_witness_cycles(graph),
    }
}

/// Iterative DFS with an explicit recursion stack. Every node is entered at
/// most once across all starting points, so the walk is O(V + E). Results
/// are sorted by path and deduplicated.
fn back_edge_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    // Position on the current path while a node is on the stack.
    let mut stack_pos: Vec<Option<usize>> = vec![None; n];
    let mut path: Vec<NodeIndex> = Vec::new();
    let mut cycles = Vec::new();

    for start in graph.graph().node_indices() {
        if visited[start.index()] {
            continue;
        }

        visited[start.index()] = true;
        stack_pos[start.index()] = Some(0);
        path.push(start);
        let mut frames: Vec<(NodeIndex, usize)> = vec![(start, 0)];

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;
            let children = graph.depends_on_indices(node);

            if frame.1 >= children.len() {
                stack_pos[node.index()] = None;
                path.pop();
                frames.pop();
                continue;
            }

            let child = children[frame.1];
            frame.1 += 1;

            if let Some(pos) = stack_pos[child.index()] {
                let members = path[pos..]
                    .iter()
                    .map(|idx| graph.path(*idx).to_string())
                    .collect();
                cycles.extend(Cycle::from_members(members));
            } else if !visited[child.index()] {
                visited[child.index()] = true;
                stack_pos[child.index()] = Some(path.len());
                path.push(child);
                frames.push((child, 0));
            }
        }
    }

    cycles.sort();
    cycles.dedup();
    cycles
}

fn scc_witness_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let mut witnesses: Vec<Cycle> = tarjan_scc(graph.graph())
        .into_iter()
        .filter_map(|component| {
            let anchor = *component.iter().min_by_key(|idx| graph.path(**idx))?;
            let is_cyclic = component.len() > 1 || graph.graph().contains_edge(anchor, anchor);
            if !is_cyclic {
                return None;
            }
            let members: HashSet<NodeIndex> = component.into_iter().collect();
            shortest_cycle_through(graph, anchor, &members)
        })
        .collect();

    witnesses.sort();
    witnesses
}

/// BFS from `anchor` inside `members` until an edge leads back to it.
fn shortest_cycle_through(
    graph: &DependencyGraph,
    anchor: NodeIndex,
    members: &HashSet<NodeIndex>,
) -> Option<Cycle> {
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([anchor]);
    let mut seen = HashSet::from([anchor]);

    while let Some(node) = queue.pop_front() {
        for &next in graph.depends_on_indices(node) {
            if next == anchor {
                let mut chain = vec![node];
                let mut cursor = node;
                while let Some(&prev) = parent.get(&cursor) {
                    chain.push(prev);
                    cursor = prev;
                }
                chain.reverse();
                return Cycle::from_members(
                    chain.iter().map(|idx| graph.path(*idx).to_string()).collect(),
                );
            }
            if members.contains(&next) && seen.insert(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    None
}

impl std::fmt::Display for CycleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleMode::BackEdge => write!(f, "back-edge"),
            CycleMode::Scc => write!(f, "scc"),
        }
    }
}

impl std::str::FromStr for CycleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "back-edge" | "backedge" | "dfs" => Ok(CycleMode::BackEdge),
            "scc" => Ok(CycleMode::Scc),
            _ => Err(format!("Unknown cycle mode: {}", s)),
        }
    }
}
