//! Cycle-safe extraction of the subgraph linking roots to a target.
//!
//! Enumerating every simple path is exponential on diamond-heavy graphs. When
//! the caller only needs a picture, this module computes the union of all
//! routes in O(V + E) instead.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use super::{DepGraph, Edge, Reachability};

/// Nodes and edges lying on at least one root-to-target route.
///
/// Both sets are sorted, and the edge set never contains a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Subgraph {
    /// Modules on some route.
    pub nodes: BTreeSet<String>,
    /// Edges kept after dropping back-edges.
    pub edges: BTreeSet<Edge>,
}

impl Subgraph {
    /// Returns `true` if no root reaches the target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Active,
    Finished,
}

/// Compute the subgraph of every route from `starts` to the reachability target.
///
/// 1. Breadth-first search forward from each start that can reach the target,
///    only entering modules that can still reach it.
/// 2. Depth-first search over the edges inside that node set, visiting entry
///    points and successors in lexicographic order. An edge into a module on
///    the active stack closes a cycle and is dropped; an edge into a finished
///    module is kept (it is a reconverging diamond branch) without descending.
#[must_use]
pub fn compute_subgraph<S: AsRef<str>>(
    starts: &[S],
    graph: &DepGraph,
    reachable: &Reachability<'_>,
) -> Subgraph {
    let mut forward: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    for start in starts {
        let start = start.as_ref();
        if reachable.contains(start) && forward.insert(start) {
            queue.push_back(start);
        }
    }
    while let Some(current) = queue.pop_front() {
        for next in graph.successors(current) {
            if reachable.contains(next) && forward.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let mut nodes: Vec<&str> = forward.iter().copied().collect();
    nodes.sort_unstable();

    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::with_capacity(nodes.len());
    for &from in &nodes {
        let mut next: Vec<&str> = graph
            .successors(from)
            .iter()
            .map(String::as_str)
            .filter(|to| forward.contains(to))
            .collect();
        next.sort_unstable();
        adjacency.insert(from, next);
    }

    let edges = collect_acyclic_edges(&nodes, &adjacency);
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "Extracted path subgraph"
    );

    Subgraph {
        nodes: nodes.into_iter().map(str::to_string).collect(),
        edges,
    }
}

/// Three-colour DFS keeping tree, forward and cross edges but not back-edges.
///
/// Iterative so that long dependency chains cannot overflow the stack.
fn collect_acyclic_edges(nodes: &[&str], adjacency: &HashMap<&str, Vec<&str>>) -> BTreeSet<Edge> {
    let mut state: HashMap<&str, VisitState> = HashMap::with_capacity(nodes.len());
    let mut edges = BTreeSet::new();
    let mut stack: Vec<(&str, usize)> = Vec::new();

    for &entry in nodes {
        if state.get(entry).is_some_and(|s| *s != VisitState::Unvisited) {
            continue;
        }
        state.insert(entry, VisitState::Active);
        stack.push((entry, 0));

        while let Some(frame) = stack.last_mut() {
            let current = frame.0;
            let successors = adjacency.get(current).map_or(&[][..], Vec::as_slice);
            let Some(&next) = successors.get(frame.1) else {
                state.insert(current, VisitState::Finished);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match state.get(next).copied().unwrap_or(VisitState::Unvisited) {
                VisitState::Unvisited => {
                    edges.insert(Edge::new(current, next));
                    state.insert(next, VisitState::Active);
                    stack.push((next, 0));
                }
                VisitState::Active => {
                    // back-edge
                }
                VisitState::Finished => {
                    edges.insert(Edge::new(current, next));
                }
            }
        }
    }

    edges
}
