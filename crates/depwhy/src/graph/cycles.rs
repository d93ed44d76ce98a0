//! Circular dependency detection using petgraph.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::debug;

use super::DepGraph;

/// A group of modules that depend on each other in a loop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Cycle {
    /// Members of the strongly connected component, sorted.
    pub modules: Vec<String>,
}

impl Cycle {
    /// Number of modules in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always false for cycles returned by [`detect_cycles`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Find every circular dependency in the graph.
///
/// Uses Tarjan's SCC algorithm. A component is reported when it has more than
/// one member or when its single member depends on itself. Output is sorted so
/// repeated runs print the same thing.
#[must_use]
pub fn detect_cycles(graph: &DepGraph) -> Vec<Cycle> {
    let mut pg: DiGraph<&str, ()> = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::with_capacity(graph.node_count());
    for node in graph.nodes() {
        node_map.insert(node, pg.add_node(node));
    }
    for (from, to) in graph.edges() {
        pg.add_edge(node_map[from], node_map[to], ());
    }

    let mut cycles: Vec<Cycle> = tarjan_scc(&pg)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => pg.contains_edge(*single, *single),
            members => members.len() > 1,
        })
        .map(|component| {
            let mut modules: Vec<String> =
                component.iter().map(|idx| pg[*idx].to_string()).collect();
            modules.sort();
            Cycle { modules }
        })
        .collect();
    cycles.sort();

    debug!(cycles = cycles.len(), "Cycle detection completed");
    cycles
}
