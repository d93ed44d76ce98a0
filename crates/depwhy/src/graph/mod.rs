//! Dependency graph model and traversal engine.
//!
//! This module provides the in-memory graph and the algorithms that answer
//! "why is this module here?":
//! - Reachability pruning (who can reach the target?)
//! - Bounded simple-path enumeration (through which routes?)
//! - Cycle-safe subgraph extraction (what does the picture look like?)
//! - Longest chain computation (how deep does it go?)
//! - Cycle detection (where does the graph loop back on itself?)
//!
//! ## Design
//!
//! - The graph is a map from module to an ordered successor list; traversal
//!   order always follows that insertion order unless a component documents
//!   that it sorts.
//! - Every algorithm is total over any graph. Missing nodes, empty graphs and
//!   unreachable targets produce empty results, not errors.
//! - Per-call state (on-path markers, memo tables, colour maps) lives inside
//!   the call. Nothing is shared between invocations.

mod chain;
mod cycles;
mod paths;
mod reachability;
mod subgraph;

pub use chain::{longest_chain, max_depth, Chain, ChainLink, ChainMemo};
pub use cycles::{detect_cycles, Cycle};
pub use paths::{enumerate_paths, find_all_paths, sort_paths, PathCollector, PathLimits, PathSearch};
pub use reachability::{compute_reachability, Reachability};
pub use subgraph::{compute_subgraph, Subgraph};

use std::collections::HashMap;

use serde::Serialize;

/// A directed "depends on" edge between two modules.
///
/// Ordering is lexicographic by `from`, then `to`, so sorted collections of
/// edges render identically across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    /// The depending module.
    pub from: String,
    /// The module depended upon.
    pub to: String,
}

impl Edge {
    /// Create an edge `from -> to`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// In-memory module dependency graph.
///
/// An edge `X -> Y` means "X depends on Y". Successor lists keep the order in
/// which edges were added; a repeated edge is ignored. Nodes are remembered in
/// first-seen order, which is how callers pick a default root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepGraph {
    order: Vec<String>,
    successors: HashMap<String, Vec<String>>,
    edge_count: usize,
}

impl DepGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node without any edges. Does nothing if it already exists.
    pub fn add_node(&mut self, node: impl Into<String>) {
        let node = node.into();
        if !self.successors.contains_key(&node) {
            self.order.push(node.clone());
            self.successors.insert(node, Vec::new());
        }
    }

    /// Add the edge `from -> to`, registering both endpoints.
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> bool {
        let from = from.into();
        let to = to.into();
        self.add_node(from.clone());
        self.add_node(to.clone());

        let list = self.successors.entry(from).or_default();
        if list.contains(&to) {
            return false;
        }
        list.push(to);
        self.edge_count += 1;
        true
    }

    /// Direct dependencies of `node`, in insertion order. Empty for unknown nodes.
    #[must_use]
    pub fn successors(&self, node: &str) -> &[String] {
        self.successors.get(node).map_or(&[][..], Vec::as_slice)
    }

    /// Returns `true` if `node` appears anywhere in the graph.
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.successors.contains_key(node)
    }

    /// All nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The first node ever added, if any.
    #[must_use]
    pub fn first_node(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// All edges, grouped by source in first-seen order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().flat_map(move |from| {
            self.successors(from)
                .iter()
                .map(move |to| (from.as_str(), to.as_str()))
        })
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Modules with an edge pointing at `target`, sorted.
    #[must_use]
    pub fn dependents_of(&self, target: &str) -> Vec<&str> {
        let mut dependents: Vec<&str> = self
            .edges()
            .filter(|(_, to)| *to == target)
            .map(|(from, _)| from)
            .collect();
        dependents.sort_unstable();
        dependents.dedup();
        dependents
    }

    /// Build a copy of this graph keeping only the nodes accepted by `keep`.
    ///
    /// Edges touching a dropped node are dropped with it. Relative order of the
    /// remaining nodes and successors is preserved.
    #[must_use]
    pub fn retain_nodes(&self, keep: impl Fn(&str) -> bool) -> Self {
        let mut filtered = Self::new();
        for node in self.nodes().filter(|n| keep(n)) {
            filtered.add_node(node);
            for next in self.successors(node) {
                if keep(next) {
                    filtered.add_edge(node, next.as_str());
                }
            }
        }
        filtered
    }
}

impl<F, T> FromIterator<(F, T)> for DepGraph
where
    F: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, T)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (from, to) in iter {
            graph.add_edge(from, to);
        }
        graph
    }
}
