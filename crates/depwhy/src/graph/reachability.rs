//! Reverse reachability: which modules can reach a target?

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use super::DepGraph;

/// The set of modules with a directed path to a fixed target.
///
/// Always contains the target itself. Computed once per target and shared
/// read-only by the path enumerator and the subgraph extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability<'a> {
    target: &'a str,
    nodes: HashSet<&'a str>,
}

impl<'a> Reachability<'a> {
    /// The target this set was computed for.
    #[must_use]
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Returns `true` if `node` can reach the target.
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    /// Number of modules that can reach the target, the target included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the target is always a member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Members in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.nodes.iter().copied()
    }
}

/// Compute every module with a directed path to `target`.
///
/// Builds the reverse adjacency view once, then runs a breadth-first search
/// backward from `target`. Each node and edge is visited at most once. An
/// unknown target yields the singleton set `{target}`.
#[must_use]
pub fn compute_reachability<'a>(target: &'a str, graph: &'a DepGraph) -> Reachability<'a> {
    let mut reverse: HashMap<&str, Vec<&str>> = HashMap::new();
    for (from, to) in graph.edges() {
        reverse.entry(to).or_default().push(from);
    }

    let mut nodes = HashSet::from([target]);
    let mut queue = VecDeque::from([target]);
    while let Some(current) = queue.pop_front() {
        let Some(predecessors) = reverse.get(current) else {
            continue;
        };
        for &prev in predecessors {
            if nodes.insert(prev) {
                queue.push_back(prev);
            }
        }
    }

    debug!(target, reachable = nodes.len(), "Computed reverse reachability");
    Reachability { target, nodes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(reachable: &Reachability<'_>) -> Vec<String> {
        let mut nodes: Vec<String> = reachable.iter().map(str::to_string).collect();
        nodes.sort();
        nodes
    }

    #[test]
    fn includes_target_and_all_ancestors() {
        let graph: DepGraph = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]
            .into_iter()
            .collect();

        let reachable = compute_reachability("d", &graph);

        assert_eq!(sorted(&reachable), ["a", "b", "c", "d"]);
        assert_eq!(reachable.target(), "d");
    }

    #[test]
    fn excludes_dead_ends() {
        let graph: DepGraph = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "e")]
            .into_iter()
            .collect();

        let reachable = compute_reachability("d", &graph);

        assert_eq!(sorted(&reachable), ["a", "b", "d"]);
        assert!(!reachable.contains("c"));
        assert!(!reachable.contains("e"));
    }

    #[test]
    fn absent_target_is_singleton() {
        let graph: DepGraph = [("a", "b")].into_iter().collect();

        let reachable = compute_reachability("nowhere", &graph);

        assert_eq!(reachable.len(), 1);
        assert!(reachable.contains("nowhere"));
    }

    #[test]
    fn terminates_on_cycles() {
        let graph: DepGraph = [("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]
            .into_iter()
            .collect();

        let reachable = compute_reachability("d", &graph);

        assert_eq!(sorted(&reachable), ["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_graph_contains_only_target() {
        let graph = DepGraph::new();

        let reachable = compute_reachability("x", &graph);

        assert!(!reachable.is_empty());
        assert_eq!(sorted(&reachable), ["x"]);
    }
}
