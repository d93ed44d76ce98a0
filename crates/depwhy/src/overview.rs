//! Direct and transitive dependency lists for a set of root modules.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Serialize;

use crate::graph::DepGraph;

/// Dependencies of a root set, split by how they are pulled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyOverview {
    /// Modules a root depends on directly (roots themselves excluded), sorted.
    pub direct: Vec<String>,
    /// Modules reachable only through other dependencies, sorted.
    pub transitive: Vec<String>,
}

impl DependencyOverview {
    /// Compute the overview for `roots` over `graph`.
    #[must_use]
    pub fn compute(graph: &DepGraph, roots: &[String]) -> Self {
        let root_set: HashSet<&str> = roots.iter().map(String::as_str).collect();

        let direct: BTreeSet<&str> = roots
            .iter()
            .flat_map(|root| graph.successors(root))
            .map(String::as_str)
            .filter(|dep| !root_set.contains(dep))
            .collect();

        let mut seen: HashSet<&str> = root_set.clone();
        let mut queue: VecDeque<&str> = roots.iter().map(String::as_str).collect();
        let mut transitive: BTreeSet<&str> = BTreeSet::new();
        while let Some(current) = queue.pop_front() {
            for next in graph.successors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                    if !direct.contains(next.as_str()) {
                        transitive.insert(next);
                    }
                }
            }
        }

        Self {
            direct: direct.into_iter().map(str::to_string).collect(),
            transitive: transitive.into_iter().map(str::to_string).collect(),
        }
    }

    /// Every dependency, direct or transitive, sorted.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .direct
            .iter()
            .chain(&self.transitive)
            .cloned()
            .collect();
        all.sort();
        all
    }

    /// Returns `true` if `module` is a dependency of the roots.
    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        self.direct.binary_search_by(|d| d.as_str().cmp(module)).is_ok()
            || self
                .transitive
                .binary_search_by(|d| d.as_str().cmp(module))
                .is_ok()
    }
}
