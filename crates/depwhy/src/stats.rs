//! Dependency count and depth statistics.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::classify::{count_by_test_status, DependencyClassifier};
use crate::error::{Error, Result};
use crate::graph::{max_depth, DepGraph};
use crate::overview::DependencyOverview;

/// Dependency metrics for one set of root modules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Modules the roots depend on directly.
    #[serde(rename = "directDependencies")]
    pub direct: usize,
    /// Modules pulled in only through other dependencies.
    #[serde(rename = "transitiveDependencies")]
    pub transitive: usize,
    /// Direct plus transitive.
    #[serde(rename = "totalDependencies")]
    pub total: usize,
    /// Length of the longest chain from the first root, counted in modules.
    #[serde(rename = "maxDepthOfDependencies")]
    pub max_depth: usize,
    /// Test-only dependencies, when a classifier was supplied.
    #[serde(rename = "testOnlyDependencies", skip_serializing_if = "Option::is_none")]
    pub test_only: Option<usize>,
    /// Non-test dependencies, when a classifier was supplied.
    #[serde(rename = "nonTestOnlyDependencies", skip_serializing_if = "Option::is_none")]
    pub non_test_only: Option<usize>,
    /// Roots the snapshot was computed for.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<String>,
}

/// Compute statistics for `roots` over an already filtered graph.
///
/// # Errors
///
/// Returns [`Error::Config`] if `roots` is empty.
pub fn compute_stats(
    graph: &DepGraph,
    roots: &[String],
    classifier: Option<&dyn DependencyClassifier>,
) -> Result<StatsSnapshot> {
    let Some(first_root) = roots.first() else {
        return Err(Error::Config(
            "no root modules to compute statistics for".to_string(),
        ));
    };

    let overview = DependencyOverview::compute(graph, roots);
    let all = overview.all();

    let mut snapshot = StatsSnapshot {
        direct: overview.direct.len(),
        transitive: overview.transitive.len(),
        total: all.len(),
        max_depth: max_depth(first_root, graph),
        roots: roots.to_vec(),
        ..StatsSnapshot::default()
    };

    if let Some(classifier) = classifier {
        let (test_only, non_test_only) = count_by_test_status(&all, classifier);
        snapshot.test_only = Some(test_only);
        snapshot.non_test_only = Some(non_test_only);
    }

    debug!(
        direct = snapshot.direct,
        transitive = snapshot.transitive,
        max_depth = snapshot.max_depth,
        "Computed dependency statistics"
    );
    Ok(snapshot)
}

/// Signed difference between two snapshots (`after - before`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsDelta {
    /// Change in direct dependencies.
    #[serde(rename = "directDependencies")]
    pub direct: i64,
    /// Change in transitive dependencies.
    #[serde(rename = "transitiveDependencies")]
    pub transitive: i64,
    /// Change in total dependencies.
    #[serde(rename = "totalDependencies")]
    pub total: i64,
    /// Change in max depth.
    #[serde(rename = "maxDepthOfDependencies")]
    pub max_depth: i64,
}

#[allow(clippy::cast_possible_wrap)]
fn signed_delta(before: usize, after: usize) -> i64 {
    after as i64 - before as i64
}

impl StatsDelta {
    fn between(before: &StatsSnapshot, after: &StatsSnapshot) -> Self {
        Self {
            direct: signed_delta(before.direct, after.direct),
            transitive: signed_delta(before.transitive, after.transitive),
            total: signed_delta(before.total, after.total),
            max_depth: signed_delta(before.max_depth, after.max_depth),
        }
    }
}

/// Statistics for two root sets side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsComparison {
    /// Label of the first set.
    pub set_a: String,
    /// Label of the second set.
    pub set_b: String,
    /// Snapshot of the first set.
    pub before: StatsSnapshot,
    /// Snapshot of the second set.
    pub after: StatsSnapshot,
    /// `after - before`.
    pub delta: StatsDelta,
    /// Dependencies of the second set that the first set does not have, sorted.
    pub only_in_b: Vec<String>,
}

/// Compare dependency statistics between two root sets over the same graph.
///
/// # Errors
///
/// Returns [`Error::Config`] if either root set is empty.
pub fn compare_stats(
    graph: &DepGraph,
    roots_a: &[String],
    roots_b: &[String],
    set_a: &str,
    set_b: &str,
) -> Result<StatsComparison> {
    let before = compute_stats(graph, roots_a, None)?;
    let after = compute_stats(graph, roots_b, None)?;

    let deps_a = DependencyOverview::compute(graph, roots_a).all();
    let known: HashSet<&str> = deps_a.iter().map(String::as_str).collect();
    let only_in_b = DependencyOverview::compute(graph, roots_b)
        .all()
        .into_iter()
        .filter(|dep| !known.contains(dep.as_str()))
        .collect();

    Ok(StatsComparison {
        set_a: set_a.to_string(),
        set_b: set_b.to_string(),
        delta: StatsDelta::between(&before, &after),
        before,
        after,
        only_in_b,
    })
}
