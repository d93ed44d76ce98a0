//! "Why is this module here?" analysis.
//!
//! Ties the traversal engine together: checks that the target is a
//! dependency of the roots, runs reverse reachability once, then either
//! enumerates bounded paths (for lists) or extracts the route subgraph (for
//! pictures).

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::DependencyClassifier;
use crate::error::{Error, Result};
use crate::graph::{
    compute_reachability, compute_subgraph, enumerate_paths, sort_paths, DepGraph, PathLimits,
    Subgraph,
};
use crate::overview::DependencyOverview;

/// Default number of paths searched before the result is marked truncated.
pub const DEFAULT_MAX_PATHS: i64 = 1000;

/// How the routes to the target should be computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WhyMode {
    /// Enumerate individual simple paths, bounded by [`PathLimits`].
    #[default]
    Paths,
    /// Compute the union of all routes without enumerating them.
    Subgraph,
}

/// Settings for one why analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhyOptions {
    /// Path count and hop depth budgets.
    pub limits: PathLimits,
    /// Enumeration or subgraph extraction.
    pub mode: WhyMode,
}

impl Default for WhyOptions {
    fn default() -> Self {
        Self {
            limits: PathLimits::new(DEFAULT_MAX_PATHS, 0),
            mode: WhyMode::Paths,
        }
    }
}

/// One route from a root to the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhyPath {
    /// Modules from root to target, inclusive.
    pub path: Vec<String>,
    /// `true` when a root depends on the target directly.
    pub direct: bool,
}

/// Result of a why analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhyReport {
    /// The module being explained.
    pub target: String,
    /// Whether the target is a dependency of the roots at all.
    pub found: bool,
    /// Whether the target is only needed by tests (and so was not traversed).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub test_only: bool,
    /// Routes to the target, shortest first. Empty in subgraph mode.
    pub paths: Vec<WhyPath>,
    /// Modules that depend on the target directly, sorted.
    pub direct_dependents: Vec<String>,
    /// The roots searched from.
    pub roots: Vec<String>,
    /// `true` when the path budget ran out before the search finished.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    /// Number of paths found, or the edge count in subgraph mode.
    #[serde(skip_serializing_if = "is_zero")]
    pub total_paths: usize,
    /// Route subgraph, present in subgraph mode.
    #[serde(skip)]
    pub subgraph: Option<Subgraph>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl WhyReport {
    fn new(target: &str, roots: &[String]) -> Self {
        Self {
            target: target.to_string(),
            roots: roots.to_vec(),
            ..Self::default()
        }
    }

    /// Returns `true` if a root depends on `module` directly.
    #[must_use]
    pub fn is_root(&self, module: &str) -> bool {
        self.roots.iter().any(|r| r == module)
    }

    /// Returns `true` if the report has at least one route to show: a path in
    /// path mode, or a non-empty subgraph in subgraph mode.
    #[must_use]
    pub fn has_routes(&self) -> bool {
        self.subgraph
            .as_ref()
            .map_or(!self.paths.is_empty(), |subgraph| !subgraph.nodes.is_empty())
    }
}

/// Explain why `target` is a dependency of `roots`.
///
/// A target that is not a dependency, or that `classifier` marks as
/// test-only, yields a report with no paths rather than an error.
///
/// # Errors
///
/// Returns [`Error::Config`] if `roots` is empty.
pub fn analyze_why(
    graph: &DepGraph,
    roots: &[String],
    target: &str,
    options: &WhyOptions,
    classifier: Option<&dyn DependencyClassifier>,
) -> Result<WhyReport> {
    if roots.is_empty() {
        return Err(Error::Config(
            "no root modules to search from; pass --root or check exclusions".to_string(),
        ));
    }

    let mut report = WhyReport::new(target, roots);

    if classifier.is_some_and(|c| c.is_test_only(target)) {
        info!(target, "Target is test-only, skipping path search");
        report.found = true;
        report.test_only = true;
        return Ok(report);
    }

    let overview = DependencyOverview::compute(graph, roots);
    if !overview.contains(target) {
        warn!(target, "Target is not a dependency of the root modules");
        return Ok(report);
    }
    report.found = true;
    report.direct_dependents = graph
        .dependents_of(target)
        .into_iter()
        .map(str::to_string)
        .collect();

    let reachable = compute_reachability(target, graph);

    match options.mode {
        WhyMode::Subgraph => {
            let subgraph = compute_subgraph(roots, graph, &reachable);
            info!(
                nodes = subgraph.nodes.len(),
                edges = subgraph.edges.len(),
                "Computed route subgraph"
            );
            report.total_paths = subgraph.edges.len();
            report.subgraph = Some(subgraph);
        }
        WhyMode::Paths => {
            let mut search = enumerate_paths(roots, graph, &reachable, &options.limits);
            sort_paths(&mut search.paths);
            report.truncated = search.truncated;
            report.paths = search
                .paths
                .into_iter()
                .map(|path| WhyPath {
                    direct: path.len() == 2 && roots.contains(&path[0]),
                    path,
                })
                .collect();
            report.total_paths = report.paths.len();
        }
    }

    Ok(report)
}
