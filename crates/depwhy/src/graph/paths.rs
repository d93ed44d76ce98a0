//! Bounded enumeration of simple dependency paths.
//!
//! The number of simple paths in a dependency graph can grow exponentially
//! (every diamond doubles it), so enumeration is bounded two ways:
//!
//! - a **global** result budget shared by every root searched in one call
//! - an optional maximum hop depth per path
//!
//! Both budgets treat non-positive values as "unlimited".

use std::collections::HashSet;

use tracing::{debug, info};

use super::{DepGraph, Reachability};

/// Budgets for a path search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathLimits {
    max_paths: Option<usize>,
    max_depth: Option<usize>,
}

impl PathLimits {
    /// Create limits from raw settings where zero or a negative value means unlimited.
    #[must_use]
    pub fn new(max_paths: i64, max_depth: i64) -> Self {
        Self {
            max_paths: positive(max_paths),
            max_depth: positive(max_depth),
        }
    }

    /// No budget at all.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Maximum number of paths to collect, if bounded.
    #[must_use]
    pub fn max_paths(&self) -> Option<usize> {
        self.max_paths
    }

    /// Maximum number of edges in a path, if bounded.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

fn positive(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|v| *v > 0)
}

/// Accumulator for paths found by one or more searches.
///
/// The result budget lives here rather than in the search so that several
/// searches (one per root) can draw from the same budget.
#[derive(Debug, Clone, Default)]
pub struct PathCollector {
    paths: Vec<Vec<String>>,
    limit: Option<usize>,
}

impl PathCollector {
    /// Create a collector that accepts at most `limit` paths (`None` = unbounded).
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            paths: Vec::new(),
            limit,
        }
    }

    /// Returns `true` once the budget is used up.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.paths.len() >= limit)
    }

    /// Paths collected so far, in discovery order.
    #[must_use]
    pub fn paths(&self) -> &[Vec<String>] {
        &self.paths
    }

    /// Number of paths collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Consume the collector and return the paths.
    #[must_use]
    pub fn into_paths(self) -> Vec<Vec<String>> {
        self.paths
    }

    fn push(&mut self, path: Vec<String>) {
        if !self.is_full() {
            self.paths.push(path);
        }
    }
}

/// One module on the current path and how far through its successors the
/// search has got.
struct Frame<'g> {
    node: &'g str,
    successors: &'g [String],
    next: usize,
}

/// Per-call DFS state. The frame stack is the current path; the on-path set is
/// released on backtrack so a module can appear again in a sibling branch
/// reached through a different route.
struct Search<'g, 'r> {
    graph: &'g DepGraph,
    target: &'r str,
    reachable: &'r Reachability<'r>,
    max_depth: Option<usize>,
    stack: Vec<Frame<'g>>,
    on_path: HashSet<&'g str>,
}

impl<'g> Search<'g, '_> {
    /// Emit a path if `node` is the target, otherwise descend into it when the
    /// budgets and the on-path set allow.
    fn enter(&mut self, node: &'g str, out: &mut PathCollector) {
        if node == self.target {
            let mut found: Vec<String> = self.stack.iter().map(|f| f.node.to_string()).collect();
            found.push(node.to_string());
            out.push(found);
            return;
        }
        if out.is_full() || !self.reachable.contains(node) {
            return;
        }
        if self.max_depth.is_some_and(|max| self.stack.len() >= max) {
            return;
        }
        if !self.on_path.insert(node) {
            return;
        }

        self.stack.push(Frame {
            node,
            successors: self.graph.successors(node),
            next: 0,
        });
    }

    fn run(&mut self, start: &'g str, out: &mut PathCollector) {
        self.enter(start, out);

        while let Some(frame) = self.stack.last_mut() {
            let successors = frame.successors;
            let Some(next) = successors.get(frame.next) else {
                if let Some(done) = self.stack.pop() {
                    self.on_path.remove(done.node);
                }
                continue;
            };
            frame.next += 1;

            if !self.reachable.contains(next) {
                continue;
            }
            self.enter(next, out);
            if out.is_full() {
                break;
            }
        }
    }
}

/// Find simple paths from `start` to `target`, appending them to `out`.
///
/// Depth-first, following successors in the graph's stored order and skipping
/// any successor outside `reachable`. Each emitted path begins at `start`,
/// ends at `target` and never repeats a module. The search stops as soon as
/// `out` is full; with `limits.max_depth() == Some(d)` no path has more than
/// `d` edges.
pub fn find_all_paths<'g>(
    start: &'g str,
    target: &str,
    graph: &'g DepGraph,
    reachable: &Reachability<'_>,
    limits: &PathLimits,
    out: &mut PathCollector,
) {
    let mut search = Search {
        graph,
        target,
        reachable,
        max_depth: limits.max_depth(),
        stack: Vec::new(),
        on_path: HashSet::new(),
    };
    search.run(start, out);
}

/// Outcome of a multi-root path search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSearch {
    /// Paths in discovery order.
    pub paths: Vec<Vec<String>>,
    /// `true` when the result budget ran out, so more paths may exist.
    pub truncated: bool,
}

/// Enumerate paths to the reachability target from every root, sharing one budget.
///
/// Roots that cannot reach the target are skipped. Roots are searched in the
/// order given.
#[must_use]
pub fn enumerate_paths<'g, S: AsRef<str>>(
    roots: &'g [S],
    graph: &'g DepGraph,
    reachable: &Reachability<'_>,
    limits: &PathLimits,
) -> PathSearch {
    let target = reachable.target();
    let mut out = PathCollector::new(limits.max_paths());

    for root in roots {
        let root = root.as_ref();
        if !reachable.contains(root) {
            debug!(root, target, "Root cannot reach target, skipping");
            continue;
        }
        let before = out.len();
        find_all_paths(root, target, graph, reachable, limits, &mut out);
        debug!(root, found = out.len() - before, "Searched root");
        if out.is_full() {
            break;
        }
    }

    let truncated = out.is_full();
    info!(paths = out.len(), truncated, "Path enumeration completed");
    PathSearch {
        paths: out.into_paths(),
        truncated,
    }
}

/// Sort paths shortest first, ties broken by their `" -> "` joined text.
pub fn sort_paths(paths: &mut [Vec<String>]) {
    paths.sort_by_cached_key(|path| (path.len(), path.join(" -> ")));
}
