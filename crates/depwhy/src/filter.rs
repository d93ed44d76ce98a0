//! Module exclusion by wildcard pattern.
//!
//! Patterns match whole module identifiers. `*` matches any run of characters
//! (including none); every other character matches itself.

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::DepGraph;

/// A set of exclusion patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    patterns: Vec<String>,
}

impl ExcludeSet {
    /// Build a set from raw patterns. Empty patterns are ignored.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if there are no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns `true` if `module` matches any pattern.
    #[must_use]
    pub fn matches(&self, module: &str) -> bool {
        self.patterns.iter().any(|p| wildcard_match(p, module))
    }

    /// Copy of `graph` without the excluded modules and their edges.
    #[must_use]
    pub fn apply(&self, graph: &DepGraph) -> DepGraph {
        if self.is_empty() {
            return graph.clone();
        }
        let filtered = graph.retain_nodes(|node| !self.matches(node));
        debug!(
            removed = graph.node_count() - filtered.node_count(),
            "Applied module exclusions"
        );
        filtered
    }

    /// Roots that survive the exclusions, in their original order.
    #[must_use]
    pub fn retain_roots(&self, roots: &[String]) -> Vec<String> {
        roots.iter().filter(|r| !self.matches(r)).cloned().collect()
    }
}

/// Apply `excludes` to both the graph and the root list.
///
/// # Errors
///
/// Returns [`Error::Config`] if every root was excluded (or none were given).
pub fn apply_exclusions(
    graph: &DepGraph,
    roots: &[String],
    excludes: &ExcludeSet,
) -> Result<(DepGraph, Vec<String>)> {
    let kept = excludes.retain_roots(roots);
    if kept.is_empty() {
        return Err(Error::Config(
            "no root modules remain after exclusions; adjust --exclude or --root".to_string(),
        ));
    }
    Ok((excludes.apply(graph), kept))
}

/// Match `text` against `pattern` where `*` matches any substring.
///
/// Greedy with single-star backtracking, linear in practice.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.as_bytes();
    let text = text.as_bytes();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&b| b == b'*')
}
