//! Longest dependency chain ("max depth") computation.
//!
//! The walk is iterative with an explicit frame stack, so chains far deeper
//! than the thread stack are fine. The memo stores one link per module (the
//! chosen successor and the chain length) instead of a copy of every chain,
//! which keeps a chain of `n` modules linear in time and memory.

use std::collections::{HashMap, HashSet};

use super::DepGraph;

/// One maximal successor chain, starting module first.
pub type Chain<'g> = Vec<&'g str>;

/// Resolved chain for one module: its length and the successor it continues with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink<'g> {
    /// Modules in the chain, this one included.
    pub len: usize,
    /// The successor the chain continues with, `None` at the end of the chain.
    pub next: Option<&'g str>,
}

/// Resolved chains by module. A missing entry means "not resolved yet", which
/// is distinct from a resolved chain of any length.
pub type ChainMemo<'g> = HashMap<&'g str, ChainLink<'g>>;

struct Frame<'g> {
    node: &'g str,
    successors: &'g [String],
    next: usize,
    best: Option<&'g str>,
    best_len: usize,
}

impl<'g> Frame<'g> {
    fn offer(&mut self, successor: &'g str, len: usize) {
        if len > self.best_len {
            self.best_len = len;
            self.best = Some(successor);
        }
    }
}

struct Walk<'g, 'm> {
    graph: &'g DepGraph,
    memo: &'m mut ChainMemo<'g>,
    stack: Vec<Frame<'g>>,
    active: HashSet<&'g str>,
}

impl<'g> Walk<'g, '_> {
    /// Length of `node`'s chain if it is known without descending, otherwise
    /// push a frame for it and return `None`. An active module yields `0`.
    fn enter(&mut self, node: &'g str) -> Option<usize> {
        if let Some(link) = self.memo.get(node) {
            return Some(link.len);
        }

        let successors = self.graph.successors(node);
        if successors.is_empty() {
            self.memo.insert(node, ChainLink { len: 1, next: None });
            return Some(1);
        }

        if !self.active.insert(node) {
            return Some(0);
        }
        self.stack.push(Frame {
            node,
            successors,
            next: 0,
            best: None,
            best_len: 0,
        });
        None
    }

    fn resolve(&mut self, root: &'g str) -> usize {
        if let Some(len) = self.enter(root) {
            return len;
        }

        let mut resolved = 0;
        while let Some(frame) = self.stack.last_mut() {
            let successors = frame.successors;
            let Some(next) = successors.get(frame.next) else {
                let Some(done) = self.stack.pop() else { break };
                self.active.remove(done.node);
                let len = done.best_len + 1;
                self.memo.insert(
                    done.node,
                    ChainLink {
                        len,
                        next: done.best,
                    },
                );
                match self.stack.last_mut() {
                    Some(parent) => parent.offer(done.node, len),
                    None => resolved = len,
                }
                continue;
            };
            frame.next += 1;

            let next = next.as_str();
            if let Some(len) = self.enter(next) {
                if let Some(parent) = self.stack.last_mut() {
                    parent.offer(next, len);
                }
            }
        }
        resolved
    }
}

/// Length of `node`'s longest chain, filling `memo` along the way.
fn resolve_len<'g>(node: &'g str, graph: &'g DepGraph, memo: &mut ChainMemo<'g>) -> usize {
    Walk {
        graph,
        memo,
        stack: Vec::new(),
        active: HashSet::new(),
    }
    .resolve(node)
}

/// Compute the longest acyclic successor chain starting at `node`.
///
/// Reaching a module that is an ancestor on the current walk means a cycle:
/// that branch counts as empty and leaves the module unresolved in `memo`, so
/// a later query from a non-cyclic root can still compute it. When several
/// successors give chains of equal length, the first one in successor order
/// wins. `memo` can be shared across queries on the same graph.
pub fn longest_chain<'g>(
    node: &'g str,
    graph: &'g DepGraph,
    memo: &mut ChainMemo<'g>,
) -> Chain<'g> {
    resolve_len(node, graph, memo);

    let mut chain = Vec::new();
    let mut current = Some(node);
    while let Some(module) = current {
        let Some(link) = memo.get(module) else { break };
        chain.push(module);
        current = link.next;
    }
    chain
}

/// Length of the longest chain starting at `root`, counted in modules.
///
/// A root with no dependencies counts as one.
#[must_use]
pub fn max_depth(root: &str, graph: &DepGraph) -> usize {
    resolve_len(root, graph, &mut ChainMemo::new())
}
