//! Reading dependency graphs from `go mod graph`-style text.
//!
//! Each non-empty line holds one edge as two whitespace-separated module
//! identifiers: `<from> <to>`. Lines starting with `#` are comments. Module
//! identifiers are kept exactly as written, version suffixes included.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::DepGraph;

/// Source name that means "read from standard input".
pub const STDIN_SOURCE: &str = "-";

/// Parse graph text into a [`DepGraph`].
///
/// # Errors
///
/// Returns [`Error::Parse`] for a line that does not have exactly two fields.
pub fn parse_mod_graph(input: &str) -> Result<DepGraph> {
    let mut graph = DepGraph::new();
    let mut duplicates = 0usize;

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(from), Some(to), None) = (fields.next(), fields.next(), fields.next()) else {
            let found = line.split_whitespace().count();
            return Err(Error::parse(
                index + 1,
                format!("expected 2 fields, found {found}"),
            ));
        };

        if !graph.add_edge(from, to) {
            duplicates += 1;
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        duplicates,
        "Parsed dependency graph"
    );
    Ok(graph)
}

/// Read and parse a graph from a file, or from stdin when `source` is `-`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source cannot be read and [`Error::Parse`] if
/// its contents are malformed.
pub fn read_graph(source: &Path) -> Result<DepGraph> {
    let content = if source.as_os_str() == STDIN_SOURCE {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("cannot read graph file {}: {e}", source.display()),
            ))
        })?
    };
    parse_mod_graph(&content)
}
