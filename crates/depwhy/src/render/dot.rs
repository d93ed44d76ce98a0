//! Graphviz DOT output for why reports.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::graph::Edge;
use crate::why::WhyReport;

const TARGET_COLOR: &str = "#ffffcc";
const ROOT_COLOR: &str = "#ccffcc";
const DEFAULT_COLOR: &str = "white";

/// Render the routes in `report` as a `strict digraph`.
///
/// Uses the report's subgraph when one was computed, otherwise the union of
/// its enumerated paths. Nodes and edges are emitted in sorted order.
#[must_use]
pub fn render_dot(report: &WhyReport) -> String {
    let (nodes, edges) = collect_elements(report);

    let mut out = String::new();
    out.push_str("strict digraph {\n");
    let _ = writeln!(
        out,
        "graph [overlap=false, label=\"Why: {}\", labelloc=t];",
        escape(&report.target)
    );
    out.push_str("node [shape=box, style=filled, fillcolor=white];\n\n");

    out.push_str("// Nodes\n");
    for node in &nodes {
        let color = if *node == report.target {
            TARGET_COLOR
        } else if report.is_root(node) {
            ROOT_COLOR
        } else {
            DEFAULT_COLOR
        };
        let _ = writeln!(out, "\"{}\" [fillcolor=\"{color}\"];", escape(node));
    }
    out.push('\n');

    out.push_str("// Edges\n");
    for edge in &edges {
        let _ = writeln!(out, "\"{}\" -> \"{}\";", escape(&edge.from), escape(&edge.to));
    }
    out.push_str("}\n");
    out
}

pub(super) fn collect_elements(report: &WhyReport) -> (BTreeSet<String>, BTreeSet<Edge>) {
    if let Some(subgraph) = &report.subgraph {
        return (subgraph.nodes.clone(), subgraph.edges.clone());
    }

    let mut nodes = BTreeSet::new();
    let mut edges = BTreeSet::new();
    for why_path in &report.paths {
        nodes.extend(why_path.path.iter().cloned());
        for pair in why_path.path.windows(2) {
            edges.insert(Edge::new(pair[0].as_str(), pair[1].as_str()));
        }
    }
    (nodes, edges)
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
