//! Self-contained SVG drawing of a why report.
//!
//! Modules are placed in layers by their longest distance from a module with
//! no incoming route edge, so roots sit at the top and the target near the
//! bottom. Within a layer modules are sorted, which keeps the output stable.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt::Write as _;

use super::dot::collect_elements;
use crate::graph::Edge;
use crate::why::WhyReport;

const TARGET_COLOR: &str = "#ffffcc";
const ROOT_COLOR: &str = "#ccffcc";
const DEFAULT_COLOR: &str = "white";

const MARGIN: usize = 20;
const HEADER_HEIGHT: usize = 40;
const NODE_HEIGHT: usize = 28;
const LAYER_GAP: usize = 60;
const NODE_GAP: usize = 24;
const CHAR_WIDTH: usize = 7;
const NODE_PADDING: usize = 20;

struct Placed {
    x: usize,
    y: usize,
    width: usize,
}

/// Render the routes in `report` as a standalone SVG document.
///
/// Uses the same nodes, edges and colours as [`super::render_dot`]. Each
/// module is a `<g class="node">` group whose `<title>` is the module name.
#[must_use]
pub fn render_svg(report: &WhyReport) -> String {
    let (nodes, edges) = collect_elements(report);
    let layers = assign_layers(&nodes, &edges);

    let widths: BTreeMap<&str, usize> = nodes
        .iter()
        .map(|n| (n.as_str(), n.chars().count() * CHAR_WIDTH + NODE_PADDING))
        .collect();
    let title = format!("Why is {} included?", report.target);
    let content_width = layers
        .iter()
        .map(|row| row_width(row, &widths))
        .max()
        .unwrap_or(0)
        .max(title.chars().count() * CHAR_WIDTH);
    let width = content_width + 2 * MARGIN;
    let height = HEADER_HEIGHT
        + layers.len() * NODE_HEIGHT
        + layers.len().saturating_sub(1) * LAYER_GAP
        + 2 * MARGIN;

    let mut placed: HashMap<&str, Placed> = HashMap::new();
    for (depth, row) in layers.iter().enumerate() {
        let y = MARGIN + HEADER_HEIGHT + depth * (NODE_HEIGHT + LAYER_GAP);
        let mut x = MARGIN + (content_width - row_width(row, &widths)) / 2;
        for &node in row {
            let node_width = widths[node];
            placed.insert(
                node,
                Placed {
                    x,
                    y,
                    width: node_width,
                },
            );
            x += node_width + NODE_GAP;
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\" font-family=\"monospace\" font-size=\"12\">"
    );
    let _ = writeln!(out, "<title>{}</title>", xml_escape(&title));
    out.push_str(
        "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" \
         markerWidth=\"8\" markerHeight=\"8\" orient=\"auto\">\
         <path d=\"M0,0 L10,5 L0,10 z\"/></marker></defs>\n",
    );
    let _ = writeln!(out, "<rect width=\"{width}\" height=\"{height}\" fill=\"white\"/>");
    let _ = writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"14\" font-weight=\"bold\">{}</text>",
        width / 2,
        MARGIN + HEADER_HEIGHT / 2,
        xml_escape(&title)
    );

    for edge in &edges {
        let (Some(from), Some(to)) = (placed.get(edge.from.as_str()), placed.get(edge.to.as_str()))
        else {
            continue;
        };
        let (x1, y1) = (from.x + from.width / 2, from.y + NODE_HEIGHT);
        let (x2, y2) = (to.x + to.width / 2, to.y);
        let _ = writeln!(
            out,
            "<g class=\"edge\"><title>{}&#45;&gt;{}</title>\
             <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"black\" \
             marker-end=\"url(#arrow)\"/></g>",
            xml_escape(&edge.from),
            xml_escape(&edge.to)
        );
    }

    for node in &nodes {
        let Some(at) = placed.get(node.as_str()) else {
            continue;
        };
        let color = if *node == report.target {
            TARGET_COLOR
        } else if report.is_root(node) {
            ROOT_COLOR
        } else {
            DEFAULT_COLOR
        };
        let name = xml_escape(node);
        let _ = writeln!(
            out,
            "<g class=\"node\"><title>{name}</title>\
             <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{NODE_HEIGHT}\" rx=\"4\" \
             fill=\"{color}\" stroke=\"black\"/>\
             <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{name}</text></g>",
            at.x,
            at.y,
            at.width,
            at.x + at.width / 2,
            at.y + NODE_HEIGHT / 2 + 4
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Group nodes into layers by longest distance from a node without incoming
/// edges. Nodes caught in a cycle of the path union land on one extra layer.
fn assign_layers<'a>(
    nodes: &'a BTreeSet<String>,
    edges: &'a BTreeSet<Edge>,
) -> Vec<Vec<&'a str>> {
    let mut indegree: BTreeMap<&str, usize> = nodes.iter().map(|n| (n.as_str(), 0)).collect();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        if let Some(count) = indegree.get_mut(edge.to.as_str()) {
            *count += 1;
        }
        successors
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
    }

    let mut queue: VecDeque<&str> = indegree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| *node)
        .collect();
    let mut depth: HashMap<&str, usize> = queue.iter().map(|node| (*node, 0)).collect();

    while let Some(node) = queue.pop_front() {
        let next_depth = depth.get(node).copied().unwrap_or(0) + 1;
        for &next in successors.get(node).into_iter().flatten() {
            let entry = depth.entry(next).or_insert(0);
            *entry = (*entry).max(next_depth);
            if let Some(count) = indegree.get_mut(next) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    let deepest = depth.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<&str>> = Vec::new();
    for node in nodes {
        let layer = match indegree.get(node.as_str()) {
            Some(&0) => depth.get(node.as_str()).copied().unwrap_or(0),
            _ => deepest + 1,
        };
        if layers.len() <= layer {
            layers.resize_with(layer + 1, Vec::new);
        }
        layers[layer].push(node.as_str());
    }
    layers.retain(|row| !row.is_empty());
    layers
}

fn row_width(row: &[&str], widths: &BTreeMap<&str, usize>) -> usize {
    row.iter().map(|node| widths[node]).sum::<usize>() + NODE_GAP * row.len().saturating_sub(1)
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
