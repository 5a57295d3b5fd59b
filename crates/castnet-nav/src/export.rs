//! Export the cast graph as DOT (Graphviz) or Mermaid flowchart.

use crate::paths::Path;
use castnet_core::graph::CastGraph;
use castnet_core::seasons::SeasonLink;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Undirected edge key with the smaller name first.
fn edge_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Nodes and edges that lie on any of the highlighted paths.
fn highlight_sets(highlight: &[Path]) -> (HashSet<&str>, HashSet<(&str, &str)>) {
    let mut nodes = HashSet::new();
    let mut edges = HashSet::new();
    for path in highlight {
        nodes.extend(path.nodes.iter().map(String::as_str));
        edges.extend(path.hops().map(|(a, b)| edge_key(a, b)));
    }
    (nodes, edges)
}

/// Export the player graph as a DOT string, emphasizing `highlight` paths.
pub fn export_players_dot(graph: &CastGraph, highlight: &[Path]) -> String {
    let (hl_nodes, hl_edges) = highlight_sets(highlight);
    let mut out = String::new();
    out.push_str("graph Cast {\n");
    out.push_str("  node [shape=ellipse, fontsize=10];\n\n");

    for id in graph.nodes() {
        let label = escape_label(id);
        if hl_nodes.contains(id) {
            out.push_str(&format!(
                "  \"{}\" [style=filled, fillcolor=\"#ffd8d8\"];\n",
                label
            ));
        } else {
            out.push_str(&format!("  \"{}\";\n", label));
        }
    }

    out.push('\n');

    for (a, b) in graph.edges() {
        let attrs = if hl_edges.contains(&(a, b)) {
            " [color=red, penwidth=2]"
        } else {
            ""
        };
        out.push_str(&format!(
            "  \"{}\" -- \"{}\"{};\n",
            escape_label(a),
            escape_label(b),
            attrs
        ));
    }

    out.push_str("}\n");
    out
}

/// Export the player graph as a Mermaid flowchart, emphasizing `highlight` paths.
pub fn export_players_mermaid(graph: &CastGraph, highlight: &[Path]) -> String {
    let (hl_nodes, hl_edges) = highlight_sets(highlight);
    // Mermaid IDs cannot contain spaces; names go in labels
    let ids: BTreeMap<&str, String> = graph
        .nodes()
        .enumerate()
        .map(|(i, name)| (name, format!("p{}", i)))
        .collect();

    let mut out = String::new();
    out.push_str("graph LR\n");
    for (name, id) in &ids {
        out.push_str(&format!("  {}[\"{}\"]\n", id, name.replace('"', "#quot;")));
    }

    let mut highlighted_links = Vec::new();
    for (link_index, (a, b)) in graph.edges().enumerate() {
        out.push_str(&format!("  {} --- {}\n", ids[a], ids[b]));
        if hl_edges.contains(&(a, b)) {
            highlighted_links.push(link_index);
        }
    }

    for (name, id) in &ids {
        if hl_nodes.contains(name) {
            out.push_str(&format!("  style {} fill:#ffd8d8\n", id));
        }
    }
    for link in highlighted_links {
        out.push_str(&format!("  linkStyle {} stroke:red,stroke-width:2px\n", link));
    }
    out
}

/// Export the season-overlap view: one node per season, edges weighted by
/// shared players.
pub fn export_seasons(
    links: &[SeasonLink],
    seasons: &BTreeSet<u32>,
    format: ExportFormat,
) -> String {
    let mut out = String::new();
    match format {
        ExportFormat::Dot => {
            out.push_str("graph Seasons {\n");
            out.push_str("  node [shape=box, fontsize=10];\n\n");
            for season in seasons {
                out.push_str(&format!("  \"Season {}\";\n", season));
            }
            out.push('\n');
            for link in links {
                out.push_str(&format!(
                    "  \"Season {}\" -- \"Season {}\" [label=\"{}\", penwidth={}];\n",
                    link.a,
                    link.b,
                    link.weight(),
                    link.weight().min(8)
                ));
            }
            out.push_str("}\n");
        }
        ExportFormat::Mermaid => {
            out.push_str("graph LR\n");
            for season in seasons {
                out.push_str(&format!("  s{}[\"Season {}\"]\n", season, season));
            }
            for link in links {
                out.push_str(&format!(
                    "  s{} ---|{}| s{}\n",
                    link.a,
                    link.weight(),
                    link.b
                ));
            }
        }
    }
    out
}

/// Export the player graph in the requested format.
pub fn export_players(graph: &CastGraph, highlight: &[Path], format: ExportFormat) -> String {
    match format {
        ExportFormat::Dot => export_players_dot(graph, highlight),
        ExportFormat::Mermaid => export_players_mermaid(graph, highlight),
    }
}
