//! Diameter report: the maximal path set summarized for presentation.

use crate::diameter::{DiameterWitness, MaximalPath, Strategy};
use crate::frequency::{FrequencyTable, endpoint_frequencies, interior_frequencies, percentage};
use castnet_core::dataset::Dataset;
use castnet_core::graph::CastGraph;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything a presentation layer needs about the diameter sweep.
#[derive(Debug, Clone, Serialize)]
pub struct DiameterReport {
    pub generated_at: DateTime<Utc>,
    pub strategy: Strategy,
    pub players: usize,
    pub edges: usize,
    /// Edge length of every maximal path.
    pub path_length: usize,
    /// Number of tied maximal pairs.
    pub tied_pairs: usize,
    /// Pairs of distinct players connected by some path.
    pub reachable_pairs: usize,
    /// `tied_pairs` as a percentage of `reachable_pairs`.
    pub longest_share: f64,
    pub endpoints: FrequencyTable,
    pub interior: FrequencyTable,
    /// The maximal paths themselves (omitted unless requested).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<MaximalPath>,
}

impl DiameterReport {
    /// Build a report from a finished sweep. `include_paths` keeps the full
    /// path list in the report.
    pub fn build(
        graph: &CastGraph,
        witness: DiameterWitness,
        strategy: Strategy,
        include_paths: bool,
    ) -> Self {
        let endpoints = endpoint_frequencies(&witness.paths);
        let interior = interior_frequencies(&witness.paths);
        Self {
            generated_at: Utc::now(),
            strategy,
            players: graph.node_count(),
            edges: graph.edge_count(),
            path_length: witness.length,
            tied_pairs: witness.tied_pairs(),
            reachable_pairs: witness.reachable_pairs,
            longest_share: witness.longest_share(),
            endpoints,
            interior,
            paths: if include_paths {
                witness.paths
            } else {
                Vec::new()
            },
        }
    }

    /// Share of maximal paths passing through `count` of them.
    pub fn path_share(&self, count: usize) -> f64 {
        percentage(count, self.tied_pairs)
    }
}

fn seasons_label(dataset: &Dataset, player: &str) -> String {
    dataset
        .get(player)
        .map(|p| {
            p.seasons
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_else(|| "?".to_string())
}

/// Render the report as human-readable text.
///
/// Lists the top `top_endpoints` endpoint players and the top `top_interior`
/// interior players, each with the seasons they played.
pub fn format_text(
    report: &DiameterReport,
    dataset: &Dataset,
    top_endpoints: usize,
    top_interior: usize,
) -> String {
    let mut out = String::new();

    out.push_str("Longest Path Statistics:\n");
    out.push_str(&format!(
        "Players: {} ({} connections)\n",
        report.players, report.edges
    ));
    if report.tied_pairs == 0 {
        out.push_str("No connected pairs of players found.\n");
        return out;
    }
    out.push_str(&format!(
        "Number of longest paths found: {}\n",
        report.tied_pairs
    ));
    out.push_str(&format!(
        "Total number of valid paths: {}\n",
        report.reachable_pairs
    ));
    out.push_str(&format!(
        "Percentage of paths that are longest: {:.2}%\n",
        report.longest_share
    ));
    out.push_str(&format!(
        "Length of longest paths: {} connections\n",
        report.path_length
    ));

    out.push_str("\nMost Common Players as Endpoints in Longest Paths:\n");
    for entry in report.endpoints.top(top_endpoints) {
        out.push_str(&format!(
            "{} ({} paths) - Seasons: {}\n",
            entry.id,
            entry.count,
            seasons_label(dataset, &entry.id)
        ));
    }

    out.push_str("\nMost Common Intermediate Players in Longest Paths:\n");
    if report.interior.is_empty() {
        out.push_str("(none: longest paths have no intermediate players)\n");
    }
    for entry in report.interior.top(top_interior) {
        out.push_str(&format!(
            "{} (appears in {} paths, {:.1}%) - Seasons: {}\n",
            entry.id,
            entry.count,
            report.path_share(entry.count),
            seasons_label(dataset, &entry.id)
        ));
    }

    if !report.paths.is_empty() {
        out.push_str("\nAll longest paths:\n");
        for m in &report.paths {
            out.push_str(&format!("{}\n", m.path.display()));
        }
    }

    out
}

/// Render the report as pretty-printed JSON.
pub fn format_json(report: &DiameterReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diameter::{DiameterOptions, find_diameter};

    fn chain_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.insert("A", [1]);
        ds.insert("B", [1, 2]);
        ds.insert("C", [2, 3]);
        ds.insert("D", [3]);
        ds
    }

    fn report_for(ds: &Dataset, include_paths: bool) -> DiameterReport {
        let graph = CastGraph::from_dataset(ds);
        let witness = find_diameter(&graph, DiameterOptions::default());
        DiameterReport::build(&graph, witness, Strategy::SingleSource, include_paths)
    }

    #[test]
    fn test_text_report() {
        let ds = chain_dataset();
        let report = report_for(&ds, true);
        let text = format_text(&report, &ds, 10, 5);

        assert!(text.contains("Number of longest paths found: 1"));
        assert!(text.contains("Total number of valid paths: 6"));
        assert!(text.contains("Percentage of paths that are longest: 16.67%"));
        assert!(text.contains("Length of longest paths: 3 connections"));
        assert!(text.contains("A (1 paths) - Seasons: 1"));
        assert!(text.contains("B (appears in 1 paths, 100.0%) - Seasons: 1, 2"));
        assert!(text.contains("\nAll longest paths:\nA → B → C → D\n"));
    }

    #[test]
    fn test_text_report_omits_paths_unless_requested() {
        let ds = chain_dataset();
        let text = format_text(&report_for(&ds, false), &ds, 10, 5);
        assert!(!text.contains("All longest paths:"));
        assert!(!text.contains("A → B → C → D"));
    }

    #[test]
    fn test_text_report_without_pairs() {
        let mut ds = Dataset::new();
        ds.insert("Solo", [1]);
        let report = report_for(&ds, false);
        let text = format_text(&report, &ds, 10, 5);
        assert!(text.contains("No connected pairs"));
        assert_eq!(report.path_share(1), 0.0);
    }

    #[test]
    fn test_json_report_fields() {
        let ds = chain_dataset();
        let report = report_for(&ds, false);
        let json = format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["path_length"], 3);
        assert_eq!(value["tied_pairs"], 1);
        assert_eq!(value["reachable_pairs"], 6);
        assert_eq!(value["strategy"], "single-source");
        assert_eq!(value["endpoints"][0]["id"], "A");
        assert_eq!(value["interior"][1]["id"], "C");
        assert!(value.get("paths").is_none());
    }
}
