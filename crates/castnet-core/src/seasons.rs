//! Season-level views of the cast.
//!
//! The overlap view has seasons as nodes, linked by returning players. The
//! condensed view keeps returning players as their own nodes and folds each
//! season's one-time players into a single season node.

use crate::dataset::Dataset;
use crate::graph::CastGraph;
use serde::Serialize;
use std::collections::BTreeSet;

/// Two seasons that share at least one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonLink {
    pub a: u32,
    pub b: u32,
    /// Players who competed in both seasons, sorted.
    pub shared: Vec<String>,
}

impl SeasonLink {
    /// Link weight: number of shared players.
    pub fn weight(&self) -> usize {
        self.shared.len()
    }
}

/// Compute every season pair (a < b) with shared players, ordered by `(a, b)`.
pub fn season_links(dataset: &Dataset) -> Vec<SeasonLink> {
    let members = dataset.season_members();
    let seasons: Vec<u32> = members.keys().copied().collect();

    let mut links = Vec::new();
    for (i, &a) in seasons.iter().enumerate() {
        for &b in &seasons[i + 1..] {
            let shared: Vec<String> = members[&a]
                .intersection(&members[&b])
                .map(|name| (*name).to_string())
                .collect();
            if !shared.is_empty() {
                links.push(SeasonLink { a, b, shared });
            }
        }
    }
    links
}

/// Season -> cast size, ordered by season.
pub fn season_sizes(dataset: &Dataset) -> Vec<(u32, usize)> {
    dataset
        .season_members()
        .into_iter()
        .map(|(season, names)| (season, names.len()))
        .collect()
}

/// Node id standing in for a season's single-season players.
pub fn season_node_id(season: u32) -> String {
    format!("Season {}", season)
}

/// Build the condensed player graph.
///
/// Players with exactly one season collapse into that season's node, which
/// links to every returning player of the season. Season nodes never link to
/// each other since each carries only its own season.
pub fn condensed_graph(dataset: &Dataset) -> CastGraph {
    let mut collapsed: BTreeSet<u32> = BTreeSet::new();
    let mut memberships: Vec<(String, Vec<u32>)> = Vec::new();
    for (name, person) in &dataset.players {
        if person.seasons.len() == 1 {
            collapsed.extend(person.seasons.iter().copied());
        } else {
            memberships.push((name.clone(), person.seasons.iter().copied().collect()));
        }
    }
    memberships.extend(
        collapsed
            .into_iter()
            .map(|season| (season_node_id(season), vec![season])),
    );

    let graph = CastGraph::build(memberships);
    tracing::debug!(
        "condensed {} players into {} nodes",
        dataset.len(),
        graph.node_count()
    );
    graph
}

/// Node representing `player` in the condensed graph.
pub fn condensed_node(dataset: &Dataset, player: &str) -> Option<String> {
    let person = dataset.get(player)?;
    match (person.seasons.len(), person.seasons.first()) {
        (1, Some(&season)) => Some(season_node_id(season)),
        _ => Some(player.to_string()),
    }
}
