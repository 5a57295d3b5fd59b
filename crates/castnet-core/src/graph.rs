//! Season co-membership graph: G = (V, E) where two players are adjacent iff
//! they competed in at least one common season.

use crate::dataset::Dataset;
use std::collections::{BTreeMap, BTreeSet};

/// Undirected, unweighted graph over player names.
///
/// Adjacency is kept in ordered sets so every traversal visits neighbors in
/// lexicographic order. BFS tie-breaks, and everything downstream of them,
/// are reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl CastGraph {
    /// Build the graph from `(name, seasons)` memberships.
    ///
    /// Groups names by season, then links every distinct pair within each
    /// season group. Pairs sharing several seasons get a single edge. Every
    /// name becomes a node, including those who share no season with anyone.
    pub fn build<I, K, S>(memberships: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: IntoIterator<Item = u32>,
    {
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut by_season: BTreeMap<u32, Vec<String>> = BTreeMap::new();

        for (name, seasons) in memberships {
            let name = name.into();
            for season in seasons {
                by_season.entry(season).or_default().push(name.clone());
            }
            adjacency.entry(name).or_default();
        }

        for members in by_season.values() {
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    if a == b {
                        continue;
                    }
                    if let Some(set) = adjacency.get_mut(a) {
                        set.insert(b.clone());
                    }
                    if let Some(set) = adjacency.get_mut(b) {
                        set.insert(a.clone());
                    }
                }
            }
        }

        let graph = Self { adjacency };
        tracing::debug!(
            "built cast graph: {} players, {} edges, {} seasons",
            graph.node_count(),
            graph.edge_count(),
            by_season.len()
        );
        graph
    }

    /// Build the graph from a loaded dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::build(
            dataset
                .players
                .iter()
                .map(|(name, person)| (name.as_str(), person.seasons.iter().copied())),
        )
    }

    /// Raw adjacency map (name -> neighbor names).
    pub fn adjacency(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.adjacency
    }

    /// Check whether a player is a node of the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Neighbors of a node, or `None` if the node is absent.
    pub fn neighbors(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.adjacency.get(id)
    }

    /// Resolve `id` to the graph-owned key, so callers can hold `&str`s tied
    /// to the graph's lifetime.
    pub fn node_key(&self, id: &str) -> Option<&str> {
        self.adjacency.get_key_value(id).map(|(k, _)| k.as_str())
    }

    /// Node names in lexicographic order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn degree(&self, id: &str) -> Option<usize> {
        self.adjacency.get(id).map(BTreeSet::len)
    }

    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// Nodes with no neighbors.
    pub fn isolated_nodes(&self) -> Vec<&str> {
        self.adjacency
            .iter()
            .filter(|(_, n)| n.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Iterate each undirected edge once, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().flat_map(|(a, neighbors)| {
            neighbors
                .iter()
                .filter(move |b| a.as_str() < b.as_str())
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }
}
