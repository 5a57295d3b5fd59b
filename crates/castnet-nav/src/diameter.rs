//! Diameter witnesses: the longest shortest paths in the cast graph.
//!
//! Every unordered pair of players is visited once. The sweep keeps the
//! longest shortest-path length seen so far together with every pair that
//! achieves it, and counts how many pairs were reachable at all.
//!
//! Two strategies produce identical results:
//! - `Pairwise`: one BFS per pair, O(V²·(V+E)).
//! - `SingleSource`: one BFS per node, reused for all of that node's pairs,
//!   O(V·(V+E)).
//!
//! The running state is a [`DiameterAccumulator`]. Parallel sweeps fold one
//! accumulator per rayon task and merge them in sequence order, so the
//! parallel result equals the sequential one.

use crate::paths::{Path, ShortestPathTree, find_shortest_path};
use castnet_core::graph::CastGraph;
use rayon::prelude::*;
use serde::Serialize;

pub use castnet_core::config::Strategy;

/// A maximal path tagged with the pair it connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaximalPath {
    pub start: String,
    pub end: String,
    pub path: Path,
}

/// Running state of the sweep: the current maximum length, the pairs tied
/// at it, and the reachable-pair count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiameterAccumulator {
    max_length: usize,
    paths: Vec<MaximalPath>,
    reachable_pairs: usize,
}

impl DiameterAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reachable pair whose shortest path is `path`.
    pub fn observe(&mut self, start: &str, end: &str, path: Path) {
        let length = path.len();
        self.observe_with(start, end, length, || path);
    }

    /// Record a reachable pair at distance `length`. `make_path` only runs
    /// when the pair ties or beats the current maximum.
    pub fn observe_with<F>(&mut self, start: &str, end: &str, length: usize, make_path: F)
    where
        F: FnOnce() -> Path,
    {
        self.reachable_pairs += 1;
        if length > self.max_length {
            self.max_length = length;
            self.paths.clear();
        } else if length < self.max_length {
            return;
        }
        self.paths.push(MaximalPath {
            start: start.to_string(),
            end: end.to_string(),
            path: make_path(),
        });
    }

    /// Combine two partial sweeps. The longer set wins, ties concatenate
    /// (`self` first), reachable counts add up.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.reachable_pairs += other.reachable_pairs;
        if other.max_length > self.max_length {
            self.max_length = other.max_length;
            self.paths = other.paths;
        } else if other.max_length == self.max_length {
            self.paths.extend(other.paths);
        }
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn reachable_pairs(&self) -> usize {
        self.reachable_pairs
    }

    pub fn finish(self) -> DiameterWitness {
        DiameterWitness {
            length: if self.paths.is_empty() {
                0
            } else {
                self.max_length
            },
            paths: self.paths,
            reachable_pairs: self.reachable_pairs,
        }
    }
}

/// Result of the sweep: the maximal path set plus the reachable-pair count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiameterWitness {
    /// Edge length shared by every path in `paths` (0 when empty).
    pub length: usize,
    /// Every pair whose shortest path has the maximum length, in sweep order.
    pub paths: Vec<MaximalPath>,
    /// Unordered pairs of distinct players connected by some path.
    pub reachable_pairs: usize,
}

impl DiameterWitness {
    /// Number of tied maximal pairs.
    pub fn tied_pairs(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Percentage of reachable pairs that are maximal (0.0 when none are reachable).
    pub fn longest_share(&self) -> f64 {
        crate::frequency::percentage(self.paths.len(), self.reachable_pairs)
    }
}

/// Options for [`find_diameter`].
#[derive(Debug, Clone, Copy)]
pub struct DiameterOptions {
    pub strategy: Strategy,
    pub parallel: bool,
}

impl Default for DiameterOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::SingleSource,
            parallel: true,
        }
    }
}

/// Find every longest shortest path in the graph.
pub fn find_diameter(graph: &CastGraph, options: DiameterOptions) -> DiameterWitness {
    find_diameter_with_progress(graph, options, |_| {})
}

/// Like [`find_diameter`], calling `on_source` with a node's index (in
/// lexicographic node order) once each time that node's pairs
/// have all been swept.
pub fn find_diameter_with_progress<F>(
    graph: &CastGraph,
    options: DiameterOptions,
    on_source: F,
) -> DiameterWitness
where
    F: Fn(usize) + Sync,
{
    let nodes: Vec<&str> = graph.nodes().collect();
    let n = nodes.len();
    tracing::info!(
        "sweeping {} players ({} pairs) with {} strategy{}",
        n,
        n * n.saturating_sub(1) / 2,
        options.strategy,
        if options.parallel { ", parallel" } else { "" }
    );

    let sweep = |mut acc: DiameterAccumulator, i: usize| {
        match options.strategy {
            Strategy::Pairwise => sweep_pairwise(graph, &nodes, i, &mut acc),
            Strategy::SingleSource => sweep_single_source(graph, &nodes, i, &mut acc),
        }
        on_source(i);
        acc
    };

    let acc = if options.parallel {
        (0..n)
            .into_par_iter()
            .fold(DiameterAccumulator::new, sweep)
            .reduce(DiameterAccumulator::new, DiameterAccumulator::merge)
    } else {
        (0..n).fold(DiameterAccumulator::new(), sweep)
    };

    let witness = acc.finish();
    tracing::info!(
        "diameter {}: {} maximal pairs out of {} reachable",
        witness.length,
        witness.tied_pairs(),
        witness.reachable_pairs
    );
    witness
}

/// Pairs `(nodes[i], nodes[j])` for `j > i`, one BFS each.
fn sweep_pairwise(graph: &CastGraph, nodes: &[&str], i: usize, acc: &mut DiameterAccumulator) {
    let start = nodes[i];
    for &end in &nodes[i + 1..] {
        if let Some(path) = find_shortest_path(graph, start, end) {
            acc.observe(start, end, path);
        }
    }
}

/// Pairs `(nodes[i], nodes[j])` for `j > i`, one BFS from `nodes[i]`.
fn sweep_single_source(
    graph: &CastGraph,
    nodes: &[&str],
    i: usize,
    acc: &mut DiameterAccumulator,
) {
    let start = nodes[i];
    let Some(tree) = ShortestPathTree::from_source(graph, start) else {
        return;
    };
    // Only the source itself was reached
    if tree.reached() <= 1 {
        return;
    }
    for &end in &nodes[i + 1..] {
        let Some(length) = tree.distance(end) else {
            continue;
        };
        acc.observe_with(start, end, length, || {
            tree.path_to(end).unwrap_or_default()
        });
    }
}
