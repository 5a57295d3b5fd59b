//! Unweighted shortest paths over the cast graph.

use castnet_core::graph::CastGraph;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// A simple path through the cast graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Path {
    /// Player names in the path (source to target)
    pub nodes: Vec<String>,
}

impl Path {
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// Returns the length of the path (number of edges).
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Returns true if the path has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn end(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Nodes strictly between the endpoints. Empty for paths of fewer than 3 nodes.
    pub fn interior(&self) -> &[String] {
        if self.nodes.len() < 3 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }

    /// Consecutive node pairs.
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
    }

    /// Human-readable form: A → B → C
    pub fn display(&self) -> String {
        self.nodes.join(" → ")
    }
}

/// Find the shortest path between two players using BFS.
///
/// Neighbors are expanded in lexicographic order and the first path to reach
/// `end` wins. Returns `None` if either player is absent or they are not
/// connected.
pub fn find_shortest_path(graph: &CastGraph, start: &str, end: &str) -> Option<Path> {
    let start = graph.node_key(start)?;
    if !graph.contains(end) {
        return None;
    }
    if start == end {
        return Some(Path::new(vec![start.to_string()]));
    }

    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    parent.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(neighbors) = graph.neighbors(current) else {
            continue;
        };
        for neighbor in neighbors {
            let neighbor = neighbor.as_str();
            if parent.contains_key(neighbor) {
                continue;
            }
            parent.insert(neighbor, current);
            if neighbor == end {
                return Some(trace(&parent, start, end));
            }
            queue.push_back(neighbor);
        }
    }

    None
}

/// Walk a parent map back from `target` to `source`.
fn trace(parent: &HashMap<&str, &str>, source: &str, target: &str) -> Path {
    let mut nodes = vec![target.to_string()];
    let mut current = target;
    while current != source {
        match parent.get(current) {
            Some(&p) => {
                nodes.push(p.to_string());
                current = p;
            }
            None => break,
        }
    }
    nodes.reverse();
    Path::new(nodes)
}

/// Single-source BFS result: hop distance and BFS parent for every node
/// reachable from the source.
///
/// Parents are assigned exactly as [`find_shortest_path`] assigns them, so
/// `tree.path_to(t)` equals `find_shortest_path(graph, source, t)`.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<'g> {
    source: &'g str,
    parent: HashMap<&'g str, &'g str>,
    distance: HashMap<&'g str, usize>,
}

impl<'g> ShortestPathTree<'g> {
    /// Run BFS from `source`. Returns `None` if `source` is not in the graph.
    pub fn from_source(graph: &'g CastGraph, source: &str) -> Option<Self> {
        let source = graph.node_key(source)?;

        let mut parent: HashMap<&'g str, &'g str> = HashMap::new();
        let mut distance: HashMap<&'g str, usize> = HashMap::new();
        let mut queue: VecDeque<&'g str> = VecDeque::new();
        parent.insert(source, source);
        distance.insert(source, 0);
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let depth = distance[current];
            let Some(neighbors) = graph.neighbors(current) else {
                continue;
            };
            for neighbor in neighbors {
                let neighbor = neighbor.as_str();
                if distance.contains_key(neighbor) {
                    continue;
                }
                parent.insert(neighbor, current);
                distance.insert(neighbor, depth + 1);
                queue.push_back(neighbor);
            }
        }

        Some(Self {
            source,
            parent,
            distance,
        })
    }

    pub fn source(&self) -> &'g str {
        self.source
    }

    /// Hop distance to `target`, or `None` if unreachable.
    pub fn distance(&self, target: &str) -> Option<usize> {
        self.distance.get(target).copied()
    }

    /// Number of nodes reached, including the source.
    pub fn reached(&self) -> usize {
        self.distance.len()
    }

    /// Largest distance from the source to any reachable node.
    pub fn eccentricity(&self) -> usize {
        self.distance.values().copied().max().unwrap_or(0)
    }

    /// Shortest path from the source to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: &str) -> Option<Path> {
        if !self.distance.contains_key(target) {
            return None;
        }
        Some(trace(&self.parent, self.source, target))
    }
}

/// Find every shortest path between two players.
///
/// BFS layers the graph from `start`; every path is then rebuilt backwards
/// from `end`, stepping only to neighbors exactly one layer closer. Results
/// are sorted lexicographically by node sequence. `start == end` yields the
/// single-node path; unreachable or absent players yield an empty list.
pub fn find_all_shortest_paths(graph: &CastGraph, start: &str, end: &str) -> Vec<Path> {
    let Some(tree) = ShortestPathTree::from_source(graph, start) else {
        return Vec::new();
    };
    let Some(end) = graph.node_key(end) else {
        return Vec::new();
    };
    if tree.distance(end).is_none() {
        return Vec::new();
    }

    let mut paths = Vec::new();
    let mut reversed = vec![end];
    collect_back(graph, &tree, &mut reversed, &mut paths);
    paths.sort();
    paths
}

fn collect_back<'g>(
    graph: &'g CastGraph,
    tree: &ShortestPathTree<'g>,
    reversed: &mut Vec<&'g str>,
    out: &mut Vec<Path>,
) {
    let Some(&current) = reversed.last() else {
        return;
    };
    let Some(depth) = tree.distance(current) else {
        return;
    };
    if depth == 0 {
        out.push(Path::new(
            reversed.iter().rev().map(|n| (*n).to_string()).collect(),
        ));
        return;
    }
    let Some(neighbors) = graph.neighbors(current) else {
        return;
    };
    for neighbor in neighbors {
        if tree.distance(neighbor) == Some(depth - 1) {
            reversed.push(neighbor.as_str());
            collect_back(graph, tree, reversed, out);
            reversed.pop();
        }
    }
}
