use castnet_core::dataset::Dataset;
use castnet_core::graph::CastGraph;
use castnet_nav::diameter::{DiameterOptions, Strategy, find_diameter};
use castnet_nav::frequency::{endpoint_frequencies, interior_frequencies};
use castnet_nav::paths::find_shortest_path;

fn chain_dataset() -> Dataset {
    let mut ds = Dataset::new();
    ds.insert("A", [1]);
    ds.insert("B", [1, 2]);
    ds.insert("C", [2, 3]);
    ds.insert("D", [3]);
    ds
}

/// Deterministic pseudo-cast: 12 seasons of 6 players each, with a handful
/// of returnees bridging seasons, plus one isolated season.
fn league_dataset() -> Dataset {
    let mut ds = Dataset::new();
    for season in 1..=12u32 {
        for slot in 0..6u32 {
            ds.insert(format!("S{:02}-P{}", season, slot), [season]);
        }
    }
    // Returnees: each links two seasons, forming a long chain with a few shortcuts
    let bridges: [(u32, u32); 13] = [
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 8),
        (8, 9),
        (9, 10),
        (10, 11),
        (2, 5),
        (7, 10),
        (1, 3),
    ];
    for (i, (a, b)) in bridges.iter().enumerate() {
        ds.insert(format!("Returnee {:02}", i), [*a, *b]);
    }
    // Season 12 shares nobody with the rest
    ds
}

fn all_options() -> Vec<DiameterOptions> {
    let mut out = Vec::new();
    for strategy in [Strategy::Pairwise, Strategy::SingleSource] {
        for parallel in [false, true] {
            out.push(DiameterOptions { strategy, parallel });
        }
    }
    out
}

#[test]
fn test_chain_scenario() {
    let graph = CastGraph::from_dataset(&chain_dataset());
    for options in all_options() {
        let witness = find_diameter(&graph, options);
        assert_eq!(witness.length, 3, "{:?}", options);
        assert_eq!(witness.tied_pairs(), 1);
        assert_eq!(witness.reachable_pairs, 6);
        let maximal = &witness.paths[0];
        assert_eq!((maximal.start.as_str(), maximal.end.as_str()), ("A", "D"));
        assert_eq!(maximal.path.nodes, vec!["A", "B", "C", "D"]);

        let endpoints = endpoint_frequencies(&witness.paths);
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints.get("A"), Some(1));
        assert_eq!(endpoints.get("D"), Some(1));

        let interior = interior_frequencies(&witness.paths);
        assert_eq!(interior.len(), 2);
        assert_eq!(interior.get("B"), Some(1));
        assert_eq!(interior.get("C"), Some(1));
    }
}

#[test]
fn test_isolated_player_excluded() {
    let mut ds = chain_dataset();
    ds.insert("Loner", [42]);
    let graph = CastGraph::from_dataset(&ds);

    let witness = find_diameter(&graph, DiameterOptions::default());
    // Same 6 reachable pairs as the chain alone; the 4 pairs with Loner are skipped
    assert_eq!(witness.reachable_pairs, 6);
    assert_eq!(witness.length, 3);
    assert!(
        witness
            .paths
            .iter()
            .all(|m| m.start != "Loner" && m.end != "Loner")
    );
}

#[test]
fn test_single_player() {
    let mut ds = Dataset::new();
    ds.insert("Solo", [1]);
    let graph = CastGraph::from_dataset(&ds);
    assert_eq!(graph.edge_count(), 0);

    let witness = find_diameter(&graph, DiameterOptions::default());
    assert_eq!(witness.reachable_pairs, 0);
    assert!(witness.is_empty());
}

#[test]
fn test_all_isolated() {
    let graph = CastGraph::build([("A", vec![1]), ("B", vec![2]), ("C", vec![3])]);
    for options in all_options() {
        let witness = find_diameter(&graph, options);
        assert_eq!(witness.reachable_pairs, 0);
        assert!(witness.is_empty());
        assert_eq!(witness.longest_share(), 0.0);
    }
}

#[test]
fn test_strategies_agree() {
    let graph = CastGraph::from_dataset(&league_dataset());
    let baseline = find_diameter(
        &graph,
        DiameterOptions {
            strategy: Strategy::Pairwise,
            parallel: false,
        },
    );
    assert!(!baseline.is_empty());
    for options in all_options() {
        assert_eq!(find_diameter(&graph, options), baseline, "{:?}", options);
    }
}

#[test]
fn test_maximal_length_bounds_every_pair() {
    let graph = CastGraph::from_dataset(&league_dataset());
    let witness = find_diameter(&graph, DiameterOptions::default());

    let nodes: Vec<&str> = graph.nodes().collect();
    let mut reachable = 0;
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if let Some(path) = find_shortest_path(&graph, a, b) {
                reachable += 1;
                assert!(path.len() <= witness.length);
            }
        }
    }
    assert_eq!(reachable, witness.reachable_pairs);
    assert!(witness.paths.iter().all(|m| m.path.len() == witness.length));
}

#[test]
fn test_maximal_paths_are_valid_shortest_paths() {
    let graph = CastGraph::from_dataset(&league_dataset());
    let witness = find_diameter(&graph, DiameterOptions::default());

    for m in &witness.paths {
        assert_eq!(m.path.start(), Some(m.start.as_str()));
        assert_eq!(m.path.end(), Some(m.end.as_str()));
        for (a, b) in m.path.hops() {
            assert!(graph.is_adjacent(a, b), "{} and {} are not adjacent", a, b);
        }
        let mut seen = std::collections::HashSet::new();
        assert!(m.path.nodes.iter().all(|n| seen.insert(n)), "repeated node");
        // Length is symmetric even if the concrete route differs
        let reverse = find_shortest_path(&graph, &m.end, &m.start).unwrap();
        assert_eq!(reverse.len(), m.path.len());
    }
}

#[test]
fn test_self_paths_have_length_zero() {
    let graph = CastGraph::from_dataset(&league_dataset());
    for node in graph.nodes() {
        let path = find_shortest_path(&graph, node, node).unwrap();
        assert_eq!(path.len(), 0);
    }
}
