use castnet_core::dataset::Dataset;
use castnet_core::graph::CastGraph;
use castnet_core::seasons::{condensed_graph, condensed_node, season_links};
use castnet_nav::export::{ExportFormat, export_players, export_seasons};
use castnet_nav::paths::{find_all_shortest_paths, find_shortest_path};

fn make_dataset() -> Dataset {
    let mut ds = Dataset::new();
    ds.insert("Amanda Kimmel", [15, 16]);
    ds.insert("Parvati \"Queen\" Shallow", [13, 16]);
    ds.insert("Yul Kwon", [13]);
    ds.insert("Todd Herzog", [15]);
    ds
}

#[test]
fn test_export_dot_players() {
    let graph = CastGraph::from_dataset(&make_dataset());
    let dot = export_players(&graph, &[], ExportFormat::Dot);

    assert!(dot.starts_with("graph Cast {"));
    assert!(dot.contains("\"Amanda Kimmel\" -- \"Todd Herzog\";"));
    assert!(dot.contains("\"Parvati \\\"Queen\\\" Shallow\""), "quotes must be escaped");
    assert_eq!(dot.matches(" -- ").count(), graph.edge_count());
    assert!(!dot.contains("color=red"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_export_dot_highlight() {
    let graph = CastGraph::from_dataset(&make_dataset());
    let path = find_shortest_path(&graph, "Todd Herzog", "Yul Kwon").unwrap();
    assert_eq!(path.len(), 3);

    let dot = export_players(&graph, std::slice::from_ref(&path), ExportFormat::Dot);
    assert_eq!(dot.matches("color=red").count(), 3);
    assert_eq!(dot.matches("fillcolor=\"#ffd8d8\"").count(), 4);
}

#[test]
fn test_export_mermaid_players() {
    let graph = CastGraph::from_dataset(&make_dataset());
    let path = find_shortest_path(&graph, "Amanda Kimmel", "Todd Herzog").unwrap();
    let mermaid = export_players(&graph, &[path], ExportFormat::Mermaid);

    assert!(mermaid.starts_with("graph LR"));
    assert!(mermaid.contains("p0[\"Amanda Kimmel\"]"));
    assert!(mermaid.contains("#quot;Queen#quot;"));
    assert_eq!(mermaid.matches(" --- ").count(), graph.edge_count());
    assert_eq!(mermaid.matches("linkStyle").count(), 1);
    assert_eq!(mermaid.matches("style p").count(), 2);
}

#[test]
fn test_export_seasons() {
    let ds = make_dataset();
    let links = season_links(&ds);
    let seasons = ds.seasons();

    let dot = export_seasons(&links, &seasons, ExportFormat::Dot);
    assert!(dot.contains("\"Season 13\" -- \"Season 16\" [label=\"1\""));
    assert!(dot.contains("\"Season 15\" -- \"Season 16\""));
    assert!(!dot.contains("\"Season 13\" -- \"Season 15\""));

    let mermaid = export_seasons(&links, &seasons, ExportFormat::Mermaid);
    assert!(mermaid.contains("s13[\"Season 13\"]"));
    assert!(mermaid.contains("s13 ---|1| s16"));
}

#[test]
fn test_export_condensed_highlight() {
    let ds = make_dataset();
    let graph = condensed_graph(&ds);
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);

    // Todd and Yul only played once, so their season nodes stand in for them
    let from = condensed_node(&ds, "Todd Herzog").unwrap();
    let to = condensed_node(&ds, "Yul Kwon").unwrap();
    let paths = find_all_shortest_paths(&graph, &from, &to);
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths[0].nodes,
        vec![
            "Season 15",
            "Amanda Kimmel",
            "Parvati \"Queen\" Shallow",
            "Season 13"
        ]
    );

    let dot = export_players(&graph, &paths, ExportFormat::Dot);
    assert!(dot.contains("\"Amanda Kimmel\" -- \"Season 15\" [color=red, penwidth=2];"));
    assert!(!dot.contains("\"Todd Herzog\""));
    assert!(!dot.contains("\"Season 13\" -- \"Season 15\""));
    assert_eq!(dot.matches("color=red").count(), 3);
}
