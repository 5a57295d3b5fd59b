//! CLI binary for castnet: analyze, query, and export cast co-membership graphs.

use anyhow::{Context, Result};
use castnet_core::config::{CastnetConfig, Strategy};
use castnet_core::dataset::Dataset;
use castnet_core::graph::CastGraph;
use castnet_nav::diameter::DiameterOptions;
use castnet_nav::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "castnet", about = "Cast co-membership graph analyzer")]
struct Cli {
    /// Project root directory holding .castnet/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Dataset file (overrides dataset.path from config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the longest shortest paths and who sits on them
    Analyze {
        /// Sweep strategy: pairwise, single-source
        #[arg(short, long)]
        strategy: Option<String>,

        /// Run the sweep on a single thread
        #[arg(long)]
        sequential: bool,

        /// Number of endpoint players to list
        #[arg(long)]
        top: Option<usize>,

        /// Number of intermediate players to list
        #[arg(long)]
        top_interior: Option<usize>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Include every maximal path in the output
        #[arg(long)]
        show_paths: bool,
    },

    /// Shortest path between two players
    Path {
        /// Starting player
        from: String,

        /// Target player
        to: String,

        /// List every shortest path instead of one
        #[arg(long)]
        all: bool,
    },

    /// Search players by name
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show dataset and graph statistics
    Info,

    /// Export graph as DOT (Graphviz) or Mermaid flowchart
    Export {
        /// Output format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Graph view: players, seasons, condensed
        #[arg(long, default_value = "players")]
        view: String,

        /// Highlight the shortest paths between two players
        #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
        highlight: Vec<String>,
    },

    /// Check the dataset for hygiene problems (empty season lists, season 0)
    Validate,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = CastnetConfig::load(&project_root)?;
    let data_path = match &cli.data {
        Some(p) => p.clone(),
        None => config.dataset_path(&project_root),
    };

    match cli.command {
        Commands::Analyze {
            strategy,
            sequential,
            top,
            top_interior,
            format,
            show_paths,
        } => cmd_analyze(
            &config,
            &data_path,
            strategy.as_deref(),
            sequential,
            top,
            top_interior,
            &format,
            show_paths,
        ),
        Commands::Path { from, to, all } => cmd_path(&config, &data_path, &from, &to, all),
        Commands::Search { query, limit } => cmd_search(&config, &data_path, &query, limit),
        Commands::Info => cmd_info(&config, &data_path),
        Commands::Export {
            format,
            view,
            highlight,
        } => cmd_export(&config, &data_path, &format, &view, &highlight),
        Commands::Validate => cmd_validate(&data_path),
    }
}

/// Load the dataset with configured aliases folded in.
fn load_dataset(config: &CastnetConfig, data_path: &Path) -> Result<Dataset> {
    if !castnet_core::storage::dataset_exists(data_path) {
        anyhow::bail!(
            "No dataset found at {}. Pass --data or set dataset.path in .castnet/config.toml.",
            data_path.display()
        );
    }
    castnet_core::storage::load_canonical(data_path, &config.dataset.aliases)
}

/// Resolve a user-typed player name or fail with suggestions.
fn resolve<'a>(dataset: &'a Dataset, query: &str) -> Result<&'a str> {
    if let Some(name) = castnet_nav::search::resolve_player(dataset, query) {
        return Ok(name);
    }
    let hits = castnet_nav::search::search_players(dataset, query, 5);
    if hits.is_empty() {
        anyhow::bail!("No player matches '{}'.", query);
    }
    let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
    anyhow::bail!(
        "'{}' is ambiguous. Did you mean: {}?",
        query,
        names.join(", ")
    )
}

/// Resolve a player name to its node in the condensed graph.
fn condensed_node_for(dataset: &Dataset, query: &str) -> Result<String> {
    let name = resolve(dataset, query)?;
    castnet_core::seasons::condensed_node(dataset, name)
        .with_context(|| format!("no condensed node for {}", name))
}

fn parse_export_format(format: &str) -> Result<ExportFormat> {
    match format {
        "dot" | "graphviz" => Ok(ExportFormat::Dot),
        "mermaid" | "md" => Ok(ExportFormat::Mermaid),
        _ => anyhow::bail!("Unknown export format: {}. Use 'dot' or 'mermaid'.", format),
    }
}

#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
fn cmd_analyze(
    config: &CastnetConfig,
    data_path: &Path,
    strategy: Option<&str>,
    sequential: bool,
    top: Option<usize>,
    top_interior: Option<usize>,
    format: &str,
    show_paths: bool,
) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let json = match format {
        "text" => false,
        "json" => true,
        _ => anyhow::bail!("Unknown output format: {}. Use 'text' or 'json'.", format),
    };
    let strategy: Strategy = match strategy {
        Some(s) => s.parse()?,
        None => config.analysis.strategy,
    };
    let options = DiameterOptions {
        strategy,
        parallel: config.analysis.parallel && !sequential,
    };

    let dataset = load_dataset(config, data_path)?;
    let graph = CastGraph::from_dataset(&dataset);
    eprintln!(
        "Loaded {} players across {} seasons ({} connections)",
        graph.node_count(),
        dataset.seasons().len(),
        graph.edge_count()
    );

    let pb = ProgressBar::new(graph.node_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Sweeping [{bar:30.cyan/blue}] {pos}/{len} players")
            .expect("valid template")
            .progress_chars("##-"),
    );
    let witness =
        castnet_nav::diameter::find_diameter_with_progress(&graph, options, |_| pb.inc(1));
    pb.finish_and_clear();

    let report = castnet_nav::report::DiameterReport::build(&graph, witness, strategy, show_paths);
    if json {
        println!("{}", castnet_nav::report::format_json(&report)?);
    } else {
        print!(
            "{}",
            castnet_nav::report::format_text(
                &report,
                &dataset,
                top.unwrap_or(config.report.top_endpoints),
                top_interior.unwrap_or(config.report.top_interior),
            )
        );
    }

    Ok(())
}

fn cmd_path(
    config: &CastnetConfig,
    data_path: &Path,
    from: &str,
    to: &str,
    all: bool,
) -> Result<()> {
    let dataset = load_dataset(config, data_path)?;
    let graph = CastGraph::from_dataset(&dataset);
    let from = resolve(&dataset, from)?;
    let to = resolve(&dataset, to)?;

    let paths = if all {
        castnet_nav::paths::find_all_shortest_paths(&graph, from, to)
    } else {
        castnet_nav::paths::find_shortest_path(&graph, from, to)
            .into_iter()
            .collect()
    };

    if paths.is_empty() {
        println!("No connection between {} and {}.", from, to);
        return Ok(());
    }

    println!(
        "Found {} path{} of length {} between {} and {}:",
        paths.len(),
        if paths.len() == 1 { "" } else { "s" },
        paths[0].len(),
        from,
        to
    );
    for path in &paths {
        println!("  {}", path.display());
        for (a, b) in path.hops() {
            let shared: Vec<String> = match (dataset.get(a), dataset.get(b)) {
                (Some(pa), Some(pb)) => pa
                    .seasons
                    .intersection(&pb.seasons)
                    .map(u32::to_string)
                    .collect(),
                _ => Vec::new(),
            };
            println!("    {} - {} (season {})", a, b, shared.join(", "));
        }
    }

    Ok(())
}

fn cmd_search(
    config: &CastnetConfig,
    data_path: &Path,
    query: &str,
    limit: Option<usize>,
) -> Result<()> {
    let dataset = load_dataset(config, data_path)?;
    let limit = limit.unwrap_or(config.report.search_limit);
    let hits = castnet_nav::search::search_players(&dataset, query, limit);

    if hits.is_empty() {
        println!("No players match '{}'.", query);
        return Ok(());
    }
    if hits[0].fuzzy {
        println!("No exact matches; closest names:");
    }
    for hit in &hits {
        let seasons: Vec<String> = hit.seasons.iter().map(u32::to_string).collect();
        println!("{} - Seasons: {}", hit.name, seasons.join(", "));
    }

    Ok(())
}

fn cmd_info(config: &CastnetConfig, data_path: &Path) -> Result<()> {
    let dataset = load_dataset(config, data_path)?;
    let graph = CastGraph::from_dataset(&dataset);
    let seasons = dataset.seasons();
    let mut links = castnet_core::seasons::season_links(&dataset);

    println!("Dataset: {}", data_path.display());
    println!("Players: {}", dataset.len());
    println!("Returning players: {}", dataset.returning_players().len());
    println!(
        "Seasons: {} ({}-{})",
        seasons.len(),
        seasons.first().copied().unwrap_or(0),
        seasons.last().copied().unwrap_or(0)
    );
    if let Some((season, size)) = castnet_core::seasons::season_sizes(&dataset)
        .into_iter()
        .max_by_key(|&(season, size)| (size, std::cmp::Reverse(season)))
    {
        println!("Largest cast: Season {} ({} players)", season, size);
    }
    println!("Connections: {}", graph.edge_count());

    let isolated = graph.isolated_nodes();
    println!("Isolated players: {}", isolated.len());
    for name in isolated.iter().take(10) {
        println!("  {}", name);
    }

    if let Some(hub) = graph
        .nodes()
        .max_by_key(|n| (graph.degree(n).unwrap_or(0), std::cmp::Reverse(*n)))
    {
        println!(
            "Most connected: {} ({} connections)",
            hub,
            graph.degree(hub).unwrap_or(0)
        );
    }

    println!("Season overlaps: {}", links.len());
    links.sort_by(|a, b| b.weight().cmp(&a.weight()));
    for link in links.iter().take(5) {
        println!(
            "  Season {} & Season {}: {} shared ({})",
            link.a,
            link.b,
            link.weight(),
            link.shared.join(", ")
        );
    }

    Ok(())
}

fn cmd_export(
    config: &CastnetConfig,
    data_path: &Path,
    format: &str,
    view: &str,
    highlight: &[String],
) -> Result<()> {
    let export_format = parse_export_format(format)?;
    let dataset = load_dataset(config, data_path)?;

    let output = match view {
        "players" => {
            let graph = CastGraph::from_dataset(&dataset);
            let paths = match highlight {
                [from, to] => {
                    let from = resolve(&dataset, from)?;
                    let to = resolve(&dataset, to)?;
                    castnet_nav::paths::find_all_shortest_paths(&graph, from, to)
                }
                _ => Vec::new(),
            };
            castnet_nav::export::export_players(&graph, &paths, export_format)
        }
        "condensed" => {
            let graph = castnet_core::seasons::condensed_graph(&dataset);
            let paths = match highlight {
                [from, to] => {
                    let from = condensed_node_for(&dataset, from)?;
                    let to = condensed_node_for(&dataset, to)?;
                    castnet_nav::paths::find_all_shortest_paths(&graph, &from, &to)
                }
                _ => Vec::new(),
            };
            castnet_nav::export::export_players(&graph, &paths, export_format)
        }
        "seasons" => {
            if !highlight.is_empty() {
                tracing::warn!("--highlight is ignored for the seasons view");
            }
            let links = castnet_core::seasons::season_links(&dataset);
            castnet_nav::export::export_seasons(&links, &dataset.seasons(), export_format)
        }
        _ => anyhow::bail!(
            "Unknown view: {}. Use 'players', 'seasons' or 'condensed'.",
            view
        ),
    };
    print!("{}", output);

    Ok(())
}

fn cmd_validate(data_path: &Path) -> Result<()> {
    // Raw load: alias merging could hide the problems being checked
    let dataset = castnet_core::storage::load(data_path)?;
    let issues = dataset.validate();

    for issue in &issues {
        println!("WARN: {}", issue);
    }

    if issues.is_empty() {
        println!("Dataset OK: {} players, no issues found.", dataset.len());
    } else {
        println!("\n{} issue(s) found.", issues.len());
    }

    Ok(())
}
