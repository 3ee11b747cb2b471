//! attrank CLI: rank the nodes of a JSON graph snapshot
//!
//! Reads a `{ "nodes": [...], "edges": [...] }` snapshot and an optional
//! YAML/JSON run configuration. Results go to stdout, logs to stderr.

use anyhow::{Context, Result};
use attrank::algo::{initial_weights, GraphAccessor};
use attrank::{rank, top_k, GraphStore, RankConfig, RankView, WeightMap};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "attrank", version, about = "Multi-attribute PageRank over graph snapshots")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the nodes of a graph snapshot
    Rank {
        /// Graph snapshot (JSON)
        graph: PathBuf,

        /// Run configuration (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only report this attribute
        #[arg(long)]
        attribute: Option<String>,

        /// Number of nodes listed per attribute
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Spread each round across all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Show the normalized starting weights of a graph snapshot
    Initial {
        /// Graph snapshot (JSON)
        graph: PathBuf,

        /// Run configuration (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize a graph snapshot
    Info {
        /// Graph snapshot (JSON)
        graph: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Rank { graph, config, attribute, top, parallel } => {
            run_rank(graph, config.as_deref(), attribute.as_deref(), *top, *parallel, &cli.format)
        }
        Commands::Initial { graph, config } => run_initial(graph, config.as_deref(), &cli.format),
        Commands::Info { graph } => run_info(graph, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(path: &Path) -> Result<GraphStore> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let store = GraphStore::from_json_str(&json).with_context(|| format!("loading {}", path.display()))?;
    info!("Loaded {} nodes and {} edges", store.node_count(), store.edge_count());
    Ok(store)
}

fn load_config(path: Option<&Path>) -> Result<RankConfig> {
    match path {
        Some(path) => RankConfig::load(path).with_context(|| format!("loading config {}", path.display())),
        None => Ok(RankConfig::default()),
    }
}

fn run_rank(
    graph: &Path,
    config: Option<&Path>,
    attribute: Option<&str>,
    top: usize,
    parallel: bool,
    format: &OutputFormat,
) -> Result<()> {
    let store = load_graph(graph)?;
    let mut config = load_config(config)?;
    config.parallel |= parallel;

    let ranks = rank(&store, &config)?;
    print_weights(&ranks, attribute, top, format)
}

fn run_initial(graph: &Path, config: Option<&Path>, format: &OutputFormat) -> Result<()> {
    let store = load_graph(graph)?;
    let config = load_config(config)?;

    let view = RankView::new(&store, &config.view);
    let weights = initial_weights(&view);
    print_weights(&weights, None, view.node_count(), format)
}

fn run_info(graph: &Path, format: &OutputFormat) -> Result<()> {
    let store = load_graph(graph)?;
    let view = RankView::new(&store, &Default::default());
    let dangling = view.nodes().into_iter().filter(|n| view.edges(n).is_empty()).count();

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "nodes": store.node_count(),
                "edges": store.edge_count(),
                "dangling_nodes": dangling,
                "attributes": view.attributes(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!("Nodes:      {}", store.node_count());
            println!("Edges:      {}", store.edge_count());
            println!("Dangling:   {}", dangling);
            println!("Attributes: {}", view.attributes().join(", "));
        }
    }

    Ok(())
}

/// Attribute keys present in `weights`, in first-seen order
fn attribute_keys(weights: &WeightMap) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in weights.values().flat_map(|v| v.keys()) {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}

fn print_weights(weights: &WeightMap, attribute: Option<&str>, top: usize, format: &OutputFormat) -> Result<()> {
    let attributes = match attribute {
        Some(attribute) => vec![attribute.to_string()],
        None => attribute_keys(weights),
    };
    let ranked: Vec<(String, Vec<(String, f64)>)> = attributes
        .into_iter()
        .map(|attribute| {
            let best = top_k(weights, &attribute, top);
            (attribute, best)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json: serde_json::Map<String, serde_json::Value> = ranked
                .iter()
                .map(|(attribute, best)| {
                    let rows = best
                        .iter()
                        .map(|(node, weight)| serde_json::json!({ "node": node, "weight": weight }))
                        .collect();
                    (attribute.clone(), serde_json::Value::Array(rows))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            println!("attribute,rank,node,weight");
            for (attribute, best) in &ranked {
                for (idx, (node, weight)) in best.iter().enumerate() {
                    println!("{},{},{},{}", format_csv_value(attribute), idx + 1, format_csv_value(node), weight);
                }
            }
        }
        OutputFormat::Table => {
            if ranked.iter().all(|(_, best)| best.is_empty()) {
                println!("(no results)");
                return Ok(());
            }

            for (attribute, best) in &ranked {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["#", "Node", attribute.as_str()]);

                for (idx, (node, weight)) in best.iter().enumerate() {
                    table.add_row(vec![(idx + 1).to_string(), node.clone(), format!("{:.6}", weight)]);
                }

                println!("{}", table);
            }
        }
    }

    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
