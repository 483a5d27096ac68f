mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use docgraph_core::store::{ContentStore, FastEmbedder, MemoryStore, SurrealStore};
use docgraph_core::visualize::render_html;
use docgraph_core::{load_elements, Config, DocumentGraph, ExportReport, Exporter, HierarchyBuilder};

#[derive(Parser)]
#[command(name = "docgraph")]
#[command(about = "Build document structure graphs and export them to a graph-vector store", long_about = None)]
struct Cli {
    /// Path to a config file (default: ./docgraph.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds a graph from elements.
#[derive(clap::Args)]
struct GraphArgs {
    /// JSON file holding the partitioned document elements
    input: PathBuf,

    /// Document name used as the root node id (default: input file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Honor explicit parent ids instead of inferring sections from titles
    #[arg(long)]
    no_infer: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default docgraph.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Build the document graph and print a summary
    Build {
        #[command(flatten)]
        graph: GraphArgs,

        /// Write the graph as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build the graph and store one record per node
    Export {
        #[command(flatten)]
        graph: GraphArgs,

        /// Keep records in memory instead of opening the database
        #[arg(long)]
        dry_run: bool,

        /// Remove previously stored records first
        #[arg(long)]
        reset: bool,

        /// Stop after this many records
        #[arg(long)]
        limit: Option<usize>,

        /// Records per store call
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Render the graph to a standalone HTML page
    Plot {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output name; ".html" is appended (default: document name)
        #[arg(short, long)]
        output: Option<String>,

        /// Open the page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Serve the graph visualization over HTTP
    Serve {
        #[command(flatten)]
        graph: GraphArgs,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
    /// Find stored nodes similar to a query
    Search {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum results
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Also print the nodes each hit links to
        #[arg(long)]
        expand: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Init { force } => init_config(force)?,
        Commands::Build { graph, output } => {
            let config = load_config(config_path.as_deref())?;
            let graph = build_graph(&graph, &config)?;
            println!(
                "Built graph for {}: {} nodes, {} edges",
                graph.root_id(),
                graph.node_count(),
                graph.edge_count()
            );
            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&graph.snapshot())?;
                std::fs::write(&output, json)
                    .wrap_err_with(|| format!("failed to write {}", output.display()))?;
                println!("Graph written to {}", output.display());
            }
        }
        Commands::Export {
            graph,
            dry_run,
            reset,
            limit,
            batch_size,
        } => {
            let config = load_config(config_path.as_deref())?;
            let graph = build_graph(&graph, &config)?;
            let batch_size = batch_size.unwrap_or(config.store.batch_size);
            let reset = reset || config.store.reset_on_start;

            let report = if dry_run {
                let store = MemoryStore::new();
                export_graph(&store, &graph, batch_size, limit, false).await?
            } else {
                let store = open_store(&config).await?;
                export_graph(&store, &graph, batch_size, limit, reset).await?
            };

            println!("{}", report);
            for failure in report.failures() {
                if let Err(e) = &failure.result {
                    eprintln!("  {}: {}", failure.id, e);
                }
            }
        }
        Commands::Plot { graph, output, open } => {
            let config = load_config(config_path.as_deref())?;
            let graph = build_graph(&graph, &config)?;
            let dir = PathBuf::from(&config.visualization.output_dir);
            std::fs::create_dir_all(&dir)
                .wrap_err_with(|| format!("failed to create {}", dir.display()))?;

            let name = output.unwrap_or_else(|| graph.root_id().to_string());
            let path = render_html(&graph, dir.join(name))?;
            println!("Graph rendered to {}", path.display());

            if open {
                if let Err(e) = open::that(&path) {
                    eprintln!("Could not open browser: {}", e);
                }
            }
        }
        Commands::Serve { graph, port, no_open } => {
            let config = load_config(config_path.as_deref())?;
            let graph = build_graph(&graph, &config)?;
            serve::start_server(serve::ServeConfig {
                port: port.unwrap_or(config.visualization.port),
                open_browser: !no_open && config.visualization.open_browser,
                graph,
            })
            .await?;
        }
        Commands::Search { query, limit, expand } => {
            let config = load_config(config_path.as_deref())?;
            let store = open_store(&config).await?;
            let query = query.join(" ");
            let hits = store.search(&query, limit).await?;
            if hits.is_empty() {
                println!("No matches for {:?}", query);
            }

            for hit in hits {
                println!("{:.3}  {} ({})", hit.score, hit.node_id, hit.node_type);
                if let Some(preview) = &hit.preview {
                    println!("       {}", preview.replace('\n', " "));
                }
                if expand {
                    for neighbor in store.linked(&hit.node_id).await? {
                        println!("       -> {} ({})", neighbor.id, neighbor.metadata.node_type);
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    config.wrap_err("failed to load configuration")
}

fn init_config(force: bool) -> Result<()> {
    let path = Path::new("docgraph.toml");
    if path.exists() && !force {
        bail!("docgraph.toml already exists; use --force to overwrite it");
    }
    std::fs::write(path, Config::default_config_string())
        .wrap_err("failed to write docgraph.toml")?;
    println!("Created docgraph.toml");
    Ok(())
}

fn build_graph(args: &GraphArgs, config: &Config) -> Result<DocumentGraph> {
    let elements = load_elements(&args.input)
        .wrap_err_with(|| format!("failed to load elements from {}", args.input.display()))?;

    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string()),
    };

    let mut hierarchy = config.hierarchy;
    if args.no_infer {
        hierarchy.infer_hierarchy = false;
    }

    let mut builder = HierarchyBuilder::with_config(name, hierarchy);
    let summary = builder.process_all(&elements)?;
    info!(%summary, "graph built");
    for tag in &summary.unknown {
        eprintln!("Ignored element of unknown type {:?}", tag);
    }

    Ok(builder.into_graph())
}

async fn open_store(config: &Config) -> Result<SurrealStore> {
    let cache_dir = config.embedding.cache_dir.as_ref().map(PathBuf::from);
    let embedder = FastEmbedder::from_name(&config.embedding.model, cache_dir)
        .wrap_err("failed to load the embedding model")?;

    let store = SurrealStore::open(&config.store, Arc::new(embedder))
        .await
        .wrap_err_with(|| format!("failed to open store at {}", config.store.db_path().display()))?;
    Ok(store)
}

async fn export_graph<S: ContentStore>(
    store: &S,
    graph: &DocumentGraph,
    batch_size: usize,
    limit: Option<usize>,
    reset: bool,
) -> Result<ExportReport> {
    store.initialize().await?;
    if reset {
        store.reset().await?;
        info!("store reset");
    }

    let mut exporter = Exporter::new(store).with_batch_size(batch_size);
    if let Some(limit) = limit {
        exporter = exporter.with_limit(limit);
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = exporter
        .export_with_progress(graph, |progress| {
            pb.set_length(progress.total as u64);
            pb.set_position(progress.processed as u64);
            if progress.failed > 0 {
                pb.set_message(format!("{} failed", progress.failed));
            }
        })
        .await;
    pb.finish_and_clear();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plot_opens_only_when_asked() {
        let cli = Cli::try_parse_from(["docgraph", "plot", "elements.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Plot { open: false, .. }));

        let cli = Cli::try_parse_from(["docgraph", "plot", "elements.json", "--open"]).unwrap();
        assert!(matches!(cli.command, Commands::Plot { open: true, .. }));
    }

    #[test]
    fn test_export_flags() {
        let cli = Cli::try_parse_from([
            "docgraph",
            "export",
            "elements.json",
            "--dry-run",
            "--limit",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                graph,
                dry_run,
                reset,
                limit,
                batch_size,
            } => {
                assert_eq!(graph.input, PathBuf::from("elements.json"));
                assert!(dry_run);
                assert!(!reset);
                assert_eq!(limit, Some(5));
                assert_eq!(batch_size, None);
            }
            _ => panic!("expected export"),
        }
    }
}
