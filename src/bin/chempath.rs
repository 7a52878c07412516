//! `chempath` — serve the reaction graph over HTTP, or query it from the shell.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chempath::server::{self, AppState};
use chempath::{seed, Graph, MemoryBackend, QueryLimits};

#[derive(Parser, Debug)]
#[command(name = "chempath")]
#[command(author, version, about = "Chemical reaction pathway finder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0", env = "CHEMPATH_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8000", env = "CHEMPATH_PORT")]
        port: u16,

        /// Load the built-in reaction dataset at startup
        #[arg(long, env = "CHEMPATH_SEED")]
        seed: bool,

        /// Extra dataset file to load at startup
        #[arg(long, env = "CHEMPATH_DATASET")]
        dataset: Option<PathBuf>,

        /// Comma-separated allowed CORS origins (unset: permissive)
        #[arg(long, env = "CHEMPATH_CORS_ORIGIN")]
        cors_origin: Option<String>,
    },

    /// Print every reaction walk from START to END, shortest first.
    Find {
        start: String,
        end: String,

        /// Longest walk to consider
        #[arg(short, long)]
        max_steps: Option<usize>,

        /// Dataset file loaded on top of the built-in one
        #[arg(long, env = "CHEMPATH_DATASET")]
        dataset: Option<PathBuf>,
    },

    /// Write the graph as a Cypher script to stdout.
    Export {
        /// Dataset file loaded on top of the built-in one
        #[arg(long, env = "CHEMPATH_DATASET")]
        dataset: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Serve { host, port, seed, dataset, cors_origin } => {
            let graph = open_graph(seed, dataset.as_deref()).await?;
            serve(graph, &host, port, cors_origin.as_deref()).await
        }
        Command::Find { start, end, max_steps, dataset } => {
            let graph = open_graph(true, dataset.as_deref()).await?;
            let paths = graph.find_paths(&start, &end, max_steps).await?;
            if paths.is_empty() {
                println!("No reaction paths from {start} to {end}.");
            }
            for (i, path) in paths.iter().enumerate() {
                let steps = path.total_steps;
                println!("Path {} ({steps} step{}):", i + 1, if steps == 1 { "" } else { "s" });
                print!("{}", path.describe());
                println!();
            }
            Ok(())
        }
        Command::Export { dataset } => {
            let graph = open_graph(true, dataset.as_deref()).await?;
            let mut out = std::io::stdout().lock();
            chempath::export::export_cypher_dump(graph.backend(), &mut out).await?;
            Ok(())
        }
    }
}

async fn open_graph(builtin: bool, dataset: Option<&std::path::Path>) -> anyhow::Result<Graph<MemoryBackend>> {
    let limits = QueryLimits::from_env();
    tracing::debug!(?limits, "query limits");
    let graph = Graph::open_memory().await?.with_limits(limits);

    if builtin {
        seed::ingest(&graph, &seed::builtin()?).await?;
    }
    if let Some(path) = dataset {
        let sets = seed::load_file(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        seed::ingest(&graph, &sets).await?;
    }
    Ok(graph)
}

async fn serve(graph: Graph<MemoryBackend>, host: &str, port: u16, cors: Option<&str>) -> anyhow::Result<()> {
    let state = AppState::new(graph);
    let app = server::app(state.clone(), cors);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("chempath listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.graph.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
