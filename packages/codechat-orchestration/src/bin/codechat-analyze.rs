//! Codechat analysis CLI
//!
//! Runs the full pipeline over a local checkout and writes the dependency
//! graph as JSON.
//!
//! # Usage
//!
//! ```bash
//! codechat-analyze --path ./my-service --repo-id my-service --output graph.json
//!
//! # Smaller chunks, verbose logging
//! RUST_LOG=debug codechat-analyze --path . --chunk-size 1000 --overlap 100
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use codechat_orchestration::{
    AnalysisOrchestrator, AnalysisState, InMemoryChunkIndex, LocalDirectorySource,
    OrchestratorConfig, StatusStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "codechat-analyze")]
#[command(about = "Dependency graph and retrieval chunks for a JVM repository", long_about = None)]
struct Cli {
    /// Repository root directory
    #[arg(short, long)]
    path: PathBuf,

    /// Repository identifier used in logs and status
    #[arg(long, default_value = "local")]
    repo_id: String,

    /// Revision label attached to every file
    #[arg(long, default_value = "working-tree")]
    revision: String,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chunk size in tokens (overrides the configuration)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Chunk overlap in tokens (overrides the configuration)
    #[arg(long)]
    overlap: Option<usize>,

    /// Write the graph JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => OrchestratorConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => OrchestratorConfig::default(),
    };
    if let Some(size) = cli.chunk_size {
        config.analysis.chunking.chunk_size_tokens = size;
    }
    if let Some(overlap) = cli.overlap {
        config.analysis.chunking.overlap_tokens = overlap;
    }

    let source = LocalDirectorySource::new(cli.revision.clone())
        .with_repository(cli.repo_id.clone(), cli.path.clone())
        .with_extensions(config.analysis.source_extensions.as_slice());
    let index = Arc::new(InMemoryChunkIndex::new());

    let orchestrator = AnalysisOrchestrator::new(
        Arc::new(source),
        index.clone(),
        Arc::new(StatusStore::new()),
        config,
    )?;

    let status = orchestrator.analyze(&cli.repo_id).await?;
    eprintln!("{}", status.to_json()?);

    if status.state != AnalysisState::Completed {
        bail!(
            "Analysis of {} failed: {}",
            cli.repo_id,
            status.error.as_deref().unwrap_or("unknown error")
        );
    }

    let graph = orchestrator
        .get_dependency_graph(&cli.repo_id)
        .context("completed run has no dependency graph")?;
    let json = graph.to_json()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote dependency graph to {}", path.display());
        }
        None => println!("{}", json),
    }

    for cycle in graph.cycles() {
        info!("Dependency cycle: {}", cycle.join(" -> "));
    }
    info!(
        "Indexed {} chunks from {} files",
        index.chunks(&cli.repo_id).len(),
        status.documents_extracted
    );

    Ok(())
}
