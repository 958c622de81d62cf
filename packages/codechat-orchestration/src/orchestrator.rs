//! Repository analysis orchestrator
//!
//! One run per repository identifier: fetch → extract → graph → chunk → index.
//! Runs never report failure to the caller; the outcome is only visible
//! through `get_status`. Collaborator calls and CPU stages run as their own
//! tasks, so a panic fails the run instead of the caller.

use codechat_analysis::{
    ContentChunk, ContentChunker, DependencyGraph, DependencyGraphBuilder, StructuralExtractor,
};
use dashmap::{DashMap, DashSet};
use rayon::prelude::*;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::OrchestratorConfig;
use crate::error::{OrchestratorError, Result};
use crate::ports::{ChunkIndexer, RepositorySource};
use crate::status::{AnalysisStateMachine, AnalysisStatus, StatusStore};

/// Marks a repository as in flight until dropped
struct RunGuard {
    repo_id: String,
    in_flight: Arc<DashSet<String>>,
}

impl RunGuard {
    fn acquire(in_flight: &Arc<DashSet<String>>, repo_id: &str) -> Result<Self> {
        if !in_flight.insert(repo_id.to_string()) {
            return Err(OrchestratorError::Conflict(repo_id.to_string()));
        }
        Ok(Self {
            repo_id: repo_id.to_string(),
            in_flight: Arc::clone(in_flight),
        })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.repo_id);
    }
}

/// Sequences the analysis stages and publishes status after each one
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    source: Arc<dyn RepositorySource>,
    indexer: Arc<dyn ChunkIndexer>,
    statuses: Arc<StatusStore>,
    graphs: Arc<DashMap<String, Arc<DependencyGraph>>>,
    in_flight: Arc<DashSet<String>>,
    extractor: StructuralExtractor,
    chunker: ContentChunker,
    config: OrchestratorConfig,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator with validated configuration
    pub fn new(
        source: Arc<dyn RepositorySource>,
        indexer: Arc<dyn ChunkIndexer>,
        statuses: Arc<StatusStore>,
        config: OrchestratorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let chunker = ContentChunker::new(config.analysis.chunking)?;

        Ok(Self {
            source,
            indexer,
            statuses,
            graphs: Arc::new(DashMap::new()),
            in_flight: Arc::new(DashSet::new()),
            extractor: StructuralExtractor::new(config.analysis.clone()),
            chunker,
            config,
        })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Start a run in the background and return immediately
    ///
    /// Fails with `Conflict` when a run for `repo_id` is already active; the
    /// active run's status is left untouched.
    pub fn start_analysis(&self, repo_id: &str) -> Result<JoinHandle<()>> {
        let guard = RunGuard::acquire(&self.in_flight, repo_id)?;
        let this = self.clone();
        let repo_id = repo_id.to_string();

        Ok(tokio::spawn(async move {
            this.run(&repo_id, guard).await;
        }))
    }

    /// Run to completion and return the terminal status
    ///
    /// A failed run still returns `Ok` with a FAILED status; only `Conflict`
    /// is reported as an error.
    pub async fn analyze(&self, repo_id: &str) -> Result<AnalysisStatus> {
        let guard = RunGuard::acquire(&self.in_flight, repo_id)?;
        Ok(self.run(repo_id, guard).await)
    }

    pub fn get_status(&self, repo_id: &str) -> AnalysisStatus {
        self.statuses.get(repo_id)
    }

    /// Graph of the last successful run, if any
    pub fn get_dependency_graph(&self, repo_id: &str) -> Option<Arc<DependencyGraph>> {
        self.graphs.get(repo_id).map(|g| Arc::clone(g.value()))
    }

    pub fn is_running(&self, repo_id: &str) -> bool {
        self.in_flight.contains(repo_id)
    }

    async fn run(&self, repo_id: &str, _guard: RunGuard) -> AnalysisStatus {
        let run_id = Uuid::new_v4();
        let start_time = Instant::now();
        self.graphs.remove(repo_id);

        info!("Repo {}: starting analysis (run {})", repo_id, run_id);

        let mut sm = AnalysisStateMachine::for_run(repo_id, run_id);
        match self.execute(repo_id, &mut sm).await {
            Ok(()) => {
                let status = sm.status();
                info!(
                    "Repo {}: analysis completed - {} documents, {} nodes, {} edges, {} chunks in {}ms",
                    repo_id,
                    status.documents_extracted,
                    status.graph_nodes,
                    status.graph_edges,
                    status.chunks_indexed,
                    start_time.elapsed().as_millis()
                );
            }
            Err(e) => {
                error!("Repo {}: analysis failed: {}", repo_id, e);
                if let Err(transition_err) = sm.fail(e.status_message()) {
                    warn!("Repo {}: {}", repo_id, transition_err);
                }
                self.publish(&sm);
            }
        }

        sm.into_status()
    }

    async fn execute(&self, repo_id: &str, sm: &mut AnalysisStateMachine) -> Result<()> {
        // Stage 1: Fetch
        sm.start()?;
        self.publish(sm);

        let source = Arc::clone(&self.source);
        let id = repo_id.to_string();
        let files = contained("Fetch", async move { source.fetch_files(&id).await }).await?;
        info!("Repo {}: fetched {} files", repo_id, files.len());

        if files.is_empty() {
            info!("Repo {}: no files, nothing to analyze", repo_id);
            self.graphs
                .insert(repo_id.to_string(), Arc::new(DependencyGraph::new()));
            sm.complete()?;
            self.publish(sm);
            return Ok(());
        }

        sm.fetched(files.len())?;
        self.publish(sm);

        // Stage 2: Extract
        let extractor = self.extractor.clone();
        let batch = tokio::task::spawn_blocking(move || extractor.extract_batch(&files))
            .await
            .map_err(|e| stage_panicked("Extraction", e))?;

        if batch.has_failures() {
            if self.config.fail_on_parse_error {
                sm.record_extraction(&batch);
                return Err(OrchestratorError::extraction(&batch.failed_paths()));
            }
            warn!(
                "Repo {}: continuing without {} unparseable files",
                repo_id,
                batch.failures.len()
            );
        }
        info!(
            "Repo {}: extracted {} documents ({} skipped)",
            repo_id,
            batch.documents.len(),
            batch.skipped
        );
        sm.extracted(&batch)?;
        self.publish(sm);

        // Stage 3: Dependency graph
        let documents = Arc::new(batch.documents);
        let graph_docs = Arc::clone(&documents);
        let graph =
            tokio::task::spawn_blocking(move || DependencyGraphBuilder::new().build(&graph_docs))
                .await
                .map_err(|e| stage_panicked("Graph building", e))?;
        info!(
            "Repo {}: dependency graph has {} nodes, {} edges",
            repo_id,
            graph.node_count(),
            graph.edge_count()
        );
        sm.graph_built(graph.node_count(), graph.edge_count())?;
        self.publish(sm);

        // Stage 4: Chunk and index
        let chunker = self.chunker;
        let chunks: Vec<ContentChunk> = tokio::task::spawn_blocking(move || {
            documents
                .par_iter()
                .flat_map_iter(|doc| chunker.chunk(doc))
                .collect()
        })
        .await
        .map_err(|e| stage_panicked("Chunking", e))?;
        info!("Repo {}: indexing {} chunks", repo_id, chunks.len());

        // The index holds one run's chunks; a failed run leaves nothing behind
        self.discard_index(repo_id).await?;
        if let Err(e) = self.index_all(repo_id, Arc::new(chunks), sm).await {
            if let Err(rollback) = self.discard_index(repo_id).await {
                warn!("Repo {}: partial index not discarded: {}", repo_id, rollback);
            }
            return Err(e);
        }

        self.graphs.insert(repo_id.to_string(), Arc::new(graph));
        sm.complete()?;
        self.publish(sm);
        Ok(())
    }

    async fn index_all(
        &self,
        repo_id: &str,
        chunks: Arc<Vec<ContentChunk>>,
        sm: &mut AnalysisStateMachine,
    ) -> Result<()> {
        let batch_size = self.config.index_batch_size;
        for start in (0..chunks.len()).step_by(batch_size) {
            let end = (start + batch_size).min(chunks.len());
            let indexer = Arc::clone(&self.indexer);
            let batch = Arc::clone(&chunks);
            let id = repo_id.to_string();
            contained("Indexing", async move {
                indexer.index_chunks(&id, &batch[start..end]).await
            })
            .await?;

            sm.record_indexed(end - start)?;
            self.publish(sm);
        }
        Ok(())
    }

    async fn discard_index(&self, repo_id: &str) -> Result<()> {
        let indexer = Arc::clone(&self.indexer);
        let id = repo_id.to_string();
        contained("Index cleanup", async move { indexer.discard_chunks(&id).await }).await
    }

    fn publish(&self, sm: &AnalysisStateMachine) {
        self.statuses.put(sm.status().clone());
    }
}

/// Run `work` as its own task so that a panic surfaces as a stage error
async fn contained<T, F>(stage: &str, work: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| stage_panicked(stage, e))?
}

fn stage_panicked(stage: &str, e: tokio::task::JoinError) -> OrchestratorError {
    OrchestratorError::StageExecutionFailed(format!("{} panicked: {}", stage, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryChunkIndex, InMemorySource, NoopChunkIndexer};
    use crate::status::AnalysisState;

    fn orchestrator(source: InMemorySource) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(
            Arc::new(source),
            Arc::new(NoopChunkIndexer),
            Arc::new(StatusStore::new()),
            OrchestratorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let in_flight = Arc::new(DashSet::new());
        let guard = RunGuard::acquire(&in_flight, "repo").unwrap();
        assert!(matches!(
            RunGuard::acquire(&in_flight, "repo"),
            Err(OrchestratorError::Conflict(_))
        ));
        assert!(RunGuard::acquire(&in_flight, "other").is_ok());

        drop(guard);
        assert!(RunGuard::acquire(&in_flight, "repo").is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = OrchestratorConfig::default();
        config.index_batch_size = 0;
        let result = AnalysisOrchestrator::new(
            Arc::new(InMemorySource::new()),
            Arc::new(InMemoryChunkIndex::new()),
            Arc::new(StatusStore::new()),
            config,
        );
        assert!(matches!(result, Err(OrchestratorError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_captured_in_status() {
        let source = InMemorySource::new();
        source.fail_with("repo", "remote unavailable");
        let orch = orchestrator(source);

        let status = orch.analyze("repo").await.unwrap();
        assert_eq!(status.state, AnalysisState::Failed);
        assert_eq!(status.error.as_deref(), Some("remote unavailable"));
        assert_eq!(orch.get_status("repo"), status);
        assert!(!orch.is_running("repo"));
    }
}
