//! In-memory adapters

use async_trait::async_trait;
use codechat_analysis::{ContentChunk, SourceFile};
use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;

use crate::error::{OrchestratorError, Result};
use crate::ports::{ChunkIndexer, RepositorySource};

/// Fixed file lists per repository identifier
#[derive(Debug, Default)]
pub struct InMemorySource {
    repositories: DashMap<String, Vec<SourceFile>>,
    failures: DashMap<String, String>,
    latency: Option<Duration>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch, for observing in-flight runs
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&self, repo_id: impl Into<String>, files: Vec<SourceFile>) {
        self.repositories.insert(repo_id.into(), files);
    }

    /// Make fetches of `repo_id` fail with `message`
    pub fn fail_with(&self, repo_id: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(repo_id.into(), message.into());
    }
}

#[async_trait]
impl RepositorySource for InMemorySource {
    async fn fetch_files(&self, repo_id: &str) -> Result<Vec<SourceFile>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = self.failures.get(repo_id) {
            return Err(OrchestratorError::Fetch(message.value().clone()));
        }
        self.repositories
            .get(repo_id)
            .map(|files| files.value().clone())
            .ok_or_else(|| OrchestratorError::Fetch(format!("Unknown repository: {}", repo_id)))
    }
}

/// Collects indexed chunks per repository identifier
#[derive(Debug, Default)]
pub struct InMemoryChunkIndex {
    chunks: DashMap<String, Vec<ContentChunk>>,
    batches: DashMap<String, usize>,
}

impl InMemoryChunkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every chunk indexed for `repo_id`, in arrival order
    pub fn chunks(&self, repo_id: &str) -> Vec<ContentChunk> {
        self.chunks
            .get(repo_id)
            .map(|c| c.value().clone())
            .unwrap_or_default()
    }

    /// Number of `index_chunks` calls for `repo_id` since the last discard
    pub fn batch_count(&self, repo_id: &str) -> usize {
        self.batches.get(repo_id).map(|n| *n.value()).unwrap_or(0)
    }

}

#[async_trait]
impl ChunkIndexer for InMemoryChunkIndex {
    async fn index_chunks(&self, repo_id: &str, chunks: &[ContentChunk]) -> Result<()> {
        self.chunks
            .entry(repo_id.to_string())
            .or_default()
            .extend_from_slice(chunks);
        *self.batches.entry(repo_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn discard_chunks(&self, repo_id: &str) -> Result<()> {
        self.chunks.remove(repo_id);
        self.batches.remove(repo_id);
        Ok(())
    }
}

/// Discards every chunk
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChunkIndexer;

#[async_trait]
impl ChunkIndexer for NoopChunkIndexer {
    async fn index_chunks(&self, repo_id: &str, chunks: &[ContentChunk]) -> Result<()> {
        debug!("Repo {}: discarding {} chunks", repo_id, chunks.len());
        Ok(())
    }

    async fn discard_chunks(&self, _repo_id: &str) -> Result<()> {
        Ok(())
    }
}
