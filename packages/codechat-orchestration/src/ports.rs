//! Collaborator ports
//!
//! The orchestrator only talks to source control and the embedding store
//! through these traits. Local adapters live in `adapters`.

use async_trait::async_trait;
use codechat_analysis::{ContentChunk, SourceFile};

use crate::error::Result;

/// Supplies the files of one repository snapshot
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_files(&self, repo_id: &str) -> Result<Vec<SourceFile>>;
}

/// Receives retrieval chunks for indexing
#[async_trait]
pub trait ChunkIndexer: Send + Sync {
    async fn index_chunks(&self, repo_id: &str, chunks: &[ContentChunk]) -> Result<()>;

    /// Drop every chunk indexed for `repo_id`
    async fn discard_chunks(&self, repo_id: &str) -> Result<()>;
}
