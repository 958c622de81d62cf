//! Chunking Feature
//!
//! Splits each analyzed file into overlapping, boundary-aligned chunks that
//! carry the file's structural metadata.
//!
//! ## Structure
//! - `domain/` - ContentChunk, ChunkMetadata, reconstruction
//! - `application/` - ContentChunker (token budget, boundary search, overlap)

pub mod application;
pub mod domain;

pub use application::{
    chunk_document, estimate_total_chunks, plan_chunks, ChunkSpan, ContentChunker,
    CHARS_PER_TOKEN,
};
pub use domain::{reconstruct, ChunkMetadata, ContentChunk};
