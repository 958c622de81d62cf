//! Chunking domain

mod chunk;

pub use chunk::{reconstruct, ChunkMetadata, ContentChunk};
