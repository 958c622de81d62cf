//! Application layer: chunk planning and emission

mod chunker;

pub use chunker::{
    chunk_document, estimate_total_chunks, plan_chunks, ChunkSpan, ContentChunker,
    BOUNDARY_TOKENS, CHARS_PER_TOKEN,
};
