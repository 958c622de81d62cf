//! Boundary-aware content chunker
//!
//! Budgets are in approximate tokens: 4 chars of content per token, a fixed
//! ratio rather than a real tokenizer. Every cut lands on a char boundary.
//!
//! A file whose `char_count / 4` fits the chunk budget becomes a single chunk.
//! Otherwise the content is scanned left to right. Each time the remaining
//! content reaches the budget, the cut point is searched backward from the
//! budget boundary inside the overlap window for, in priority order, a
//! closing brace + newline, a statement terminator + newline, a blank line,
//! a newline, then a sentence end. Without a match the cut is hard. The next
//! chunk starts `overlap` chars before the cut.

use std::ops::Range;

use crate::config::{ChunkingConfig, ConfigResult};
use crate::features::chunking::domain::{ChunkMetadata, ContentChunk};
use crate::shared::models::AnalysisDocument;

/// Content chars per approximate token
pub const CHARS_PER_TOKEN: usize = 4;

/// Cut tokens, highest priority first
pub const BOUNDARY_TOKENS: [&str; 5] = ["}\n", ";\n", "\n\n", "\n", ". "];

/// One planned chunk: byte range plus the length repeated from the previous chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    pub range: Range<usize>,
    pub overlap_prefix_len: usize,
}

/// Splits documents into overlapping, boundary-aligned chunks
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentChunker {
    config: ChunkingConfig,
}

impl ContentChunker {
    /// Create a chunker with validated budgets
    pub fn new(config: ChunkingConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk one document
    pub fn chunk(&self, document: &AnalysisDocument) -> Vec<ContentChunk> {
        let spans = plan_chunks(
            &document.raw_content,
            self.config.chunk_size_tokens,
            self.config.overlap_tokens,
        );
        let total = spans.len();

        spans
            .into_iter()
            .enumerate()
            .map(|(i, span)| ContentChunk {
                source_file: document.file_path.clone(),
                index: i + 1,
                total_chunks: total,
                text: document.raw_content[span.range].to_string(),
                overlap_prefix_len: span.overlap_prefix_len,
                metadata: ChunkMetadata::for_document(document, i + 1, total),
            })
            .collect()
    }
}

/// Chunk one document with explicit budgets
pub fn chunk_document(
    document: &AnalysisDocument,
    chunk_size_tokens: usize,
    overlap_tokens: usize,
) -> ConfigResult<Vec<ContentChunk>> {
    let chunker = ContentChunker::new(ChunkingConfig::new(chunk_size_tokens, overlap_tokens))?;
    Ok(chunker.chunk(document))
}

/// `ceil(char_count / (chunk_size * 4))`, at least 1
///
/// Lower bound of the planned count: overlap and early boundary cuts can
/// only add chunks.
pub fn estimate_total_chunks(char_count: usize, chunk_size_tokens: usize) -> usize {
    let budget = chunk_size_tokens.max(1) * CHARS_PER_TOKEN;
    char_count.div_ceil(budget).max(1)
}

/// Plan chunk byte ranges for `content`
///
/// Budgets, windows and overlap are measured in chars; only the returned
/// spans are byte offsets. The full plan is computed before any chunk is
/// emitted so every chunk of a file reports the same total.
pub fn plan_chunks(content: &str, chunk_size_tokens: usize, overlap_tokens: usize) -> Vec<ChunkSpan> {
    // Byte offset of every char, plus the end of the content
    let offsets: Vec<usize> = content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .collect();
    let len = offsets.len() - 1;

    if len / CHARS_PER_TOKEN <= chunk_size_tokens {
        return vec![ChunkSpan {
            range: 0..content.len(),
            overlap_prefix_len: 0,
        }];
    }

    let budget = chunk_size_tokens.max(1) * CHARS_PER_TOKEN;
    let overlap = overlap_tokens * CHARS_PER_TOKEN;

    let mut spans = Vec::with_capacity(estimate_total_chunks(len, chunk_size_tokens) + 1);
    let mut start = 0;
    // End of the previous chunk; everything before it has been emitted
    let mut emitted = 0;

    while len - start >= budget {
        let target_end = start + budget;
        let window_start = target_end.saturating_sub(overlap).max(start).max(emitted);

        let cut = find_cut(content, &offsets, window_start, target_end).unwrap_or(target_end);
        spans.push(span(&offsets, start, cut, emitted));
        emitted = cut;

        if cut >= len {
            return spans;
        }

        let next = cut.saturating_sub(overlap);
        // An overlap that would not move the window forward is dropped
        start = if next > start { next } else { cut };
    }

    if emitted < len {
        spans.push(span(&offsets, start, len, emitted));
    }
    spans
}

/// Byte span of chars `[start, end)`, repeating chars `[start, emitted)`
fn span(offsets: &[usize], start: usize, end: usize, emitted: usize) -> ChunkSpan {
    ChunkSpan {
        range: offsets[start]..offsets[end],
        overlap_prefix_len: offsets[emitted.max(start)] - offsets[start],
    }
}

/// Char index just past the last, highest-priority boundary token inside
/// chars `[from, to)`
fn find_cut(content: &str, offsets: &[usize], from: usize, to: usize) -> Option<usize> {
    let base = offsets[from];
    let window = content.get(base..offsets[to])?;
    BOUNDARY_TOKENS.iter().find_map(|token| {
        window
            .rfind(token)
            .and_then(|pos| offsets.binary_search(&(base + pos + token.len())).ok())
    })
}
