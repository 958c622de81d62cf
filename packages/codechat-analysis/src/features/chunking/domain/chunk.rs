//! Chunk Data Model
//!
//! A chunk is a bounded, possibly overlapping slice of one file's content,
//! annotated with the structural metadata of the whole file.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::shared::models::AnalysisDocument;

/// Structural metadata attached to every chunk of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    pub file_path: String,
    pub namespace: Option<String>,
    pub declared_types: Vec<String>,
    pub declared_members: Vec<String>,
    pub fields: Vec<String>,
    pub imported_symbols: Vec<String>,
    /// 1-based position of the chunk within its file
    pub chunk_index: usize,
    pub total_chunks: usize,
}

impl ChunkMetadata {
    pub fn for_document(doc: &AnalysisDocument, chunk_index: usize, total_chunks: usize) -> Self {
        Self {
            file_path: doc.file_path.clone(),
            namespace: doc.metadata.namespace.clone(),
            declared_types: doc.metadata.declared_types.clone(),
            declared_members: doc.metadata.declared_members.clone(),
            fields: doc.metadata.fields.clone(),
            imported_symbols: doc.metadata.imported_symbols.clone(),
            chunk_index,
            total_chunks,
        }
    }
}

/// A retrieval-ready slice of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    pub source_file: String,
    /// 1-based, increasing per file
    pub index: usize,
    /// Fixed for the file before the first chunk is emitted
    pub total_chunks: usize,
    pub text: String,
    /// Byte length of the leading part of `text` repeated from the previous chunk
    pub overlap_prefix_len: usize,
    pub metadata: ChunkMetadata,
}

impl ContentChunk {
    /// Text this chunk adds on top of the previous one
    pub fn new_text(&self) -> &str {
        self.text.get(self.overlap_prefix_len..).unwrap_or("")
    }

    pub fn is_first(&self) -> bool {
        self.index == 1
    }

    pub fn is_last(&self) -> bool {
        self.index == self.total_chunks
    }

    /// Text submitted to the embedding store: a header naming the file,
    /// its position, package, types and members, then the chunk content
    pub fn embedding_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 256);
        let _ = writeln!(
            out,
            "File: {} ({}/{})",
            self.source_file, self.index, self.total_chunks
        );
        let _ = writeln!(
            out,
            "Package: {}",
            self.metadata.namespace.as_deref().unwrap_or("")
        );
        let _ = writeln!(out, "Classes: {}", self.metadata.declared_types.join(", "));
        let _ = writeln!(out, "Methods: {}", self.metadata.declared_members.join(", "));
        out.push_str("Content:\n");
        out.push_str(&self.text);
        out.push('\n');
        out
    }
}

/// Rebuild the original content from one file's chunks, in index order
pub fn reconstruct(chunks: &[ContentChunk]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(chunk.new_text());
    }
    out
}
