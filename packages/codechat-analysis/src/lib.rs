/*
 * Codechat Analysis - Structural analysis of JVM repositories
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (SourceFile, AnalysisDocument, errors)
 * - config/      : YAML configuration (extensions, chunk budgets, workers)
 * - features/    : Vertical slices (parsing → cross_file → chunking)
 *
 * Parallelism:
 * - Rayon work-stealing for per-file extraction, edge resolution and chunking
 */

#![allow(clippy::module_inception)]
#![allow(clippy::new_without_default)]

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration (YAML, validated)
pub mod config;

/// Feature modules (parsing, cross-file resolution, chunking)
pub mod features;

/// Shared models and errors
pub mod shared;

pub use config::{AnalysisConfig, ChunkingConfig, ConfigError, ParallelConfig};
pub use features::chunking::{
    chunk_document, estimate_total_chunks, reconstruct, ChunkMetadata, ContentChunk,
    ContentChunker,
};
pub use features::cross_file::{DependencyEdge, DependencyGraph, DependencyGraphBuilder, DependencyNode};
pub use features::parsing::{
    create_full_registry, ExtractionBatch, LanguageId, LanguagePlugin, LanguageRegistry,
    StructuralExtractor,
};
pub use shared::models::{
    AnalysisDocument, AnalysisError, FileFailure, ParseError, SourceFile, StructuralMetadata,
};
