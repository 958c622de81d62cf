/*
 * Codechat Orchestration - Repository analysis runs
 *
 * Architecture:
 * - Analysis State Machine (validated transitions, progress checkpoints)
 * - Status Store (latest status per repository, DashMap)
 * - Ports for source control and the chunk index (async-trait)
 * - Local adapters (directory walk, in-memory source/index)
 * - One tokio task per run; CPU-bound stages on the blocking pool with Rayon
 */

// Public modules
pub mod adapters;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod ports;
pub mod status;

// Re-exports
pub use adapters::{InMemoryChunkIndex, InMemorySource, LocalDirectorySource, NoopChunkIndexer};
pub use config::OrchestratorConfig;
pub use error::{OrchestratorError, Result};
pub use orchestrator::AnalysisOrchestrator;
pub use ports::{ChunkIndexer, RepositorySource};
pub use status::{AnalysisState, AnalysisStateMachine, AnalysisStatus, StatusStore};
