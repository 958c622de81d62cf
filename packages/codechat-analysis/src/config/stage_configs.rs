//! Per-stage configuration

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Content chunking budgets, in approximate tokens (4 bytes per token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingConfig {
    /// Maximum chunk size in tokens (1..=100000)
    pub chunk_size_tokens: usize,

    /// Overlap carried into the next chunk, in tokens (must be below chunk size)
    pub overlap_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size_tokens: 6000,
            overlap_tokens: 500,
        }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            chunk_size_tokens,
            overlap_tokens,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size_tokens < 1 || self.chunk_size_tokens > 100_000 {
            return Err(ConfigError::range_with_hint(
                "chunk_size_tokens",
                self.chunk_size_tokens,
                1,
                100_000,
                "Chunk size must be positive and fit an embedding request",
            ));
        }

        if self.overlap_tokens >= self.chunk_size_tokens {
            return Err(ConfigError::range_with_hint(
                "overlap_tokens",
                self.overlap_tokens,
                0,
                self.chunk_size_tokens - 1,
                "Overlap must be smaller than the chunk size",
            ));
        }

        Ok(())
    }
}

/// Worker pool settings for parallel extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self { num_workers: 0 }
    }
}

impl ParallelConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    /// Effective worker count (auto resolves to the number of CPUs)
    pub fn effective_workers(&self) -> usize {
        if self.num_workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.num_workers
        }
    }
}
