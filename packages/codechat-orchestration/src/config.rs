//! Orchestrator configuration
//!
//! ```yaml
//! fail_on_parse_error: true
//! index_batch_size: 64
//! analysis:
//!   source_extensions: [java, kt, kts]
//!   chunking:
//!     chunk_size_tokens: 6000
//!     overlap_tokens: 500
//! ```

use codechat_analysis::{AnalysisConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorConfig {
    /// Fail the whole run when any eligible file does not parse
    pub fail_on_parse_error: bool,

    /// Chunks per `ChunkIndexer::index_chunks` call (1..=10000)
    pub index_batch_size: usize,

    pub analysis: AnalysisConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fail_on_parse_error: true,
            index_batch_size: 64,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::from(e).into())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.index_batch_size == 0 || self.index_batch_size > 10_000 {
            return Err(ConfigError::range_with_hint(
                "index_batch_size",
                self.index_batch_size,
                1,
                10_000,
                "Batch size bounds one indexer request",
            )
            .into());
        }
        self.analysis.validate()?;
        Ok(())
    }
}
