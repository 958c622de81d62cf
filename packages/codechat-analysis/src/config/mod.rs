//! Analysis configuration
//!
//! Loaded from YAML and validated before use:
//!
//! ```yaml
//! source_extensions: [java, kt]
//! chunking:
//!   chunk_size_tokens: 6000
//!   overlap_tokens: 500
//! parallel:
//!   num_workers: 0
//! ```

mod error;
mod stage_configs;

pub use error::{ConfigError, ConfigResult};
pub use stage_configs::{ChunkingConfig, ParallelConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration of the analysis crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// File extensions (without the dot) eligible for extraction
    pub source_extensions: Vec<String>,

    pub chunking: ChunkingConfig,

    pub parallel: ParallelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_extensions: vec!["java".to_string(), "kt".to_string(), "kts".to_string()],
            chunking: ChunkingConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.source_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "source_extensions must name at least one extension".to_string(),
            ));
        }
        if let Some(bad) = self
            .source_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "source extension '{}' must be non-empty and given without the leading dot",
                bad
            )));
        }

        self.chunking.validate()?;
        self.parallel.validate()?;
        Ok(())
    }

    /// Whether `ext` is one of the configured source extensions
    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.source_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}
