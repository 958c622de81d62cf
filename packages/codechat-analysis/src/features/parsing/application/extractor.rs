//! Structural extraction use case
//!
//! `extract` turns one eligible file into an `AnalysisDocument`.
//! `extract_batch` runs it over a repository snapshot in parallel and keeps
//! going past failed files, returning them next to the successful documents.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::features::parsing::infrastructure::parse_source;
use crate::features::parsing::plugins::create_full_registry;
use crate::features::parsing::ports::{ExtractionContext, LanguageRegistry};
use crate::shared::models::{AnalysisDocument, FileFailure, ParseError, SourceFile};

/// Outcome of extracting a whole snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionBatch {
    /// Successfully parsed files, in input order
    pub documents: Vec<AnalysisDocument>,
    /// Files that failed to parse, in input order
    pub failures: Vec<FileFailure>,
    /// Files excluded by the extension filter
    pub skipped: usize,
}

impl ExtractionBatch {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed_paths(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.file_path.as_str()).collect()
    }
}

/// Structural extractor over the registered language plugins
#[derive(Clone)]
pub struct StructuralExtractor {
    registry: Arc<LanguageRegistry>,
    config: AnalysisConfig,
}

impl StructuralExtractor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_registry(config, create_full_registry())
    }

    pub fn with_registry(config: AnalysisConfig, registry: LanguageRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Whether a file passes the configured source-extension filter
    pub fn is_eligible(&self, file: &SourceFile) -> bool {
        file.extension()
            .map(|ext| self.config.is_source_extension(&ext))
            .unwrap_or(false)
    }

    /// Extract structural metadata from one file
    pub fn extract(&self, file: &SourceFile) -> Result<AnalysisDocument, ParseError> {
        let extension = file.extension();
        let plugin = extension
            .as_deref()
            .filter(|ext| self.config.is_source_extension(ext))
            .and_then(|ext| self.registry.get_by_extension(ext))
            .ok_or_else(|| ParseError::UnsupportedLanguage {
                path: file.path.clone(),
                extension: extension.clone(),
            })?;

        let tree = parse_source(plugin, &file.content, &file.path)?;

        let language = plugin.language_id();
        let mut ctx = ExtractionContext::new(&file.content);
        plugin.extract(&mut ctx, &tree);

        Ok(AnalysisDocument::new(
            file,
            ctx.into_metadata(),
            language.name(),
        ))
    }

    /// Extract every eligible file; one bad file never aborts the others
    pub fn extract_batch(&self, files: &[SourceFile]) -> ExtractionBatch {
        let eligible: Vec<&SourceFile> = files.iter().filter(|f| self.is_eligible(f)).collect();
        let skipped = files.len() - eligible.len();

        let run = || -> Vec<Result<AnalysisDocument, ParseError>> {
            eligible.par_iter().map(|file| self.extract(file)).collect()
        };

        let results = if self.config.parallel.num_workers == 0 {
            run()
        } else {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.parallel.effective_workers())
                .build()
            {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    warn!("Failed to build extraction pool ({}), using global pool", e);
                    run()
                }
            }
        };

        let mut batch = ExtractionBatch {
            skipped,
            ..Default::default()
        };
        for result in results {
            match result {
                Ok(doc) => batch.documents.push(doc),
                Err(e) => {
                    warn!("Extraction failed: {}", e);
                    batch.failures.push(FileFailure::from(&e));
                }
            }
        }

        debug!(
            "Extracted {} documents ({} failed, {} skipped)",
            batch.documents.len(),
            batch.failures.len(),
            batch.skipped
        );
        batch
    }
}

impl Default for StructuralExtractor {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
