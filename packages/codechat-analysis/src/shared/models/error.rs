//! Error types for the codechat-analysis crate
//!
//! File-scoped failures (`ParseError`) are recoverable at the batch level and
//! are collected per file. `AnalysisError` is the crate-wide error that wraps
//! them together with configuration and serialization failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Failure to turn one source file into structural metadata
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Content is not syntactically valid in its language family
    #[error("Syntax error in {path} at {line}:{column}: {detail}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        detail: String,
    },

    /// No grammar is registered for the file's extension
    #[error("Unsupported language for {path} (extension: {extension:?})")]
    UnsupportedLanguage {
        path: String,
        extension: Option<String>,
    },

    /// The grammar could not be loaded or the parser gave up
    #[error("Parser failure for {path}: {message}")]
    Grammar { path: String, message: String },
}

impl ParseError {
    /// Path of the file that failed
    pub fn path(&self) -> &str {
        match self {
            ParseError::Syntax { path, .. }
            | ParseError::UnsupportedLanguage { path, .. }
            | ParseError::Grammar { path, .. } => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::Syntax { .. } => "syntax",
            ParseError::UnsupportedLanguage { .. } => "unsupported_language",
            ParseError::Grammar { .. } => "grammar",
        }
    }
}

/// Per-file failure record carried alongside successful documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub file_path: String,
    pub kind: String,
    pub message: String,
}

impl From<&ParseError> for FileFailure {
    fn from(err: &ParseError) -> Self {
        Self {
            file_path: err.path().to_string(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AnalysisError>;
