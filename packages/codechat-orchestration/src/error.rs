use codechat_analysis::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Extraction failed for {count} file(s): {files}")]
    Extraction { count: usize, files: String },

    #[error("Indexing failed: {0}")]
    Indexing(String),

    #[error("Stage execution failed: {0}")]
    StageExecutionFailed(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Analysis already running for repository: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrchestratorError {
    pub fn fetch<E: std::fmt::Display>(e: E) -> Self {
        Self::Fetch(e.to_string())
    }

    pub fn indexing<E: std::fmt::Display>(e: E) -> Self {
        Self::Indexing(e.to_string())
    }

    pub fn serialization<E: std::fmt::Display>(e: E) -> Self {
        Self::Serialization(e.to_string())
    }

    pub fn config<E: std::fmt::Display>(e: E) -> Self {
        Self::Config(e.to_string())
    }

    /// Text recorded in a FAILED status; collaborator messages are kept verbatim
    pub fn status_message(&self) -> String {
        match self {
            Self::Fetch(message) | Self::Indexing(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Aggregate failed file paths into one extraction error
    pub fn extraction(failed_paths: &[&str]) -> Self {
        Self::Extraction {
            count: failed_paths.len(),
            files: failed_paths.join(", "),
        }
    }
}

impl From<ConfigError> for OrchestratorError {
    fn from(e: ConfigError) -> Self {
        Self::config(e)
    }
}

impl From<serde_json::Error> for OrchestratorError {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_names_files() {
        let err = OrchestratorError::extraction(&["A.java", "B.kt"]);
        assert_eq!(
            err.to_string(),
            "Extraction failed for 2 file(s): A.java, B.kt"
        );
    }

    #[test]
    fn test_status_message_keeps_collaborator_text() {
        assert_eq!(
            OrchestratorError::fetch("repository not found").status_message(),
            "repository not found"
        );
        assert_eq!(
            OrchestratorError::indexing("quota exceeded").status_message(),
            "quota exceeded"
        );
        assert_eq!(
            OrchestratorError::Conflict("repo".to_string()).status_message(),
            "Analysis already running for repository: repo"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: OrchestratorError = ConfigError::Validation("bad".to_string()).into();
        assert!(matches!(err, OrchestratorError::Config(_)));
        assert!(err.to_string().contains("bad"));
    }
}
