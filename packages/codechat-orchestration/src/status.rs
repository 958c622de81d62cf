//! Per-repository analysis status
//!
//! `AnalysisStatus` is the only way callers observe a run. The state machine
//! validates every transition and owns the progress checkpoints:
//!
//! ```text
//! NOT_STARTED → FETCHING → EXTRACTING → BUILDING_GRAPH → INDEXING → COMPLETED
//!                  │            │              │             │
//!                  └────────────┴──────────────┴─────────────┴──→ FAILED
//! ```
//!
//! An empty fetch goes straight from FETCHING to COMPLETED.

use chrono::{DateTime, Utc};
use codechat_analysis::{ExtractionBatch, FileFailure};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};

/// Analysis lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisState {
    NotStarted,
    Fetching,
    Extracting,
    BuildingGraph,
    Indexing,
    Completed,
    Failed,
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::NotStarted => "NOT_STARTED",
            AnalysisState::Fetching => "FETCHING",
            AnalysisState::Extracting => "EXTRACTING",
            AnalysisState::BuildingGraph => "BUILDING_GRAPH",
            AnalysisState::Indexing => "INDEXING",
            AnalysisState::Completed => "COMPLETED",
            AnalysisState::Failed => "FAILED",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "NOT_STARTED" => Ok(AnalysisState::NotStarted),
            "FETCHING" => Ok(AnalysisState::Fetching),
            "EXTRACTING" => Ok(AnalysisState::Extracting),
            "BUILDING_GRAPH" => Ok(AnalysisState::BuildingGraph),
            "INDEXING" => Ok(AnalysisState::Indexing),
            "COMPLETED" => Ok(AnalysisState::Completed),
            "FAILED" => Ok(AnalysisState::Failed),
            _ => Err(OrchestratorError::serialization(format!(
                "Invalid analysis state: {}",
                s
            ))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisState::Completed | AnalysisState::Failed)
    }

    pub fn can_transition_to(&self, next: AnalysisState) -> bool {
        use AnalysisState::*;
        match (self, next) {
            (NotStarted, Fetching) => true,
            (Fetching, Extracting) | (Fetching, Completed) => true,
            (Extracting, BuildingGraph) => true,
            (BuildingGraph, Indexing) => true,
            (Indexing, Completed) => true,
            (Fetching | Extracting | BuildingGraph | Indexing, Failed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observable status of the latest run for one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatus {
    pub repo_id: String,
    /// Absent until a run has started
    pub run_id: Option<Uuid>,
    pub state: AnalysisState,
    /// 0..=100, never decreases within a run
    pub progress: u8,
    pub error: Option<String>,
    pub success: bool,
    pub files_fetched: usize,
    pub documents_extracted: usize,
    pub failed_files: Vec<FileFailure>,
    pub skipped_files: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub chunks_indexed: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl AnalysisStatus {
    /// Status of a repository that has never been analyzed
    pub fn not_started(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            run_id: None,
            state: AnalysisState::NotStarted,
            progress: 0,
            error: None,
            success: false,
            files_fetched: 0,
            documents_extracted: 0,
            failed_files: Vec::new(),
            skipped_files: 0,
            graph_nodes: 0,
            graph_edges: 0,
            chunks_indexed: 0,
            started_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validated transitions over one run's status
pub struct AnalysisStateMachine {
    status: AnalysisStatus,
}

impl AnalysisStateMachine {
    pub fn new(status: AnalysisStatus) -> Self {
        Self { status }
    }

    /// Fresh run for `repo_id`
    pub fn for_run(repo_id: &str, run_id: Uuid) -> Self {
        let mut status = AnalysisStatus::not_started(repo_id);
        status.run_id = Some(run_id);
        Self::new(status)
    }

    pub fn status(&self) -> &AnalysisStatus {
        &self.status
    }

    pub fn into_status(self) -> AnalysisStatus {
        self.status
    }

    /// Transition: NOT_STARTED → FETCHING
    pub fn start(&mut self) -> Result<()> {
        self.transition(AnalysisState::Fetching)?;
        let now = self.status.updated_at;
        self.status.started_at = Some(now);
        self.status.progress = 0;
        Ok(())
    }

    /// Transition: FETCHING → EXTRACTING
    pub fn fetched(&mut self, file_count: usize) -> Result<()> {
        self.transition(AnalysisState::Extracting)?;
        self.status.files_fetched = file_count;
        self.advance(20);
        Ok(())
    }

    /// Transition: EXTRACTING → BUILDING_GRAPH
    pub fn extracted(&mut self, batch: &ExtractionBatch) -> Result<()> {
        self.transition(AnalysisState::BuildingGraph)?;
        self.record_extraction(batch);
        self.advance(40);
        Ok(())
    }

    /// Record extraction counts without leaving EXTRACTING
    pub fn record_extraction(&mut self, batch: &ExtractionBatch) {
        self.status.documents_extracted = batch.documents.len();
        self.status.failed_files = batch.failures.clone();
        self.status.skipped_files = batch.skipped;
        self.status.updated_at = Utc::now();
    }

    /// Transition: BUILDING_GRAPH → INDEXING
    pub fn graph_built(&mut self, node_count: usize, edge_count: usize) -> Result<()> {
        self.transition(AnalysisState::Indexing)?;
        self.status.graph_nodes = node_count;
        self.status.graph_edges = edge_count;
        self.advance(60);
        Ok(())
    }

    /// Count chunks handed to the indexer while INDEXING
    pub fn record_indexed(&mut self, chunk_count: usize) -> Result<()> {
        if self.status.state != AnalysisState::Indexing {
            return Err(OrchestratorError::InvalidStateTransition {
                from: self.status.state.to_string(),
                to: AnalysisState::Indexing.to_string(),
            });
        }
        self.status.chunks_indexed += chunk_count;
        self.status.updated_at = Utc::now();
        Ok(())
    }

    /// Transition: INDEXING → COMPLETED, or FETCHING → COMPLETED for an empty fetch
    pub fn complete(&mut self) -> Result<()> {
        self.transition(AnalysisState::Completed)?;
        self.status.success = true;
        self.status.error = None;
        self.advance(100);
        Ok(())
    }

    /// Transition: any active state → FAILED
    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(AnalysisState::Failed)?;
        self.status.success = false;
        self.status.error = Some(error.into());
        Ok(())
    }

    fn transition(&mut self, next: AnalysisState) -> Result<()> {
        if !self.status.state.can_transition_to(next) {
            return Err(OrchestratorError::InvalidStateTransition {
                from: self.status.state.to_string(),
                to: next.to_string(),
            });
        }
        self.status.state = next;
        self.status.updated_at = Utc::now();
        Ok(())
    }

    fn advance(&mut self, progress: u8) {
        self.status.progress = self.status.progress.max(progress);
    }
}

/// Latest status per repository identifier
#[derive(Debug, Default)]
pub struct StatusStore {
    statuses: DashMap<String, AnalysisStatus>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status; repositories never analyzed read as NOT_STARTED
    pub fn get(&self, repo_id: &str) -> AnalysisStatus {
        self.statuses
            .get(repo_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| AnalysisStatus::not_started(repo_id))
    }

    /// Replace the status of `status.repo_id`
    pub fn put(&self, status: AnalysisStatus) {
        self.statuses.insert(status.repo_id.clone(), status);
    }

    pub fn contains(&self, repo_id: &str) -> bool {
        self.statuses.contains_key(repo_id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codechat_analysis::{AnalysisDocument, SourceFile, StructuralMetadata};

    fn batch(documents: usize, failed: &[&str]) -> ExtractionBatch {
        ExtractionBatch {
            documents: (0..documents)
                .map(|i| {
                    AnalysisDocument::new(
                        &SourceFile::new(format!("F{i}.java"), "", "r"),
                        StructuralMetadata::default(),
                        "java",
                    )
                })
                .collect(),
            failures: failed
                .iter()
                .map(|path| FileFailure {
                    file_path: path.to_string(),
                    kind: "syntax".to_string(),
                    message: "broken".to_string(),
                })
                .collect(),
            skipped: 0,
        }
    }

    #[test]
    fn test_state_roundtrip() {
        for state in [
            AnalysisState::NotStarted,
            AnalysisState::Fetching,
            AnalysisState::Extracting,
            AnalysisState::BuildingGraph,
            AnalysisState::Indexing,
            AnalysisState::Completed,
            AnalysisState::Failed,
        ] {
            assert_eq!(AnalysisState::from_str(state.as_str()).unwrap(), state);
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
        assert!(AnalysisState::from_str("RUNNING").is_err());
    }

    #[test]
    fn test_full_lifecycle_progress() {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        sm.start().unwrap();
        assert_eq!(sm.status().state, AnalysisState::Fetching);
        assert!(sm.status().started_at.is_some());

        sm.fetched(3).unwrap();
        assert_eq!(sm.status().progress, 20);

        sm.extracted(&batch(2, &["Bad.java"])).unwrap();
        assert_eq!(sm.status().progress, 40);
        assert_eq!(sm.status().documents_extracted, 2);
        assert_eq!(sm.status().failed_files.len(), 1);

        sm.graph_built(2, 1).unwrap();
        assert_eq!(sm.status().progress, 60);

        sm.record_indexed(4).unwrap();
        sm.record_indexed(1).unwrap();
        sm.complete().unwrap();

        let status = sm.into_status();
        assert_eq!(status.state, AnalysisState::Completed);
        assert_eq!(status.progress, 100);
        assert_eq!(status.chunks_indexed, 5);
        assert!(status.success);
    }

    #[test]
    fn test_empty_fetch_completes_directly() {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        sm.start().unwrap();
        sm.complete().unwrap();
        assert_eq!(sm.status().state, AnalysisState::Completed);
        assert_eq!(sm.status().progress, 100);
    }

    #[test]
    fn test_fail_keeps_progress_and_message() {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        sm.start().unwrap();
        sm.fetched(1).unwrap();
        sm.fail("boom").unwrap();

        assert_eq!(sm.status().state, AnalysisState::Failed);
        assert_eq!(sm.status().progress, 20);
        assert_eq!(sm.status().error.as_deref(), Some("boom"));
        assert!(!sm.status().success);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        assert!(matches!(
            sm.fetched(1),
            Err(OrchestratorError::InvalidStateTransition { .. })
        ));
        assert!(sm.fail("not running").is_err());
        assert!(sm.record_indexed(1).is_err());

        sm.start().unwrap();
        sm.fail("boom").unwrap();
        assert!(sm.complete().is_err());
        assert!(sm.fail("again").is_err());
    }

    #[test]
    fn test_store_defaults_to_not_started() {
        let store = StatusStore::new();
        let status = store.get("unknown");
        assert_eq!(status.state, AnalysisState::NotStarted);
        assert_eq!(status.progress, 0);
        assert!(status.run_id.is_none());
        assert!(!store.contains("unknown"));

        let mut sm = AnalysisStateMachine::for_run("known", Uuid::new_v4());
        sm.start().unwrap();
        store.put(sm.status().clone());
        assert_eq!(store.get("known").state, AnalysisState::Fetching);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_status_json_shape() {
        let json = AnalysisStatus::not_started("repo").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["repoId"], "repo");
        assert_eq!(value["state"], "NOT_STARTED");
        assert_eq!(value["chunksIndexed"], 0);
    }
}
