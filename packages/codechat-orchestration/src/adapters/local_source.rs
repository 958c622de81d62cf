//! Repository source backed by directories on disk

use async_trait::async_trait;
use codechat_analysis::SourceFile;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{OrchestratorError, Result};
use crate::ports::RepositorySource;

/// Files above this size are not fetched
pub const DEFAULT_MAX_FILE_BYTES: u64 = 100_000;

/// Directory names never descended into
const EXCLUDED_DIRS: &[&str] = &["test", "tests", "generated"];

/// Walks one local directory per repository identifier
#[derive(Debug, Clone)]
pub struct LocalDirectorySource {
    roots: HashMap<String, PathBuf>,
    revision_id: String,
    max_file_bytes: u64,
    /// Lowercase extensions to fetch; empty fetches every file
    extensions: Vec<String>,
}

impl LocalDirectorySource {
    pub fn new(revision_id: impl Into<String>) -> Self {
        Self {
            roots: HashMap::new(),
            revision_id: revision_id.into(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            extensions: Vec::new(),
        }
    }

    /// Serve `repo_id` from `root`
    pub fn with_repository(mut self, repo_id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.roots.insert(repo_id.into(), root.into());
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    fn collect(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e));

        for entry in walker {
            let entry = entry.map_err(|e| OrchestratorError::Io(e.into()))?;
            if !entry.file_type().is_file() || !self.has_wanted_extension(entry.path()) {
                continue;
            }

            let size = entry.metadata().map_err(|e| OrchestratorError::Io(e.into()))?.len();
            if size > self.max_file_bytes {
                debug!("Skipping {} ({} bytes)", entry.path().display(), size);
                continue;
            }

            let content = match std::fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    warn!("Skipping non-UTF-8 file {}", entry.path().display());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            files.push(SourceFile::new(
                relative_path(root, entry.path()),
                content,
                self.revision_id.clone(),
            ));
        }

        Ok(files)
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_ascii_lowercase();
                self.extensions.iter().any(|wanted| *wanted == ext)
            })
            .unwrap_or(false)
    }
}

#[async_trait]
impl RepositorySource for LocalDirectorySource {
    async fn fetch_files(&self, repo_id: &str) -> Result<Vec<SourceFile>> {
        let root = self
            .roots
            .get(repo_id)
            .ok_or_else(|| OrchestratorError::Fetch(format!("Unknown repository: {}", repo_id)))?;

        if !root.is_dir() {
            return Err(OrchestratorError::Fetch(format!(
                "Repository path not found: {}",
                root.display()
            )));
        }

        let source = self.clone();
        let root = root.clone();
        let files = tokio::task::spawn_blocking(move || source.collect(&root))
            .await
            .map_err(|e| OrchestratorError::fetch(format!("Directory walk panicked: {}", e)))??;

        info!("Repo {}: fetched {} files from disk", repo_id, files.len());
        Ok(files)
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.contains(&&*name)
}

/// `/`-separated path of `path` below `root`
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
