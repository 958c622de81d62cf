//! Local directory source against a real file tree

use codechat_orchestration::{
    AnalysisOrchestrator, AnalysisState, InMemoryChunkIndex, LocalDirectorySource,
    OrchestratorConfig, OrchestratorError, RepositorySource, StatusStore,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/main/java/com/acme/Model.java", "package com.acme;\npublic class Model {}\n");
    write(
        root,
        "src/main/kotlin/com/acme/Service.kt",
        "package com.acme\n\nimport com.acme.Model\n\nclass Service {\n    fun load(): Model = Model()\n}\n",
    );
    write(root, "src/test/java/com/acme/ModelTest.java", "package com.acme;\nclass ModelTest {}\n");
    write(root, "build/generated/com/acme/Gen.java", "package com.acme;\nclass Gen {}\n");
    write(root, ".git/HEAD", "ref: refs/heads/main\n");
    write(root, "README.md", "# acme\n");
    write(root, "src/main/java/com/acme/Huge.java", &"// filler\n".repeat(20_000));
    dir
}

#[tokio::test]
async fn test_walk_skips_excluded_and_oversized_files() {
    let repo = sample_repo();
    let source = LocalDirectorySource::new("main@abc123").with_repository("acme", repo.path());

    let files = source.fetch_files("acme").await.unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "README.md",
            "src/main/java/com/acme/Model.java",
            "src/main/kotlin/com/acme/Service.kt",
        ]
    );
    assert!(files.iter().all(|f| f.revision_id == "main@abc123"));
}

#[tokio::test]
async fn test_extension_filter_and_size_limit() {
    let repo = sample_repo();
    let source = LocalDirectorySource::new("r")
        .with_repository("acme", repo.path())
        .with_extensions(&["java"])
        .with_max_file_bytes(1_000_000);

    let files = source.fetch_files("acme").await.unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["src/main/java/com/acme/Huge.java", "src/main/java/com/acme/Model.java"]
    );
}

#[tokio::test]
async fn test_unknown_and_missing_repositories() {
    let source = LocalDirectorySource::new("r").with_repository("gone", "/definitely/not/here");
    assert!(matches!(
        source.fetch_files("gone").await,
        Err(OrchestratorError::Fetch(_))
    ));
    assert!(matches!(
        source.fetch_files("unknown").await,
        Err(OrchestratorError::Fetch(_))
    ));
}

#[tokio::test]
async fn test_end_to_end_over_directory() {
    let repo = sample_repo();
    let config = OrchestratorConfig::default();
    let source = LocalDirectorySource::new("r")
        .with_repository("acme", repo.path())
        .with_extensions(config.analysis.source_extensions.as_slice());
    let index = Arc::new(InMemoryChunkIndex::new());
    let orch = AnalysisOrchestrator::new(
        Arc::new(source),
        index.clone(),
        Arc::new(StatusStore::new()),
        config,
    )
    .unwrap();

    let status = orch.analyze("acme").await.unwrap();
    assert_eq!(status.state, AnalysisState::Completed, "{:?}", status.error);
    assert_eq!(status.documents_extracted, 2);

    let graph = orch.get_dependency_graph("acme").unwrap();
    assert_eq!(
        graph.dependencies_of("src/main/kotlin/com/acme/Service.kt"),
        vec!["src/main/java/com/acme/Model.java"]
    );
    assert_eq!(index.chunks("acme").len(), 2);
}
