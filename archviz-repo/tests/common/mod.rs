//! Shared fixtures: scratch git repositories and diagram generator stubs

#![allow(dead_code)]

use archviz_core::{ArchvizError, ArchvizResult, DiagramGenerator, ErrorContext};
use async_trait::async_trait;
use git2::{Commit, Repository, RepositoryInitOptions, Signature, Time};
use std::path::Path;
use std::sync::{LazyLock, Mutex};
use tempfile::TempDir;

// Subscriber is installed once per test binary; set TEST_LOG to see output
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub fn init_tracing() {
    LazyLock::force(&TRACING);
}

/// A throwaway repository with `main` as its initial branch
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &options).expect("Failed to init repository");
        Self {
            dir,
            repo,
            clock: 1_700_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        std::fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create directories");
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Stage everything in the working tree and commit it on HEAD
    pub fn commit_all(&mut self, message: &str) -> git2::Oid {
        self.clock += 60;
        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let signature =
            Signature::new("Test Author", "author@example.com", &Time::new(self.clock, 0)).unwrap();
        let parent: Option<Commit<'_>> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }
}

/// Returns a fixed diagram and remembers the summary it was given
#[derive(Default)]
pub struct RecordingGenerator {
    pub summaries: Mutex<Vec<String>>,
}

#[async_trait]
impl DiagramGenerator for RecordingGenerator {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, summary: &str) -> ArchvizResult<String> {
        self.summaries.lock().unwrap().push(summary.to_string());
        Ok("graph TD\n  A-->B".to_string())
    }
}

/// Always fails with the given message
pub struct FailingGenerator(pub &'static str);

#[async_trait]
impl DiagramGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _summary: &str) -> ArchvizResult<String> {
        Err(ArchvizError::Diagram {
            message: self.0.to_string(),
            provider: Some("failing".to_string()),
            context: ErrorContext::new("test"),
        })
    }
}
