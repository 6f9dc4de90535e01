//! End-to-end analysis of real git repositories

mod common;

use archviz_core::{ArchvizConfig, ArchvizError, COMMIT_LIMIT, UNCLASSIFIED_LANGUAGE};
use archviz_repo::{FileFilter, RepositoryAnalyzer, DIAGRAM_ERROR_PREFIX};
use common::{FailingGenerator, RecordingGenerator, TestRepo};
use std::sync::Arc;

const USER_MODEL: &str = r#"package models

type User struct {
	ID   int
	Name string
}

const schema = `CREATE TABLE users (id INT, name TEXT)`
"#;

const POST_MODEL: &str = r#"from django.db import models


class Post(models.Model):
    title = models.CharField(
        max_length=200,
    )
    author = models.ForeignKey("User", on_delete=models.CASCADE)


class Helper:
    cache = dict()
"#;

fn sample_repo() -> TestRepo {
    let mut repo = TestRepo::new();
    repo.write("internal/models/user.go", USER_MODEL);
    repo.write("blog/models.py", POST_MODEL);
    repo.write("README.md", "# sample\n");
    repo.commit_all("Initial import");
    repo
}

#[tokio::test]
async fn test_full_report() {
    let repo = sample_repo();
    repo.write("notes.txt", "todo\n");

    let generator = Arc::new(RecordingGenerator::default());
    let analyzer = RepositoryAnalyzer::new(FileFilter::default(), generator.clone());
    let report = analyzer.analyze(repo.path()).await.unwrap();

    // .git is excluded by the default filter
    assert!(report.directory_tree.find(".git").is_none());
    assert_eq!(report.directory_tree.path, "");
    assert_eq!(report.file_count, 4);
    assert_eq!(
        report.total_line_count,
        USER_MODEL.lines().count() + POST_MODEL.lines().count() + 2
    );
    assert_eq!(report.language_stats["Go"], 1);
    assert_eq!(report.language_stats["Python"], 1);
    assert_eq!(report.language_stats["Markdown"], 1);
    assert_eq!(report.language_stats[UNCLASSIFIED_LANGUAGE], 1);

    assert_eq!(report.files, vec!["notes.txt".to_string()]);
    assert_eq!(report.git_commits.len(), 1);
    assert_eq!(report.git_commits[0].message, "Initial import");
    assert_eq!(report.branches.len(), 1);
    assert_eq!(report.branches[0].name, "main");
    assert_eq!(report.branches[0].hash, report.git_commits[0].hash);

    assert_eq!(report.models["internal/models/user.go"], USER_MODEL);
    assert_eq!(report.models["blog/models.py"], POST_MODEL);
    assert_eq!(report.models.len(), 2);
    assert_eq!(
        report.database_info["User"],
        vec!["ID   int".to_string(), "Name string".to_string()]
    );
    assert_eq!(
        report.database_info["users"],
        vec!["id INT".to_string(), "name TEXT".to_string()]
    );
    assert_eq!(
        report.database_info["Post"],
        vec![
            "title CharField max_length=200,".to_string(),
            "author ForeignKey \"User\", on_delete=models.CASCADE".to_string(),
        ]
    );
    assert!(!report.database_info.contains_key("Helper"));

    assert_eq!(report.llm_mermaid, "graph TD\n  A-->B");
    let summaries = generator.summaries.lock().unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].contains("The repository contains 4 files"));
    assert!(summaries[0].contains("- Git commit history analyzed.\n"));
    assert!(summaries[0].ends_with("- Languages used: Go:1, Markdown:1, Python:1, Unknown:1.\n"));
}

#[tokio::test]
async fn test_commit_log_is_capped_newest_first() {
    let mut repo = TestRepo::new();
    for i in 0..COMMIT_LIMIT + 5 {
        repo.write("log.txt", &format!("{}\n", i));
        repo.commit_all(&format!("Update log {}\n\nbody {}", i, i));
    }

    let analyzer = RepositoryAnalyzer::new(
        FileFilter::default(),
        Arc::new(RecordingGenerator::default()),
    );
    let report = analyzer.analyze(repo.path()).await.unwrap();

    assert_eq!(report.git_commits.len(), COMMIT_LIMIT);
    assert_eq!(report.git_commits[0].message, "Update log 54");
    assert_eq!(report.git_commits[COMMIT_LIMIT - 1].message, "Update log 5");
    assert_eq!(
        report.git_commits[0].parents,
        vec![report.git_commits[1].hash.clone()]
    );
    assert!(report.files.is_empty());
}

#[tokio::test]
async fn test_diagram_failure_is_embedded() {
    let repo = sample_repo();
    let analyzer = RepositoryAnalyzer::new(
        FileFilter::default(),
        Arc::new(FailingGenerator("model service unavailable")),
    );

    let report = analyzer.analyze(repo.path()).await.unwrap();
    assert_eq!(
        report.llm_mermaid,
        format!("{}model service unavailable", DIAGRAM_ERROR_PREFIX)
    );
    assert_eq!(report.file_count, 3);
}

#[tokio::test]
async fn test_configured_exclusions() {
    let repo = sample_repo();
    repo.write("vendor/lib/dep.go", "package dep\n");
    repo.write("build.log", "noise\n");

    let mut config = ArchvizConfig::default();
    config
        .analysis
        .excluded_dirs
        .push("vendor".to_string());
    config.analysis.excluded_patterns = vec!["*.log".to_string()];
    config.diagram.provider = archviz_core::DiagramProvider::Disabled;

    let analyzer = RepositoryAnalyzer::from_config(&config).unwrap();
    let report = analyzer.analyze(repo.path()).await.unwrap();

    assert!(report.directory_tree.find("vendor").is_none());
    assert!(report.directory_tree.find("build.log").is_none());
    assert_eq!(report.file_count, 3);
    assert_eq!(
        report.llm_mermaid,
        "LLM Error: diagram generation is disabled"
    );
    // Status still reports what the walk skipped
    assert!(report.files.contains(&"build.log".to_string()));
}

#[tokio::test]
async fn test_missing_repository_fails_whole_request() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = RepositoryAnalyzer::new(
        FileFilter::default(),
        Arc::new(RecordingGenerator::default()),
    );

    let err = analyzer
        .analyze(dir.path().join("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ArchvizError::Repository { .. }));
}

#[tokio::test]
async fn test_report_serializes_with_camel_case_keys() {
    let repo = sample_repo();
    let analyzer = RepositoryAnalyzer::new(
        FileFilter::default(),
        Arc::new(RecordingGenerator::default()),
    );
    let report = analyzer.analyze(repo.path()).await.unwrap();

    let value = serde_json::to_value(&report).unwrap();
    for key in [
        "directoryTree",
        "gitCommits",
        "branches",
        "files",
        "models",
        "databaseInfo",
        "totalLineCount",
        "fileCount",
        "languageStats",
        "llmMermaid",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(value["directoryTree"]["isDir"], true);
    let readme = &value["directoryTree"]["children"][0];
    assert_eq!(readme["name"], "README.md");
    assert_eq!(readme["lineCount"], 1);
    assert_eq!(readme["language"], "Markdown");
}
