//! Core data type definitions
//!
//! Everything here is created fresh for one analysis and serialized as-is into
//! the response; the camelCase field names are the wire format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of commits read from history, newest first
pub const COMMIT_LIMIT: usize = 50;

/// Histogram bucket for files whose extension has no language label
pub const UNCLASSIFIED_LANGUAGE: &str = "Unknown";

/// Relative file path -> full text of a file recognized as declaring models
pub type ModelMap = BTreeMap<String, String>;

/// Model/table name -> field descriptions (`name type arguments`), in discovery order
pub type DatabaseInfo = BTreeMap<String, Vec<String>>;

/// Language label -> number of files
pub type LanguageStats = BTreeMap<String, usize>;

/// One file or directory of the analyzed tree
///
/// A node is a directory exactly when `line_count`, `file_size` and `language`
/// are all `None`; only directories carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    /// Path relative to the repository root, `/`-separated; empty for the root
    pub path: String,
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
            line_count: None,
            file_size: None,
            language: None,
            children: Vec::new(),
        }
    }

    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        line_count: usize,
        file_size: u64,
        language: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            line_count: Some(line_count),
            file_size: Some(file_size),
            language,
            children: Vec::new(),
        }
    }

    /// Look up a descendant by its relative path
    pub fn find(&self, relative_path: &str) -> Option<&FileNode> {
        if relative_path.is_empty() {
            return Some(self);
        }
        relative_path
            .split('/')
            .try_fold(self, |node, segment| {
                node.children.iter().find(|child| child.name == segment)
            })
    }
}

/// A commit read from history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitNode {
    pub hash: String,
    /// First line of the commit message
    pub message: String,
    pub author: String,
    /// `YYYY-MM-DD HH:MM:SS` in the author's UTC offset
    pub date: String,
    /// Empty for a root commit, two or more for a merge
    pub parents: Vec<String>,
}

/// A local branch and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub name: String,
    pub hash: String,
}

/// Statistics reduced from a finished tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub total_line_count: usize,
    pub file_count: usize,
    pub language_stats: LanguageStats,
}

/// The single structured output of one analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoAnalysisReport {
    pub directory_tree: FileNode,
    pub git_commits: Vec<CommitNode>,
    pub branches: Vec<BranchInfo>,
    /// Paths with a working-tree status other than unmodified
    pub files: Vec<String>,
    pub models: ModelMap,
    pub database_info: DatabaseInfo,
    pub total_line_count: usize,
    pub file_count: usize,
    pub language_stats: LanguageStats,
    /// Generated diagram text, or a description of why generation failed
    pub llm_mermaid: String,
}
