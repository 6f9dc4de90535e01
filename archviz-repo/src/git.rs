//! Version-control metadata: recent commits, local branches, working-tree status

use archviz_core::{
    git_error, repository_error, ArchvizResult, BranchInfo, CommitNode, COMMIT_LIMIT,
};
use chrono::{DateTime, FixedOffset, Utc};
use git2::{BranchType, Commit, Repository, Sort, Status, StatusOptions};
use std::path::Path;
use tracing::{debug, warn};

const COMPONENT: &str = "git_metadata";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read-only view over an existing repository
pub struct GitMetadataReader {
    repo: Repository,
}

impl GitMetadataReader {
    /// Open the repository rooted exactly at `path` (parents are not searched)
    pub fn open(path: &Path) -> ArchvizResult<Self> {
        let repo = Repository::open(path).map_err(|e| {
            repository_error!(
                format!("Could not open repository at {}: {}", path.display(), e.message()),
                COMPONENT,
                e
            )
        })?;
        debug!(path = %path.display(), "Opened repository");
        Ok(Self { repo })
    }

    /// Up to [`COMMIT_LIMIT`] commits reachable from HEAD, newest first
    pub fn recent_commits(&self) -> ArchvizResult<Vec<CommitNode>> {
        let mut revwalk = self
            .repo
            .revwalk()
            .and_then(|mut walk| {
                walk.push_head()?;
                walk.set_sorting(Sort::TIME)?;
                Ok(walk)
            })
            .map_err(|e| git_error!("Could not retrieve git commits", COMPONENT, e))?;

        let mut commits = Vec::with_capacity(COMMIT_LIMIT);
        for oid in revwalk.by_ref().take(COMMIT_LIMIT) {
            let commit = match oid.and_then(|oid| self.repo.find_commit(oid)) {
                Ok(commit) => commit,
                Err(e) => {
                    warn!(error = %e, "Stopping commit log early");
                    break;
                }
            };
            commits.push(to_commit_node(&commit));
        }

        Ok(commits)
    }

    /// Every local branch, in the backend's iteration order
    pub fn branches(&self) -> ArchvizResult<Vec<BranchInfo>> {
        let branches = self
            .repo
            .branches(Some(BranchType::Local))
            .map_err(|e| git_error!("Could not retrieve branches", COMPONENT, e))?;

        let mut result = Vec::new();
        for branch in branches {
            let (branch, _) =
                branch.map_err(|e| git_error!("Could not retrieve branches", COMPONENT, e))?;
            let name = branch
                .name_bytes()
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .map_err(|e| git_error!("Could not read branch name", COMPONENT, e))?;
            let hash = branch
                .get()
                .target()
                .map(|oid| oid.to_string())
                .unwrap_or_default();
            result.push(BranchInfo { name, hash });
        }

        Ok(result)
    }

    /// Paths whose working-tree or index status is anything but unmodified
    pub fn modified_files(&self) -> ArchvizResult<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options)).map_err(|e| {
            repository_error!("Could not retrieve repository status", COMPONENT, e)
        })?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .map(|entry| String::from_utf8_lossy(entry.path_bytes()).into_owned())
            .collect())
    }
}

fn to_commit_node(commit: &Commit<'_>) -> CommitNode {
    let message = String::from_utf8_lossy(commit.message_bytes());
    let author = commit.author();

    CommitNode {
        hash: commit.id().to_string(),
        message: message.split('\n').next().unwrap_or_default().to_string(),
        author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        date: format_git_time(author.when()),
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}

/// Render a git timestamp in its own UTC offset
fn format_git_time(time: git2::Time) -> String {
    let utc = DateTime::<Utc>::from_timestamp(time.seconds(), 0).unwrap_or_default();
    match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => utc.with_timezone(&offset).format(DATE_FORMAT).to_string(),
        None => utc.format(DATE_FORMAT).to_string(),
    }
}
