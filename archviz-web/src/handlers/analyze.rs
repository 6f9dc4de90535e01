//! Repository analysis handler

use super::types::AnalyzeQuery;
use crate::{AppState, WebError};
use archviz_core::RepoAnalysisReport;
use axum::{
    extract::{Query, State},
    response::Json,
};
use tracing::{info, warn};

/// Analyze the repository at `?repo=<path>` and return the full report
///
/// A missing or blank `repo` is rejected before anything touches the filesystem.
pub async fn analyze_repository(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<RepoAnalysisReport>, WebError> {
    let Some(repo) = query.repo.filter(|repo| !repo.trim().is_empty()) else {
        warn!("Analyze request without a repository path");
        return Err(WebError::MissingParameter("repo"));
    };

    info!(repo = %repo, "Analyzing repository");
    let report = state.analyzer.analyze(&repo).await?;
    info!(
        repo = %repo,
        files = report.file_count,
        commits = report.git_commits.len(),
        "Analysis complete"
    );

    Ok(Json(report))
}
