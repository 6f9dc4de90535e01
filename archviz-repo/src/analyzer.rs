//! Report assembly: tree, aggregates, version-control metadata and diagram

use crate::aggregate::compute_aggregates;
use crate::diagram::create_diagram_generator;
use crate::filter::FileFilter;
use crate::git::GitMetadataReader;
use crate::summary::generate_summary;
use crate::tree::FileTreeBuilder;
use archviz_core::{
    performance, validation_error, ArchvizConfig, ArchvizError, ArchvizResult, DiagramGenerator,
    ErrorContext, RepoAnalysisReport,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Prefix of the diagram field when generation failed
pub const DIAGRAM_ERROR_PREFIX: &str = "LLM Error: ";

/// Runs the whole analysis pipeline for one repository at a time
///
/// Holds no per-run state, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct RepositoryAnalyzer {
    filter: FileFilter,
    generator: Arc<dyn DiagramGenerator>,
}

impl RepositoryAnalyzer {
    pub fn new(filter: FileFilter, generator: Arc<dyn DiagramGenerator>) -> Self {
        Self { filter, generator }
    }

    /// Compile the walk filter and pick the diagram generator from `config`
    pub fn from_config(config: &ArchvizConfig) -> ArchvizResult<Self> {
        let filter = FileFilter::from_config(&config.analysis)?;
        let generator = create_diagram_generator(&config.diagram);
        info!(generator = generator.name(), "Repository analyzer ready");
        Ok(Self::new(filter, generator))
    }

    pub fn generator(&self) -> &Arc<dyn DiagramGenerator> {
        &self.generator
    }

    /// Everything but the diagram; `llm_mermaid` is left empty
    ///
    /// Blocking: walks the filesystem and reads the repository.
    pub fn collect_report(&self, repo_path: &Path) -> ArchvizResult<RepoAnalysisReport> {
        collect_report(&self.filter, repo_path)
    }

    /// Full analysis, including the diagram
    ///
    /// A failing diagram generator does not fail the analysis; its error is
    /// embedded in `llm_mermaid` instead.
    pub async fn analyze(&self, repo_path: impl AsRef<Path>) -> ArchvizResult<RepoAnalysisReport> {
        let repo_path = repo_path.as_ref();
        if repo_path.as_os_str().is_empty() {
            return Err(validation_error!(
                "Repository path must not be empty",
                "repo",
                "analyzer"
            ));
        }

        let filter = self.filter.clone();
        let owned_path: PathBuf = repo_path.to_path_buf();
        let mut report = tokio::task::spawn_blocking(move || collect_report(&filter, &owned_path))
            .await
            .map_err(|e| ArchvizError::Internal {
                message: format!("Analysis task failed: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("analyzer").with_operation("collect_report"),
            })??;

        let summary = generate_summary(&report);
        report.llm_mermaid = match self.generator.generate(&summary).await {
            Ok(diagram) => diagram,
            Err(e) => {
                e.log();
                format!("{}{}", DIAGRAM_ERROR_PREFIX, e)
            }
        };

        Ok(report)
    }
}

impl std::fmt::Debug for RepositoryAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryAnalyzer")
            .field("filter", &self.filter)
            .field("generator", &self.generator.name())
            .finish()
    }
}

fn collect_report(filter: &FileFilter, repo_path: &Path) -> ArchvizResult<RepoAnalysisReport> {
    info!(repo = %repo_path.display(), "Analyzing repository");

    // Fail on a non-repository before touching the tree
    let git = GitMetadataReader::open(repo_path)?;
    let files = git.modified_files()?;

    let builder = FileTreeBuilder::new(filter.clone());
    let tree = performance::measure_sync("build_file_tree", || builder.build(repo_path))?;
    let aggregates = compute_aggregates(&tree.root);

    let git_commits = git.recent_commits()?;
    let branches = git.branches()?;

    if files.is_empty() {
        info!("Working tree is clean");
    } else {
        warn!(count = files.len(), "Working tree has uncommitted changes");
    }

    info!(
        files = aggregates.file_count,
        lines = aggregates.total_line_count,
        commits = git_commits.len(),
        branches = branches.len(),
        "Repository analyzed"
    );

    Ok(RepoAnalysisReport {
        directory_tree: tree.root,
        git_commits,
        branches,
        files,
        models: tree.models,
        database_info: tree.database_info,
        total_line_count: aggregates.total_line_count,
        file_count: aggregates.file_count,
        language_stats: aggregates.language_stats,
        llm_mermaid: String::new(),
    })
}
