//! Application state shared by every request

use crate::{WebConfig, WebError, WebResult};
use archviz_core::ArchvizConfig;
use archviz_repo::RepositoryAnalyzer;
use std::sync::Arc;
use tracing::info;

/// Immutable per-server state; each request runs its own pipeline
#[derive(Clone, Debug)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Analysis pipeline
    pub analyzer: Arc<RepositoryAnalyzer>,
}

impl AppState {
    /// Build the analyzer from the configured TOML file, or from defaults
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let analysis_config = match &config.config_path {
            Some(path) => {
                info!(path = %path, "Loading analysis configuration");
                ArchvizConfig::from_file(path).map_err(|e| WebError::Config(e.to_string()))?
            }
            None => ArchvizConfig::default(),
        };

        let analyzer = RepositoryAnalyzer::from_config(&analysis_config)
            .map_err(|e| WebError::Config(e.to_string()))?;

        Ok(Self::with_analyzer(config, analyzer))
    }

    /// Use a ready-made analyzer
    pub fn with_analyzer(config: WebConfig, analyzer: RepositoryAnalyzer) -> Self {
        Self {
            config,
            analyzer: Arc::new(analyzer),
        }
    }
}
