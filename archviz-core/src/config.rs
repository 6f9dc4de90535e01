//! Configuration management

use crate::config_error;
use crate::error::{ArchvizError, ArchvizResult};
use crate::logging::LoggingConfig;
use crate::ErrorContext;
use serde::{Deserialize, Serialize};

use std::path::Path;

/// Top-level configuration, stored as TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchvizConfig {
    pub analysis: AnalysisConfig,
    pub diagram: DiagramConfig,
    pub logging: LoggingConfig,
}

/// What the tree walk skips
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory names that are never descended into
    pub excluded_dirs: Vec<String>,
    /// Glob patterns matched against relative paths and file names
    pub excluded_patterns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: vec![".git".to_string()],
            excluded_patterns: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramProvider {
    /// Run an external program with the summary as its last argument
    Command,
    /// Skip generation; reports carry an explanatory error string
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub provider: DiagramProvider,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<String>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            provider: DiagramProvider::Command,
            program: "python3".to_string(),
            args: vec!["generate_mermaid.py".to_string()],
            working_dir: None,
        }
    }
}

impl ArchvizConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ArchvizResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ArchvizError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ArchvizConfig = toml::from_str(&content).map_err(|e| ArchvizError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ArchvizResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ArchvizError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| ArchvizError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ArchvizResult<()> {
        if self.diagram.provider == DiagramProvider::Command
            && self.diagram.program.trim().is_empty()
        {
            return Err(config_error!(
                "diagram.program must be set when diagram.provider is \"command\"",
                "config"
            ));
        }

        for pattern in &self.analysis.excluded_patterns {
            if pattern.trim().is_empty() {
                return Err(config_error!(
                    "analysis.excluded_patterns must not contain empty patterns",
                    "config"
                ));
            }
        }

        if self.analysis.excluded_dirs.iter().any(|d| d.contains('/')) {
            return Err(config_error!(
                "analysis.excluded_dirs holds directory names, not paths",
                "config"
            ));
        }

        Ok(())
    }
}
