//! File filtering utilities for the repository walk

use archviz_core::{config_error, AnalysisConfig, ArchvizResult};
use glob::Pattern;
use std::path::Path;

/// Compiled exclusion rules applied to every entry of the walk
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Directory names that are never descended into
    excluded_dirs: Vec<String>,
    /// Compiled glob patterns
    compiled_patterns: Vec<Pattern>,
}

impl FileFilter {
    /// Compile a filter, rejecting malformed glob patterns up front
    pub fn new(excluded_dirs: Vec<String>, patterns: &[String]) -> ArchvizResult<Self> {
        let mut compiled_patterns = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            match Pattern::new(pattern) {
                Ok(compiled) => compiled_patterns.push(compiled),
                Err(e) => {
                    return Err(config_error!(
                        format!("Invalid glob pattern '{}': {}", pattern, e),
                        "file_filter",
                        e
                    ));
                }
            }
        }

        Ok(Self {
            excluded_dirs,
            compiled_patterns,
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> ArchvizResult<Self> {
        Self::new(config.excluded_dirs.clone(), &config.excluded_patterns)
    }

    /// Check if an entry should be skipped
    ///
    /// `relative_path` is `/`-separated and relative to the repository root.
    pub fn is_excluded(&self, relative_path: &str, is_dir: bool) -> bool {
        let file_name = Path::new(relative_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        if is_dir && self.excluded_dirs.iter().any(|dir| dir == file_name) {
            return true;
        }

        self.compiled_patterns
            .iter()
            .any(|pattern| pattern.matches(relative_path) || pattern.matches(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archviz_core::ArchvizError;

    #[test]
    fn test_default_config_skips_git_dir_only() {
        let filter = FileFilter::from_config(&AnalysisConfig::default()).unwrap();
        assert!(filter.is_excluded(".git", true));
        assert!(filter.is_excluded("vendor/.git", true));
        // A file that happens to be named like an excluded dir stays
        assert!(!filter.is_excluded(".git", false));
        assert!(!filter.is_excluded("src/main.go", false));
    }

    #[test]
    fn test_patterns_match_path_or_name() {
        let filter = FileFilter::new(
            vec![],
            &["*.lock".to_string(), "docs/generated/*".to_string()],
        )
        .unwrap();
        assert!(filter.is_excluded("Cargo.lock", false));
        assert!(filter.is_excluded("nested/yarn.lock", false));
        assert!(filter.is_excluded("docs/generated/api.md", false));
        assert!(!filter.is_excluded("docs/guide.md", false));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = FileFilter::new(vec![], &["[unclosed".to_string()]).unwrap_err();
        assert!(err.to_string().contains("[unclosed"));
        match &err {
            ArchvizError::Config {
                source, context, ..
            } => {
                assert!(source.is_some());
                assert_eq!(context.component, "file_filter");
                assert!(context
                    .recovery_suggestions
                    .iter()
                    .any(|s| s.contains("config --init")));
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
