//! Model extractors and the table that dispatches files to them
//!
//! Each extractor is a descriptor pairing an eligibility predicate with a
//! pattern-matching function. Every file is offered to every descriptor in
//! order, and all matches are merged into the same accumulators.

pub mod decorator;
pub mod structural;

use archviz_core::{DatabaseInfo, ModelMap};
use std::path::Path;
use tracing::debug;

/// When a file's full text is recorded in the [`ModelMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePolicy {
    /// Whenever the extractor is eligible for the file
    Always,
    /// Only when the extractor found at least one model
    OnMatch,
}

/// Describes one ecosystem's extraction strategy
#[derive(Debug, Clone, Copy)]
pub struct ModelExtractor {
    pub name: &'static str,
    pub is_eligible: fn(&FileContext<'_>) -> bool,
    pub extract: fn(&str) -> DatabaseInfo,
    pub source_policy: SourcePolicy,
}

/// Extractors in the order they are applied
pub const EXTRACTORS: &[ModelExtractor] = &[structural::EXTRACTOR, decorator::EXTRACTOR];

/// A readable file as seen by the eligibility predicates
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// `/`-separated path relative to the repository root
    pub relative_path: &'a str,
    pub content: &'a str,
}

impl<'a> FileContext<'a> {
    pub fn new(relative_path: &'a str, content: &'a str) -> Self {
        Self {
            relative_path,
            content,
        }
    }

    pub fn extension(&self) -> Option<&'a str> {
        Path::new(self.relative_path)
            .extension()
            .and_then(|ext| ext.to_str())
    }

    /// Relative directory holding the file; empty at the repository root
    pub fn parent_dir(&self) -> &'a str {
        self.relative_path
            .rsplit_once('/')
            .map_or("", |(parent, _)| parent)
    }
}

/// Accumulates extractor output across a whole walk
#[derive(Debug, Default)]
pub struct ModelCollector {
    models: ModelMap,
    database_info: DatabaseInfo,
}

impl ModelCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one file to every extractor in `extractors`
    pub fn collect(&mut self, file: &FileContext<'_>, extractors: &[ModelExtractor]) {
        for extractor in extractors {
            if !(extractor.is_eligible)(file) {
                continue;
            }

            let tables = (extractor.extract)(file.content);
            debug!(
                extractor = extractor.name,
                path = file.relative_path,
                models = tables.len(),
                "Ran model extractor"
            );

            let record_source = match extractor.source_policy {
                SourcePolicy::Always => true,
                SourcePolicy::OnMatch => !tables.is_empty(),
            };
            if record_source {
                self.models
                    .insert(file.relative_path.to_string(), file.content.to_string());
            }

            self.merge(tables);
        }
    }

    /// Append field lists, never replacing what an earlier file or extractor found
    pub fn merge(&mut self, tables: DatabaseInfo) {
        for (name, fields) in tables {
            self.database_info.entry(name).or_default().extend(fields);
        }
    }

    pub fn into_parts(self) -> (ModelMap, DatabaseInfo) {
        (self.models, self.database_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_paths() {
        let nested = FileContext::new("internal/models/user.go", "");
        assert_eq!(nested.extension(), Some("go"));
        assert_eq!(nested.parent_dir(), "internal/models");

        let top = FileContext::new("README", "");
        assert_eq!(top.extension(), None);
        assert_eq!(top.parent_dir(), "");
    }

    #[test]
    fn test_same_model_from_two_files_is_concatenated() {
        let mut collector = ModelCollector::new();
        collector.collect(
            &FileContext::new("models/a.go", "type User struct {\n ID int\n}"),
            EXTRACTORS,
        );
        collector.collect(
            &FileContext::new("models/b.go", "type User struct {\n ID int\n}"),
            EXTRACTORS,
        );

        let (models, database_info) = collector.into_parts();
        assert_eq!(models.len(), 2);
        assert_eq!(
            database_info["User"],
            vec!["ID int".to_string(), "ID int".to_string()]
        );
    }

    #[test]
    fn test_source_policies() {
        let mut collector = ModelCollector::new();
        // Eligible structural file without declarations is still recorded
        collector.collect(&FileContext::new("models/helpers.go", "package models"), EXTRACTORS);
        // Eligible decorator file without model classes is not
        collector.collect(
            &FileContext::new("models/helpers.py", "def helper():\n    pass\n"),
            EXTRACTORS,
        );

        let (models, database_info) = collector.into_parts();
        assert!(models.contains_key("models/helpers.go"));
        assert!(!models.contains_key("models/helpers.py"));
        assert!(database_info.is_empty());
    }

    #[test]
    fn test_ineligible_file_is_untouched() {
        let mut collector = ModelCollector::new();
        collector.collect(
            &FileContext::new("cmd/main.go", "type User struct {\n ID int\n}"),
            EXTRACTORS,
        );
        let (models, database_info) = collector.into_parts();
        assert!(models.is_empty());
        assert!(database_info.is_empty());
    }

    #[test]
    fn test_custom_dispatch_table() {
        fn always(_: &FileContext<'_>) -> bool {
            true
        }
        fn one_table(_: &str) -> DatabaseInfo {
            DatabaseInfo::from([("t".to_string(), vec!["c".to_string()])])
        }
        let table = [ModelExtractor {
            name: "test",
            is_eligible: always,
            extract: one_table,
            source_policy: SourcePolicy::OnMatch,
        }];

        let mut collector = ModelCollector::new();
        collector.collect(&FileContext::new("any.txt", "x"), &table);
        collector.collect(&FileContext::new("other.txt", "y"), &table);

        let (models, database_info) = collector.into_parts();
        assert_eq!(models.len(), 2);
        assert_eq!(database_info["t"], vec!["c".to_string(), "c".to_string()]);
    }
}
