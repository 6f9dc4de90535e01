//! Archviz Repository - Repository analysis pipeline
//!
//! Walks a repository checkout into a file tree, extracts data models, reads
//! git metadata and assembles everything into a single report.

pub mod aggregate;
pub mod analyzer;
pub mod diagram;
pub mod extractors;
pub mod filter;
pub mod git;
pub mod language;
pub mod probe;
pub mod summary;
pub mod tree;

pub use aggregate::compute_aggregates;
pub use analyzer::*;
pub use diagram::*;
pub use extractors::{FileContext, ModelCollector, ModelExtractor, SourcePolicy, EXTRACTORS};
pub use filter::*;
pub use git::*;
pub use summary::generate_summary;
pub use tree::*;
