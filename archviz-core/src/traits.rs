//! Core trait definitions

use crate::error::ArchvizResult;
use async_trait::async_trait;

/// Turns a plain-text repository summary into a diagram description
///
/// The analysis pipeline treats implementations as opaque text-to-text
/// transforms. A failure never aborts a report; it is embedded in it instead.
#[async_trait]
pub trait DiagramGenerator: Send + Sync {
    /// Short identifier used in logs and error context
    fn name(&self) -> &str;

    /// Generate a diagram for the given summary
    async fn generate(&self, summary: &str) -> ArchvizResult<String>;
}
