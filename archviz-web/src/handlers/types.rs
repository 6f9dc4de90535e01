//! Request and response types shared by the handlers

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Query string of `GET /analyze`
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    /// Filesystem path of the repository root
    pub repo: Option<String>,
}
