//! Route definitions for the Archviz web server

use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Analysis endpoint, mounted at the root
pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analyze", get(handlers::analyze_repository))
}

/// Service endpoints, mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}
