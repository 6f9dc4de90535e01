//! Archviz Web Server
//!
//! HTTP boundary for the repository analysis pipeline.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use server::ArchvizServer;
pub use state::AppState;

use archviz_core::ArchvizError;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    // Any origin may call the analysis endpoint
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .merge(routes::analysis_routes())
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Analysis configuration file (TOML); defaults are used when unset
    pub config_path: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            config_path: None,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("ARCHVIZ_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("ARCHVIZ_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            config_path: std::env::var("ARCHVIZ_CONFIG").ok(),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Missing {0} query parameter")]
    MissingParameter(&'static str),

    #[error("{0}")]
    Analysis(#[from] ArchvizError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            WebError::MissingParameter(_) => (StatusCode::BAD_REQUEST, "missing_parameter"),
            WebError::Analysis(e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            WebError::Analysis(e) => {
                e.log();
                (StatusCode::INTERNAL_SERVER_ERROR, "analysis_failed")
            }
            WebError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            WebError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(json!({
            "error": error_code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Initialize logging for the web server
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "archviz_web=debug,archviz_repo=info,tower_http=debug".into()),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use archviz_core::validation_error;

    #[test]
    fn test_error_status_codes() {
        let missing = WebError::MissingParameter("repo").into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let invalid: WebError = validation_error!("empty", "repo", "test").into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let config = WebError::Config("bad".to_string()).into_response();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        let server = WebError::from(io).into_response();
        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_parameter_message() {
        assert_eq!(
            WebError::MissingParameter("repo").to_string(),
            "Missing repo query parameter"
        );
    }

    #[test]
    fn test_web_config_address() {
        let config = WebConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..WebConfig::default()
        };
        assert_eq!(config.address(), "0.0.0.0:9000");
    }
}
