//! Archviz Core - Core data structures and trait definitions
//!
//! This module defines the report data model, the error taxonomy, configuration,
//! logging, and the capability traits shared by the analysis pipeline and its front ends.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tracing;
