//! HTTP request handlers for the Archviz web server

pub mod analyze;
pub mod health;
pub mod types;

pub use analyze::*;
pub use health::*;
pub use types::*;
