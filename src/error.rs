//! Error handling for Venture Watch
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for collection operations
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for collection operations
pub type Result<T> = anyhow::Result<T>;
