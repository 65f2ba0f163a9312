//! Error types for core module
//!
//! Provides custom error types for core functionality: loading and
//! validating the game configuration.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file I/O error
    #[error("Config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config deserialization error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config value out of range or unrecognized
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
