//! Error types for burnish

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BurnishError
pub type Result<T> = std::result::Result<T, BurnishError>;

/// Main error type for burnish operations.
///
/// Per-task failures are deliberately absent: a handler that fails produces
/// a failed `TaskResult`, never an error on this type.
#[derive(Debug, Error)]
pub enum BurnishError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// File enumeration errors
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// TOML parsing error
    #[error("Failed to parse configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// IO error
    #[error("IO error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// File enumeration errors
#[derive(Debug, Error)]
pub enum WalkError {
    /// Root path does not exist
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),

    /// Root path is not a directory
    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to read a directory entry
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
