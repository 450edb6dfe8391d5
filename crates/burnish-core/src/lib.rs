//! Burnish Core - Foundational types for the burnish quality engine
//!
//! This crate provides the error taxonomy, configuration loading, and the
//! file-enumeration boundary shared by the engine and the CLI.

pub mod config;
pub mod error;
pub mod walker;

pub use config::{Config, EngineConfig, ToolsConfig, WalkerConfig};
pub use error::{BurnishError, ConfigError, Result, WalkError};
pub use walker::list_files;
