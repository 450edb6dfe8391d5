//! Configuration loading for burnish

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

/// Config file names searched for, in order of preference
pub fn config_file_names() -> &'static [&'static str] {
    &["burnish.toml", ".burnish.toml"]
}

/// Main configuration for burnish
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine tuning
    pub engine: EngineConfig,

    /// External tool commands
    pub tools: ToolsConfig,

    /// File enumeration configuration
    pub walker: WalkerConfig,
}

/// Worker pool and scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of workers; defaults to min(6, available parallelism)
    pub workers: Option<usize>,

    /// Sleep between queue polls when a worker finds the queue empty
    pub idle_poll_ms: u64,

    /// Completion watcher poll interval
    pub watch_poll_ms: u64,

    /// Upper bound on a single external tool invocation
    pub tool_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            idle_poll_ms: 100,
            watch_poll_ms: 50,
            tool_timeout_secs: 120,
        }
    }
}

/// External tool commands, as argv prefixes; the target file path is
/// appended as the final argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Formatter command (default: prettier --write)
    pub formatter: Vec<String>,

    /// Linter command with auto-fix (default: eslint --fix)
    pub linter: Vec<String>,

    /// Type checker command in no-emit mode (default: tsc --noEmit)
    pub typechecker: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            formatter: vec!["prettier".into(), "--write".into()],
            linter: vec!["eslint".into(), "--fix".into()],
            typechecker: vec![
                "tsc".into(),
                "--noEmit".into(),
                "--pretty".into(),
                "false".into(),
            ],
        }
    }
}

/// File enumeration configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Directory names to skip in addition to the built-in ignore list
    pub ignore: Vec<String>,
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    info!(path = %path.display(), "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: Config = toml::from_str(&content).map_err(ConfigError::TomlError)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find a configuration file in the directory or its parents.
///
/// The first name in [`config_file_names`] that exists wins; parents are
/// walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from a directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or fall back to defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from_dir(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(_) => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            (Config::default(), None)
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(workers) = config.engine.workers {
        if workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.workers".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
    }

    if config.engine.tool_timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "engine.tool_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    for (field, argv) in [
        ("tools.formatter", &config.tools.formatter),
        ("tools.linter", &config.tools.linter),
        ("tools.typechecker", &config.tools.typechecker),
    ] {
        if argv.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "command must not be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
