//! Configuration loading and discovery for `drill.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::DrillConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery.
pub const CONFIG_FILE: &str = "drill.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse drill.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Enable strict validation
    pub strict: Option<bool>,
    /// Override render scale
    pub scale: Option<f64>,
    /// Override generator attempts
    pub max_attempts: Option<u32>,
    /// Override generator program
    pub generator: Option<String>,
    /// Override generator arguments (replaces, does not append)
    pub generator_args: Option<Vec<String>>,
}

/// Find drill.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for drill.toml
/// 2. Check XDG_CONFIG_HOME/drillboard/drill.toml (or ~/.config/drillboard/drill.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find drill.toml in XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("drillboard").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find drill.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a drill.toml file.
///
/// If a path is provided, loads from that file (a missing file is an error).
/// Otherwise uses [`find_config`]; if nothing is found, returns defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("team/drill.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<DrillConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(DrillConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<DrillConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<DrillConfig, ConfigError> {
    let config: DrillConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut DrillConfig, overrides: &CliOverrides) {
    if let Some(strict) = overrides.strict {
        config.validate.strict = strict;
    }

    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }

    if let Some(max_attempts) = overrides.max_attempts {
        config.pipeline.max_attempts = max_attempts;
    }

    if let Some(ref generator) = overrides.generator {
        config.generator.command = Some(generator.clone());
    }

    if let Some(ref args) = overrides.generator_args {
        config.generator.args = args.clone();
    }
}
