//! Configuration file loading with precedence handling.

use crate::sanitize::PolicyKind;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A policy name that none of the sanitize policies answer to.
    #[error("Unknown sanitize policy {name:?} (expected one of: collapse, escape, glyph)")]
    UnknownPolicy {
        /// The rejected name.
        name: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to hardcoded defaults.
/// Corresponds to `~/.config/textvis/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Sanitize policy name ("collapse", "escape", "glyph").
    #[serde(default)]
    pub policy: Option<String>,

    /// Route values through the immediate path instead of batching.
    #[serde(default)]
    pub immediate: Option<bool>,

    /// Parse input lines as JSON values.
    #[serde(default)]
    pub json: Option<bool>,

    /// Path to the log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Fully resolved configuration after the precedence chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Active sanitize policy.
    pub policy: PolicyKind,
    /// Immediate (single-push) delivery mode.
    pub immediate: bool,
    /// JSON value mode.
    pub json: bool,
    /// Log file path for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            immediate: false,
            json: false,
            log_file_path: default_log_path(),
        }
    }
}

/// CLI-level overrides applied last in the precedence chain.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--policy`, when given.
    pub policy: Option<String>,
    /// `--immediate`, only when explicitly set.
    pub immediate: Option<bool>,
    /// `--json`, only when explicitly set.
    pub json: Option<bool>,
    /// `--log-file`, when given.
    pub log_file: Option<PathBuf>,
}

/// Default log file location: `<data dir>/textvis/textvis.log`, falling
/// back to the temp directory when no data dir exists.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("textvis")
        .join("textvis.log")
}

/// Default config file location: `<config dir>/textvis/config.toml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("textvis").join("config.toml"))
}

/// Load the config file, explicit path first, then the default location.
///
/// A missing file is not an error (`Ok(None)`): configuration is entirely
/// optional. An explicit path that cannot be read IS an error, since the
/// user asked for that specific file.
///
/// # Errors
///
/// Returns `ConfigError::ReadError` or `ConfigError::ParseError`.
pub fn load_config_file(explicit: Option<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(None),
        },
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    let parsed = toml::from_str(&contents).map_err(|err| ConfigError::ParseError {
        path,
        reason: err.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Merge a (possibly absent) config file over the defaults.
///
/// # Errors
///
/// Returns `ConfigError::UnknownPolicy` for an unrecognized policy name.
pub fn merge_config(file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let mut resolved = ResolvedConfig::default();
    let Some(file) = file else {
        return Ok(resolved);
    };

    if let Some(name) = file.policy {
        resolved.policy = parse_policy(&name)?;
    }
    if let Some(immediate) = file.immediate {
        resolved.immediate = immediate;
    }
    if let Some(json) = file.json {
        resolved.json = json;
    }
    if let Some(path) = file.log_file_path {
        resolved.log_file_path = path;
    }
    Ok(resolved)
}

/// Apply `TEXTVIS_*` environment variable overrides.
///
/// Recognized: `TEXTVIS_POLICY`, `TEXTVIS_IMMEDIATE` (`1`/`true`),
/// `TEXTVIS_JSON` (`1`/`true`), `TEXTVIS_LOG_FILE`.
///
/// # Errors
///
/// Returns `ConfigError::UnknownPolicy` for an unrecognized policy name.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(name) = std::env::var("TEXTVIS_POLICY") {
        config.policy = parse_policy(&name)?;
    }
    if let Ok(value) = std::env::var("TEXTVIS_IMMEDIATE") {
        config.immediate = is_truthy(&value);
    }
    if let Ok(value) = std::env::var("TEXTVIS_JSON") {
        config.json = is_truthy(&value);
    }
    if let Ok(path) = std::env::var("TEXTVIS_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }
    Ok(config)
}

/// Apply CLI argument overrides, the last link in the chain.
///
/// # Errors
///
/// Returns `ConfigError::UnknownPolicy` for an unrecognized policy name
/// (clap validates first in practice; this keeps the function total).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(name) = overrides.policy {
        config.policy = parse_policy(&name)?;
    }
    if let Some(immediate) = overrides.immediate {
        config.immediate = immediate;
    }
    if let Some(json) = overrides.json {
        config.json = json;
    }
    if let Some(path) = overrides.log_file {
        config.log_file_path = path;
    }
    Ok(config)
}

fn parse_policy(name: &str) -> Result<PolicyKind, ConfigError> {
    PolicyKind::from_name(name).ok_or_else(|| ConfigError::UnknownPolicy {
        name: name.to_string(),
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes" | "on")
}
