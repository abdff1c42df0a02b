//! Layered config resolution: defaults, TOML file, environment, command line.

use super::CarouselConfig;
use crate::engine::constants::FRAME_RATE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "CAROUSEL_CONFIG";

/// Environment variable overriding `carousel.wrap`.
pub const WRAP_ENV_VAR: &str = "CAROUSEL_WRAP";

/// Config loading failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// File that failed.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },

    /// Malformed TOML, a wrongly typed value, or an unknown key.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A value parsed but is unusable (e.g. a non-positive item width).
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Offending option name.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// On-disk config, `<config_dir>/carousel/config.toml` by default.
///
/// ```toml
/// log_file_path = "/tmp/carousel.log"
/// frame_rate = 120.0
///
/// [carousel]
/// wrap = false
/// item_width = 80.0
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Where tracing output goes.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Simulator tick rate in frames per second.
    #[serde(default)]
    pub frame_rate: Option<f64>,

    /// Base carousel options.
    #[serde(default)]
    pub carousel: Option<CarouselConfig>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Base carousel options.
    pub carousel: CarouselConfig,
    /// Simulator tick rate in frames per second.
    pub frame_rate: f64,
    /// Where tracing output goes.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            frame_rate: FRAME_RATE,
            log_file_path: default_log_path(),
        }
    }
}

/// Where a config file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line.
    Explicit,
    /// The `CAROUSEL_CONFIG` environment variable.
    Environment,
    /// The platform config directory.
    Default,
}

/// `<state_dir>/carousel/carousel.log`, or `carousel.log` in the working
/// directory when the platform has no state directory.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map(|dir| dir.join("carousel").join("carousel.log"))
        .unwrap_or_else(|| PathBuf::from("carousel.log"))
}

/// `<config_dir>/carousel/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carousel").join("config.toml"))
}

/// Pick the config file to load, highest precedence first.
pub fn config_path_candidate(explicit: Option<PathBuf>) -> Option<(ConfigSource, PathBuf)> {
    explicit
        .map(|path| (ConfigSource::Explicit, path))
        .or_else(|| {
            std::env::var_os(CONFIG_ENV_VAR)
                .map(|path| (ConfigSource::Environment, PathBuf::from(path)))
        })
        .or_else(|| default_config_path().map(|path| (ConfigSource::Default, path)))
}

/// Parse config TOML. `path` is only used in error messages.
///
/// # Errors
///
/// [`ConfigError::ParseError`] on malformed TOML or unknown keys.
pub fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load one config file. A missing file yields `Ok(None)`.
///
/// # Errors
///
/// Read or parse failures of a file that does exist.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    parse_config(&contents, &path).map(Some)
}

/// Load the highest-precedence config file: `config_path`, then
/// `CAROUSEL_CONFIG`, then [`default_config_path`].
///
/// Only the chosen file is consulted; a missing file means defaults.
///
/// # Errors
///
/// Read or parse failures of the chosen file.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let Some((source, path)) = config_path_candidate(config_path) else {
        return Ok(None);
    };
    debug!(?source, path = %path.display(), "Loading config file");
    load_config_file(path)
}

/// Lay the file's values over the defaults and validate the result.
///
/// # Errors
///
/// [`ConfigError::InvalidValue`] for a non-positive frame rate or carousel
/// options that fail [`CarouselConfig::validate`].
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let mut resolved = ResolvedConfig::default();
    if let Some(file) = config_file {
        if let Some(carousel) = file.carousel {
            resolved.carousel = carousel;
        }
        if let Some(rate) = file.frame_rate {
            resolved.frame_rate = rate;
        }
        if let Some(path) = file.log_file_path {
            resolved.log_file_path = path;
        }
    }

    if !(resolved.frame_rate > 0.0) {
        return Err(ConfigError::InvalidValue {
            key: "frame_rate".to_string(),
            reason: format!("must be positive, got {}", resolved.frame_rate),
        });
    }
    resolved.carousel.validate()?;
    Ok(resolved)
}

/// Apply `CAROUSEL_WRAP` (`true`/`1` or `false`/`0`). Other values are logged
/// and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(wrap) = std::env::var(WRAP_ENV_VAR) {
        match parse_flag(&wrap) {
            Some(wrap) => config.carousel.wrap = wrap,
            None => tracing::warn!(value = %wrap, "Ignoring unrecognised {WRAP_ENV_VAR}"),
        }
    }
    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Apply command-line overrides, the last and strongest layer.
///
/// `None` means the flag was not given. Non-positive frame rates are ignored.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    wrap_override: Option<bool>,
    bounce_override: Option<bool>,
    paging_override: Option<bool>,
    frame_rate_override: Option<f64>,
) -> ResolvedConfig {
    let carousel = &mut config.carousel;
    carousel.wrap = wrap_override.unwrap_or(carousel.wrap);
    carousel.bounce = bounce_override.unwrap_or(carousel.bounce);
    carousel.paging = paging_override.unwrap_or(carousel.paging);
    if let Some(rate) = frame_rate_override.filter(|rate| *rate > 0.0) {
        config.frame_rate = rate;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
