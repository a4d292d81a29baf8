//! TOML-based configuration for the `dockmaster` command.
//!
//! The config file lives at an explicit path (`--config` or
//! `DOCKMASTER_CONFIG`) or in the platform-appropriate directory:
//! - Windows:  `%APPDATA%\Dockmaster\config.toml`
//! - Linux:    `~/.config/dockmaster/config.toml`
//! - macOS:    `~/Library/Application Support/Dockmaster/config.toml`
//!
//! Example:
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [registry]
//! path = "/srv/dockmasters/DOCKMASTERS.txt"
//!
//! [matcher]
//! confidence_threshold = 0.75
//!
//! [format_fix]
//! sort = true
//! min_lines = 50
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]` and every section is
//! optional, so an empty file, a partial file, or no file at all yields a
//! working configuration.

use std::path::{Path, PathBuf};

use dockmaster_core::matcher::{DEFAULT_CLUSTER_DISTANCE, DEFAULT_CONFIDENCE_THRESHOLD};
use dockmaster_core::registry::DEFAULT_MIN_LINES;
use dockmaster_core::{FormatFixOptions, MatchPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub format_fix: FormatFixConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Location of the persisted registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

/// Matching and clustering tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "default_transition_threshold")]
    pub transition_threshold: i32,
    #[serde(default = "default_cluster_distance")]
    pub cluster_distance: f64,
}

/// Behaviour of `fix-format`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatFixConfig {
    #[serde(default)]
    pub sort: bool,
    #[serde(default = "default_true")]
    pub dedupe: bool,
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_registry_path() -> PathBuf {
    PathBuf::from("DOCKMASTERS.txt")
}
fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}
fn default_transition_threshold() -> i32 {
    MatchPolicy::default().transition_threshold
}
fn default_cluster_distance() -> f64 {
    DEFAULT_CLUSTER_DISTANCE
}
fn default_true() -> bool {
    true
}
fn default_min_lines() -> usize {
    DEFAULT_MIN_LINES
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            transition_threshold: default_transition_threshold(),
            cluster_distance: default_cluster_distance(),
        }
    }
}

impl Default for FormatFixConfig {
    fn default() -> Self {
        Self {
            sort: false,
            dedupe: default_true(),
            min_lines: default_min_lines(),
        }
    }
}

impl AppConfig {
    /// Matcher tunables as the core library expects them.
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            confidence_threshold: self.matcher.confidence_threshold,
            transition_threshold: self.matcher.transition_threshold,
            cluster_distance: self.matcher.cluster_distance,
        }
    }

    pub fn format_fix_options(&self) -> FormatFixOptions {
        FormatFixOptions {
            sort: self.format_fix.sort,
            dedupe: self.format_fix.dedupe,
            min_lines: self.format_fix.min_lines,
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the config file path, preferring `explicit` when given.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if no explicit path is given
/// and the base directory cannot be determined.
pub fn config_file_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("config.toml")),
    }
}

/// Loads `AppConfig`, returning `AppConfig::default()` if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = config_file_path(explicit)?;
    load_config_from(&path)
}

/// [`load_config`] for a known path.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the platform config base directory including the `Dockmaster`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Dockmaster"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("dockmaster"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Dockmaster")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
