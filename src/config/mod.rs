//! Configuration for the console
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by `cli`)
//! 2. Environment variables
//! 3. Config file (~/.config/logdeck/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::session::{clock, SessionSettings, Timestamper, DEFAULT_ERROR_MARKER};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod endpoint;
mod logging;
mod serialization;
mod tui;

#[cfg(test)]
mod tests;

pub use endpoint::{Endpoint, FileEndpoint};
pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use tui::{FileTui, TuiConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOCALE: &str = "fr_FR";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the log stream and control service live
    pub endpoint: Endpoint,

    /// Locale used for entry timestamps, e.g. "fr_FR"
    pub locale: String,

    /// Substring that marks an entry as an error
    pub error_marker: String,

    /// Whether to run the TUI (false = headless streaming to stdout)
    pub enable_tui: bool,

    /// Connect as soon as the console starts
    pub auto_connect: bool,

    /// Terminal UI settings
    pub tui: TuiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            locale: DEFAULT_LOCALE.to_string(),
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
            enable_tui: true,
            auto_connect: false,
            tui: TuiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub locale: Option<String>,
    pub error_marker: Option<String>,
    pub auto_connect: Option<bool>,

    /// Optional [endpoint] section
    pub endpoint: Option<FileEndpoint>,

    /// Optional [tui] section
    pub tui: Option<FileTui>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

fn env_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Config {
    /// Get the config file path: ~/.config/logdeck/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("logdeck").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read the config file. A missing file means defaults; an unreadable or
    /// malformed one is an error rather than a silent fallback.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (delete it to regenerate defaults)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut endpoint = Endpoint::from_file(file.endpoint);
        if let Some(host) = env("LOGDECK_HOST") {
            endpoint.host = host;
        }
        if let Some(secure) = env("LOGDECK_SECURE") {
            endpoint.secure = env_flag(&secure);
        }

        let locale = env("LOGDECK_LOCALE")
            .or(file.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let error_marker = file
            .error_marker
            .unwrap_or_else(|| DEFAULT_ERROR_MARKER.to_string());

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("LOGDECK_NO_TUI")
            .map(|v| !env_flag(&v))
            .unwrap_or(true);

        let auto_connect = env("LOGDECK_AUTO_CONNECT")
            .map(|v| env_flag(&v))
            .or(file.auto_connect)
            .unwrap_or(false);

        let mut tui = TuiConfig::from_file(file.tui);
        if let Some(theme) = env("LOGDECK_THEME") {
            tui.theme = theme;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            endpoint,
            locale,
            error_marker,
            enable_tui,
            auto_connect,
            tui,
            logging,
        }
    }

    /// Settings handed to a new `Session`
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            stream_url: self.endpoint.stream_url(),
            api_base: self.endpoint.api_path(),
            error_marker: self.error_marker.clone(),
        }
    }

    /// Timestamper on the system clock in the configured locale
    pub fn timestamper(&self) -> Result<Timestamper> {
        let locale = clock::parse_locale(&self.locale)?;
        Ok(Timestamper::system(locale))
    }
}
