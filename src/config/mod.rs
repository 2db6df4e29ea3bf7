// SPDX-License-Identifier: MPL-2.0
//! This module handles the options page configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[backend]` - Backend service URL
//! - `[exceptions]` - Domains excluded from the extension
//! - `[status]` - Status message display, history and queue options
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `OPTIONS_STATUS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use options_status::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::paths;
use crate::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General options page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Backend service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BackendConfig {
    /// Base URL of the backend service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Domains the extension leaves alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExceptionsConfig {
    #[serde(default)]
    pub domains: Vec<String>,
}

/// Status message subsystem options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusConfig {
    /// Auto-hide delay used when a caller gives no duration (0 = never hide).
    #[serde(default = "default_status_duration_ms")]
    pub default_duration_ms: u64,

    /// Record every display in the history ledger.
    #[serde(default = "default_true")]
    pub enable_history: bool,

    /// Buffer requests that arrive while a message is visible.
    #[serde(default = "default_true")]
    pub enable_queue: bool,

    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,

    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_STATUS_DURATION_MS,
            enable_history: true,
            enable_queue: true,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Options page configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub exceptions: ExceptionsConfig,

    #[serde(default)]
    pub status: StatusConfig,
}

impl Config {
    /// Checks values serde cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the backend URL is set but is not an
    /// `http://` or `https://` URL with a host part.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.backend.url {
            let rest = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .ok_or_else(|| Error::Config(format!("backend url must use http(s): {url}")))?;
            if rest.trim_matches('/').is_empty() {
                return Err(Error::Config(format!("backend url has no host: {url}")));
            }
        }
        Ok(())
    }

    /// Adds a domain exception, returning false if it was already present
    /// or normalizes to nothing.
    pub fn add_exception(&mut self, domain: &str) -> bool {
        let Some(domain) = normalize_domain(domain) else {
            return false;
        };
        if self.exceptions.domains.contains(&domain) {
            return false;
        }
        self.exceptions.domains.push(domain);
        self.exceptions.domains.sort();
        true
    }

    /// Removes a domain exception, returning true if it was present.
    pub fn remove_exception(&mut self, domain: &str) -> bool {
        let Some(domain) = normalize_domain(domain) else {
            return false;
        };
        let before = self.exceptions.domains.len();
        self.exceptions.domains.retain(|d| *d != domain);
        self.exceptions.domains.len() < before
    }

    /// Normalizes every exception entry, dropping blanks and duplicates.
    pub fn normalize_exceptions(&mut self) {
        let mut domains: Vec<String> = self
            .exceptions
            .domains
            .iter()
            .filter_map(|d| normalize_domain(d))
            .collect();
        domains.sort();
        domains.dedup();
        self.exceptions.domains = domains;
    }
}

/// Lowercases a domain and strips scheme, wildcard prefix and path.
fn normalize_domain(raw: &str) -> Option<String> {
    let mut domain = raw.trim().to_lowercase();
    if let Some(idx) = domain.find("://") {
        domain = domain[idx + 3..].to_string();
    }
    if let Some(idx) = domain.find('/') {
        domain.truncate(idx);
    }
    let domain = domain.trim_start_matches("*.").trim_matches('.');
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_status_duration_ms() -> u64 {
    DEFAULT_STATUS_DURATION_MS
}

fn default_max_history_size() -> usize {
    DEFAULT_MAX_HISTORY_SIZE
}

fn default_max_queue_size() -> usize {
    DEFAULT_MAX_QUEUE_SIZE
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("settings could not be loaded, using defaults: {err}")),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.normalize_exceptions();
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

/// Overwrites the stored settings with defaults and returns them.
pub fn reset_with_override(base_dir: Option<PathBuf>) -> Result<Config> {
    let config = Config::default();
    save_with_override(&config, base_dir)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            backend: BackendConfig {
                url: Some("https://api.example.com".to_string()),
            },
            exceptions: ExceptionsConfig {
                domains: vec!["example.org".to_string()],
            },
            status: StatusConfig {
                default_duration_ms: 1500,
                enable_history: false,
                enable_queue: true,
                max_history_size: 7,
                max_queue_size: 3,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_warns_and_defaults_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[status\nbroken").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_returns_defaults_silently() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_status_section_fills_defaults() {
        let config: Config = toml::from_str("[status]\nenable_queue = false\n").expect("parse");
        assert!(!config.status.enable_queue);
        assert!(config.status.enable_history);
        assert_eq!(config.status.default_duration_ms, DEFAULT_STATUS_DURATION_MS);
        assert_eq!(config.status.max_queue_size, DEFAULT_MAX_QUEUE_SIZE);
    }

    #[test]
    fn theme_mode_parses_case_insensitively() {
        let config: Config =
            toml::from_str("[general]\ntheme_mode = \"DARK\"\n").expect("parse");
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);

        let invalid = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(invalid.is_err());
    }

    #[test]
    fn validate_rejects_non_http_backend_url() {
        let mut config = Config::default();
        config.backend.url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        config.backend.url = Some("https://".to_string());
        assert!(config.validate().is_err());

        config.backend.url = Some("http://localhost:8080/".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn save_to_path_refuses_invalid_config() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        let mut config = Config::default();
        config.backend.url = Some("not a url".to_string());

        assert!(save_to_path(&config, &config_path).is_err());
        assert!(!config_path.exists());
    }

    #[test]
    fn exceptions_are_normalized_and_deduplicated() {
        let mut config = Config::default();
        assert!(config.add_exception("https://Example.com/path"));
        assert!(!config.add_exception("*.example.com"));
        assert!(config.add_exception("b.test"));
        assert!(!config.add_exception("   "));
        assert_eq!(config.exceptions.domains, vec!["b.test", "example.com"]);

        assert!(config.remove_exception("EXAMPLE.com"));
        assert!(!config.remove_exception("example.com"));
        assert_eq!(config.exceptions.domains, vec!["b.test"]);
    }

    #[test]
    fn reset_writes_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = Some(temp_dir.path().to_path_buf());
        let mut config = Config::default();
        config.general.language = Some("de".to_string());
        save_with_override(&config, dir.clone()).expect("save");

        let reset = reset_with_override(dir.clone()).expect("reset");
        assert_eq!(reset, Config::default());
        let (loaded, warning) = load_with_override(dir);
        assert!(warning.is_none());
        assert_eq!(loaded, Config::default());
    }
}
