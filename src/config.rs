//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::APP_DIR_NAME;
use crate::models::{is_valid_layout_key, DEFAULT_LAYOUT_KEY};

/// General transcoding preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Layout used when a request does not name one
    #[serde(default = "default_layout")]
    pub default_layout: String,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT_KEY.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_layout: default_layout(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Layout storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Layouts JSON file (defaults to `layouts.json` in the config directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layouts_file: Option<PathBuf>,
    /// Seed the built-in layouts when the layouts file does not exist yet
    #[serde(default = "default_seed_builtin")]
    pub seed_builtin: bool,
}

const fn default_seed_builtin() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            layouts_file: None,
            seed_builtin: default_seed_builtin(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/keycodec/config.toml`
/// - macOS: `~/Library/Application Support/keycodec/config.toml`
/// - Windows: `%APPDATA%\keycodec\config.toml`
///
/// # Validation
///
/// - `default_layout` must be a well-formed layout key
/// - `port` must be non-zero
/// - `host` must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Transcoding preferences
    #[serde(default)]
    pub general: GeneralConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Layout storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves the layouts file, falling back to the config directory.
    pub fn layouts_file(&self) -> Result<PathBuf> {
        match &self.storage.layouts_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("layouts.json")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `path` using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_layout_key(&self.general.default_layout) {
            anyhow::bail!(
                "Invalid default layout key: '{}'",
                self.general.default_layout
            );
        }

        if self.server.host.trim().is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be non-zero");
        }

        Ok(())
    }
}
