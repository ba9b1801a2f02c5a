//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::models::Canvas;
use crate::services::atomic::atomic_write;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding layout JSON files (defaults to `<config dir>/layouts`)
    #[serde(default)]
    pub layouts_dir: Option<PathBuf>,
    /// Directory holding hardware YAML templates (defaults to `<config dir>/hardware`)
    #[serde(default)]
    pub hardware_dir: Option<PathBuf>,
}

/// Canvas used when importing snippets without a hardware profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8099
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ReTerminalDesigner/config.toml`
/// - macOS: `~/Library/Application Support/ReTerminalDesigner/config.toml`
/// - Windows: `%APPDATA%\ReTerminalDesigner\config.toml`
///
/// # Validation
///
/// - canvas width and height must be positive
/// - server port must not be 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Default import canvas
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
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
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path, defaulting when missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using atomic write.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        atomic_write(path, &content)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width <= 0 || self.canvas.height <= 0 {
            anyhow::bail!(
                "Canvas size must be positive, got {}x{}",
                self.canvas.width,
                self.canvas.height
            );
        }
        if self.server.port == 0 {
            anyhow::bail!("Server port must not be 0");
        }
        Ok(())
    }

    /// Canvas used for imports without a hardware profile.
    pub fn canvas(&self) -> Result<Canvas> {
        Canvas::new(self.canvas.width, self.canvas.height)
    }

    /// Resolved layouts directory.
    pub fn layouts_dir(&self) -> Result<PathBuf> {
        match &self.paths.layouts_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("layouts")),
        }
    }

    /// Resolved hardware templates directory.
    pub fn hardware_dir(&self) -> Result<PathBuf> {
        match &self.paths.hardware_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("hardware")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.canvas, CanvasConfig { width: 800, height: 480 });
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8099);
        assert!(config.paths.layouts_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        config.canvas.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.paths.layouts_dir = Some(temp_dir.path().join("layouts"));
        config.canvas.width = 1024;
        config.canvas.height = 600;
        config.save_to(&config_file)?;

        let loaded = Config::load_from(&config_file)?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.canvas()?, Canvas::new(1024, 600)?);
        assert_eq!(loaded.layouts_dir()?, temp_dir.path().join("layouts"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(loaded, Config::new());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 9000\n")?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.canvas, CanvasConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[canvas]\nwidth = -1\nheight = 480\n")?;
        assert!(Config::load_from(&path).is_err());
        Ok(())
    }
}
