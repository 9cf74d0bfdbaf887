//! Configuration management for the application.
//!
//! This module loads user defaults for the commands from a TOML file with
//! platform-specific directory resolution. Command-line flags always take
//! precedence over the values here.

use crate::constants::{
    APP_NAME, DEFAULT_CELL_WIDTH, DEFAULT_KEYMAP_PATH, FALLBACK_DEFAULT_LAYERS, MIN_CELL_WIDTH,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Document locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Keymap document used when none is given (plain path or `REV:path`)
    pub keymap: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            keymap: DEFAULT_KEYMAP_PATH.to_string(),
        }
    }
}

/// Table rendering preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Characters per table cell
    pub cell_width: usize,
    /// Show display glyphs instead of raw keycodes
    pub friendly_labels: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            friendly_labels: true,
        }
    }
}

/// Defaults for `compare`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Left-hand document (required by `compare` when not given on the command line)
    pub left: Option<String>,
    /// Layers compared when none are given
    pub layers: Vec<String>,
    /// Locale applied to the left side before comparing
    pub translate_left: Option<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            left: None,
            layers: FALLBACK_DEFAULT_LAYERS.iter().map(ToString::to_string).collect(),
            translate_left: None,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LayerKit/config.toml`
/// - macOS: `~/Library/Application Support/LayerKit/config.toml`
/// - Windows: `%APPDATA%\LayerKit\config.toml`
///
/// # Example
///
/// ```toml
/// [paths]
/// keymap = "config/keymap.json"
///
/// [display]
/// cell_width = 8
/// friendly_labels = true
///
/// [compare]
/// left = "v36:keymap.json"
/// layers = ["QWERTY", "Symbol", "Cursor"]
/// translate_left = "de"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document locations
    pub paths: PathConfig,
    /// Rendering preferences
    pub display: DisplayConfig,
    /// Comparison defaults
    pub compare: CompareConfig,
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
            .join(APP_NAME);
        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// Falls back to defaults when the config directory cannot be determined.
    pub fn load() -> Result<Self> {
        match Self::config_file_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::debug!("{:#}, using default configuration", e);
                Ok(Self::new())
            }
        }
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults. A file that is not valid TOML, or
    /// does not match the schema, is reported with a warning and also yields
    /// the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        match toml::from_str::<Self>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse config file {}: {}; using defaults",
                    path.display(),
                    e
                );
                Ok(Self::new())
            }
        }
    }

    /// Cell width clamped to the narrowest usable width.
    #[must_use]
    pub fn cell_width(&self) -> usize {
        self.display.cell_width.max(MIN_CELL_WIDTH)
    }
}
