//! Configuration file support for emutouch.
//!
//! Settings are read from `~/.config/emutouch/config.toml` unless a path is
//! given explicitly. Missing files and missing keys fall back to defaults.

pub mod types;

pub use types::{GestureConfig, KeyboardConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration.
///
/// # Example TOML
/// ```toml
/// [gesture]
/// enabled = true
/// position_change_threshold = 20.0
/// mouse_hold_interval_ms = 1000
/// haptic_feedback = true
///
/// [keyboard]
/// show_on_start = true
/// start_with_alternate = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Touch-to-mouse emulation
    #[serde(default)]
    pub gesture: GestureConfig,

    /// On-screen keyboard
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Clamps out-of-range values, logging a warning for each one.
    ///
    /// Validated ranges:
    /// - `position_change_threshold`: 1.0 - 200.0
    /// - `mouse_hold_interval_ms`: 100 - 5000
    fn validate_and_clamp(&mut self) {
        let threshold = self.gesture.position_change_threshold;
        if !(1.0..=200.0).contains(&threshold) {
            log::warn!(
                "Invalid position_change_threshold {:.1}, clamping to 1.0-200.0 range",
                threshold
            );
            // NaN fails the range check but survives clamp; use the default.
            self.gesture.position_change_threshold = if threshold.is_nan() {
                GestureConfig::default().position_change_threshold
            } else {
                threshold.clamp(1.0, 200.0)
            };
        }

        if !(100..=5000).contains(&self.gesture.mouse_hold_interval_ms) {
            log::warn!(
                "Invalid mouse_hold_interval_ms {}, clamping to 100-5000 range",
                self.gesture.mouse_hold_interval_ms
            );
            self.gesture.mouse_hold_interval_ms = self.gesture.mouse_hold_interval_ms.clamp(100, 5000);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("emutouch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or defaults if the file does
    /// not exist. Loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses configuration text without clamping.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
