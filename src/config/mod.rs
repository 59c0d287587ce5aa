// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, loading user preferences
//! from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[player]` - Case-study player settings (control auto-hide, embed
//!   start-up delay, initial mute, seek step)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `SHOWCASE_PLAYER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use showcase_player::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.player.start_muted = Some(false);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::ui::state::HideDelay;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Case-study player settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Seconds of pointer inactivity before transport controls hide.
    #[serde(
        default = "default_controls_hide_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub controls_hide_secs: Option<u32>,

    /// Delay before the first play command is posted to a remote embed.
    #[serde(
        default = "default_embed_startup_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub embed_startup_delay_ms: Option<u64>,

    /// Whether playback starts muted.
    #[serde(default = "default_start_muted", skip_serializing_if = "Option::is_none")]
    pub start_muted: Option<bool>,

    /// Step of the rewind/forward affordances in seconds.
    #[serde(
        default = "default_seek_step_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub seek_step_secs: Option<f64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            controls_hide_secs: default_controls_hide_secs(),
            embed_startup_delay_ms: default_embed_startup_delay_ms(),
            start_muted: default_start_muted(),
            seek_step_secs: default_seek_step_secs(),
        }
    }
}

impl PlayerConfig {
    /// Auto-hide timeout, clamped to the valid range.
    pub fn hide_delay(&self) -> HideDelay {
        self.controls_hide_secs
            .map(HideDelay::new)
            .unwrap_or_default()
    }

    /// Embed start-up delay, clamped to the valid range.
    pub fn embed_startup_delay(&self) -> Duration {
        let ms = self
            .embed_startup_delay_ms
            .unwrap_or(DEFAULT_EMBED_STARTUP_DELAY_MS)
            .clamp(MIN_EMBED_STARTUP_DELAY_MS, MAX_EMBED_STARTUP_DELAY_MS);
        Duration::from_millis(ms)
    }

    pub fn start_muted(&self) -> bool {
        self.start_muted.unwrap_or(DEFAULT_START_MUTED)
    }

    /// Seek step in seconds, clamped to the valid range.
    pub fn seek_step_secs(&self) -> f64 {
        let step = self.seek_step_secs.unwrap_or(DEFAULT_SEEK_STEP_SECS);
        if step.is_finite() {
            step.clamp(MIN_SEEK_STEP_SECS, MAX_SEEK_STEP_SECS)
        } else {
            DEFAULT_SEEK_STEP_SECS
        }
    }
}

/// Crate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
}

fn default_controls_hide_secs() -> Option<u32> {
    Some(DEFAULT_CONTROLS_HIDE_SECS)
}

fn default_embed_startup_delay_ms() -> Option<u64> {
    Some(DEFAULT_EMBED_STARTUP_DELAY_MS)
}

fn default_start_muted() -> Option<bool> {
    Some(DEFAULT_START_MUTED)
}

fn default_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_SEEK_STEP_SECS)
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

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
                        Some(format!("{}: {}", path.display(), err)),
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
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

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
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
