// SPDX-License-Identifier: MPL-2.0
//! This module handles the view configuration: the attributes a host would
//! otherwise set on the view at construction, persisted as `view.toml`.
//!
//! # Examples
//!
//! ```no_run
//! use player_view::config::{self, ViewConfig};
//! use player_view::domain::video::ScaleMode;
//!
//! let mut config = config::load().unwrap_or_default();
//! config.scale_mode = ScaleMode::Fill;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::domain::video::{RenderKind, ScaleMode};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::{
    DEFAULT_CONTROLLER_TIMEOUT_MS, DEFAULT_POSTER_FADE_MS, DEFAULT_SURFACE_OPEN_DELAY_MS,
};

const CONFIG_FILE: &str = "view.toml";
const APP_NAME: &str = "PlayerView";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Surface technology created at construction.
    pub render_kind: RenderKind,
    pub scale_mode: ScaleMode,
    /// Whether the controller overlay is driven at all.
    pub use_controller: bool,
    /// Show the controller when a player is attached or starts playing.
    pub default_show_controller: bool,
    /// Keep the poster visible until playback starts.
    pub show_poster: bool,
    pub poster_fade_ms: u32,
    pub controller_timeout_ms: u32,
    pub surface_open_delay_ms: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            render_kind: RenderKind::default(),
            scale_mode: ScaleMode::default(),
            use_controller: false,
            default_show_controller: false,
            show_poster: false,
            poster_fade_ms: DEFAULT_POSTER_FADE_MS,
            controller_timeout_ms: DEFAULT_CONTROLLER_TIMEOUT_MS,
            surface_open_delay_ms: DEFAULT_SURFACE_OPEN_DELAY_MS,
        }
    }
}

impl ViewConfig {
    /// Poster fade duration, clamped to [`defaults::MAX_POSTER_FADE_MS`].
    #[must_use]
    pub fn poster_fade(&self) -> u32 {
        self.poster_fade_ms.min(defaults::MAX_POSTER_FADE_MS)
    }

    /// Surface-open delay, clamped to [`defaults::MAX_SURFACE_OPEN_DELAY_MS`].
    #[must_use]
    pub fn surface_open_delay(&self) -> Duration {
        Duration::from_millis(u64::from(
            self.surface_open_delay_ms
                .min(defaults::MAX_SURFACE_OPEN_DELAY_MS),
        ))
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<ViewConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ViewConfig::default())
}

pub fn save(config: &ViewConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparsable content yields the defaults; only I/O
/// failures are errors.
pub fn load_from_path(path: &Path) -> Result<ViewConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid view config, using defaults");
            Ok(ViewConfig::default())
        }
    }
}

pub fn save_to_path(config: &ViewConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
