use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::theme::Theme;

/// Environment variable overriding where settings are stored.
pub const SETTINGS_ENV: &str = "OXIDESTATS_SETTINGS";
const DEFAULT_FILE: &str = "oxidestats_settings.json";

pub const DECIMAL_PLACES_RANGE: std::ops::RangeInclusive<usize> = 0..=10;
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<f32> = 8.0..=24.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display preferences. None of these affect computed statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub decimal_places: usize,
    pub font_size: f32,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            font_size: 12.0,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
    }

    /// Pull out-of-range values back into their allowed ranges.
    pub fn clamped(mut self) -> Self {
        self.decimal_places = self
            .decimal_places
            .clamp(*DECIMAL_PLACES_RANGE.start(), *DECIMAL_PLACES_RANGE.end());
        self.font_size = if self.font_size.is_finite() {
            self.font_size
                .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end())
        } else {
            Settings::default().font_size
        };
        self
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.clamped())
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                tracing::info!("Settings loaded from {:?}", path);
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Settings::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring settings at {:?}: {e}", path);
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
