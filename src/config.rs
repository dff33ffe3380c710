//! Deck tuning and user preferences

use crate::domain::dispatcher::{CARDS_BEFORE_CHECKOUT, DEFAULT_STAKE};
use crate::error::{Result, SwipeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Share of the surface width a horizontal drag must cross to commit
    pub threshold_ratio: f64,
    pub exit_duration_ms: u64,
    pub snap_back_duration_ms: u64,
    /// Placeholder cards drawn behind the active one
    pub lookahead: usize,
    pub cards_before_checkout: u64,
    pub default_stake: u64,
    pub max_rotation_deg: f64,
    pub placeholder_scale_step: f64,
    pub placeholder_offset_step: f64,
    /// Whether the welcome dialog has been shown
    pub welcome_shown: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.25,
            exit_duration_ms: 250,
            snap_back_duration_ms: 200,
            lookahead: 2,
            cards_before_checkout: CARDS_BEFORE_CHECKOUT,
            default_stake: DEFAULT_STAKE,
            max_rotation_deg: 10.0,
            placeholder_scale_step: 0.05,
            placeholder_offset_step: 10.0,
            welcome_shown: false,
        }
    }
}

impl DeckConfig {
    /// Get the config file path (~/.config/swipedeck/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swipedeck").join("config.json"))
    }

    /// Load config from the default location, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            SwipeError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            SwipeError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            SwipeError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            SwipeError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SwipeError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SwipeError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            SwipeError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold_ratio.is_finite() || self.threshold_ratio <= 0.0 {
            return Err(SwipeError::ConfigError(format!(
                "threshold_ratio must be positive, got {}",
                self.threshold_ratio
            )));
        }
        if self.cards_before_checkout == 0 {
            return Err(SwipeError::ConfigError(
                "cards_before_checkout must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("max_rotation_deg", self.max_rotation_deg),
            ("placeholder_scale_step", self.placeholder_scale_step),
            ("placeholder_offset_step", self.placeholder_offset_step),
        ] {
            if !value.is_finite() {
                return Err(SwipeError::ConfigError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        // The deepest placeholder must keep a positive scale
        let deepest = self.placeholder_scale_step * self.lookahead as f64;
        if self.placeholder_scale_step < 0.0 || deepest >= 1.0 {
            return Err(SwipeError::ConfigError(format!(
                "placeholder_scale_step must be in [0, 1/lookahead), got {} with lookahead {}",
                self.placeholder_scale_step, self.lookahead
            )));
        }
        Ok(())
    }

    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }

    pub fn snap_back_duration(&self) -> Duration {
        Duration::from_millis(self.snap_back_duration_ms)
    }
}
