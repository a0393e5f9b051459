//! Match settings
//!
//! Loaded from a JSON file by the native driver; the browser host passes its
//! own choices straight to the platform binding.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::sim::Difficulty;

/// Allowed range for the headless driver frame rate
const FRAME_RATE_RANGE: (u32, u32) = (10, 240);

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty for the next shift
    pub difficulty: Difficulty,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Frames per second for the headless driver
    pub frame_rate: u32,
    /// Best score handed to the simulation at startup
    pub best_score: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: None,
            frame_rate: 60,
            best_score: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Clamp values into supported ranges
    pub fn sanitized(mut self) -> Self {
        let (min, max) = FRAME_RATE_RANGE;
        self.frame_rate = self.frame_rate.clamp(min, max);
        self
    }

    /// Frame delta for the headless driver (seconds)
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}
