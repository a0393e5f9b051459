//! Difficulty presets and their tuning constants

use serde::{Deserialize, Serialize};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Per-difficulty tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    /// Multiplies the spawn interval (>1 spawns slower)
    pub spawn_scale: f32,
    /// Multiplies urgency decay
    pub urgency_drain: f32,
    /// Maximum live containers before the oldest is evicted
    pub overflow_limit: usize,
    /// Multiplies the random gap between events
    pub event_gap_scale: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                spawn_scale: 1.2,
                urgency_drain: 0.85,
                overflow_limit: 8,
                event_gap_scale: 1.12,
            },
            Difficulty::Normal => DifficultyProfile {
                spawn_scale: 1.0,
                urgency_drain: 1.0,
                overflow_limit: 7,
                event_gap_scale: 1.0,
            },
            Difficulty::Hard => DifficultyProfile {
                spawn_scale: 0.82,
                urgency_drain: 1.2,
                overflow_limit: 6,
                event_gap_scale: 0.82,
            },
        }
    }

    /// Spawn interval for the given elapsed match time
    ///
    /// The queue speeds up every 15 seconds until the final stretch.
    pub fn spawn_interval(&self, elapsed: f32) -> f32 {
        let base = if elapsed < 15.0 {
            2.4
        } else if elapsed < 30.0 {
            2.0
        } else if elapsed < 45.0 {
            1.8
        } else if elapsed < 60.0 {
            1.6
        } else if elapsed < 75.0 {
            1.4
        } else {
            1.25
        };
        base * self.profile().spawn_scale
    }
}
