//! Match state and the notifications handed to the presentation layer

use serde::Serialize;

use super::container::{ContainerKind, Lane, UrgencyLevel};
use super::difficulty::Difficulty;
use super::events::EventKind;
use crate::consts::*;

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPhase {
    NotStarted,
    Running,
    /// Terminal until the next `start`
    Ended,
}

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndCause {
    Strikeout,
    Timeout,
}

impl EndCause {
    pub fn headline(&self) -> &'static str {
        match self {
            EndCause::Strikeout => "Terminal Shutdown",
            EndCause::Timeout => "Shift Complete",
        }
    }
}

/// Feedback color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Bad,
}

/// A short message for the feedback layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackMessage {
    pub text: String,
    pub tone: Tone,
}

impl FeedbackMessage {
    pub fn good(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Good,
        }
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Bad,
        }
    }
}

/// End-of-match summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndReport {
    pub cause: EndCause,
    /// Score rounded for display and record comparison
    pub final_score: i64,
    pub new_best: bool,
    /// Best score after this match
    pub best_score: i64,
}

impl EndReport {
    pub fn summary(&self) -> String {
        match self.cause {
            EndCause::Strikeout => format!(
                "{} strikes reached. Final Score: {}",
                MAX_STRIKES, self.final_score
            ),
            EndCause::Timeout => format!("Time elapsed. Final Score: {}", self.final_score),
        }
    }
}

/// Score, strikes, combo and clock for the current match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchState {
    pub score: i64,
    pub strikes: u32,
    pub combo: u32,
    pub time_left: f32,
    pub phase: MatchPhase,
    pub difficulty: Difficulty,
    pub end_cause: Option<EndCause>,
}

impl MatchState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            score: 0,
            strikes: 0,
            combo: 0,
            time_left: GAME_LENGTH,
            phase: MatchPhase::NotStarted,
            difficulty,
            end_cause: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Seconds since the whistle
    pub fn elapsed(&self) -> f32 {
        GAME_LENGTH - self.time_left
    }

    /// Termination check; strikeout wins when both conditions hold
    pub fn end_condition(&self) -> Option<EndCause> {
        if self.strikes >= MAX_STRIKES {
            Some(EndCause::Strikeout)
        } else if self.time_left <= 0.0 {
            Some(EndCause::Timeout)
        } else {
            None
        }
    }
}

/// Queue entry as shown on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerView {
    pub id: u32,
    pub kind: ContainerKind,
    pub base_value: i64,
    pub default_lane: Lane,
    pub urgency_left: f32,
    pub urgency_ratio: f32,
    pub urgency_level: UrgencyLevel,
}

/// Active event banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBanner {
    pub kind: EventKind,
    pub name: &'static str,
    pub description: &'static str,
    pub time_left: f32,
}

/// Upcoming event ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPreview {
    pub kind: EventKind,
    pub name: &'static str,
    /// None while another event is still active
    pub starts_in: Option<f32>,
}

/// Read-only view of everything the HUD needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub difficulty: Difficulty,
    pub score: i64,
    pub strikes: u32,
    pub max_strikes: u32,
    pub combo: u32,
    /// Combo as displayed (never below x1)
    pub combo_display: u32,
    pub time_left: f32,
    pub containers: Vec<ContainerView>,
    pub active_event: Option<EventBanner>,
    pub next_event: EventPreview,
    pub best_score: i64,
    pub end_cause: Option<EndCause>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_condition_prefers_strikeout() {
        let mut state = MatchState::new(Difficulty::Normal);
        assert_eq!(state.end_condition(), None);

        state.time_left = 0.0;
        assert_eq!(state.end_condition(), Some(EndCause::Timeout));

        state.strikes = MAX_STRIKES;
        assert_eq!(state.end_condition(), Some(EndCause::Strikeout));
    }

    #[test]
    fn test_end_summary() {
        let report = EndReport {
            cause: EndCause::Strikeout,
            final_score: 42,
            new_best: false,
            best_score: 100,
        };
        assert_eq!(report.summary(), "3 strikes reached. Final Score: 42");
        assert_eq!(report.cause.headline(), "Terminal Shutdown");
    }
}
