//! Frame-driven simulation tick
//!
//! Advances the match by one variable frame delta: clock, spawning, events,
//! urgency decay, then the termination check.

use serde::Serialize;

use super::container::Container;
use super::controller::MatchController;
use super::events::{EventKind, SchedulerTransition};
use super::registry::ContainerExpiryInfo;
use super::state::{EndReport, FeedbackMessage};
use crate::consts::*;

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub spawned: Vec<Container>,
    pub expired: Vec<ContainerExpiryInfo>,
    pub overflowed: Vec<ContainerExpiryInfo>,
    pub event_activated: Option<EventKind>,
    /// The event that just ran out, if any
    pub event_expired: Option<EventKind>,
    pub feedback: Vec<FeedbackMessage>,
    pub ended: Option<EndReport>,
}

impl TickReport {
    /// True when nothing worth rendering happened
    pub fn is_quiet(&self) -> bool {
        self.spawned.is_empty()
            && self.expired.is_empty()
            && self.overflowed.is_empty()
            && self.event_activated.is_none()
            && self.event_expired.is_none()
            && self.ended.is_none()
    }
}

/// Clamp a raw frame delta into [0, MAX_FRAME_DT]
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

impl MatchController {
    /// Advance the match by a wall-clock frame delta (seconds)
    ///
    /// No-op unless the match is running.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        if !self.state.is_running() {
            return report;
        }

        let dt = clamp_frame_dt(dt);
        self.state.time_left = (self.state.time_left - dt).max(0.0);
        let elapsed = self.state.elapsed();
        let difficulty = self.state.difficulty;

        // Spawning
        let outcome = self
            .registry
            .spawn_tick(dt, elapsed, difficulty, &mut self.rng);
        report.spawned = outcome.spawned;
        for penalty in &outcome.overflowed {
            self.apply_penalty(penalty);
            report
                .feedback
                .push(FeedbackMessage::bad("Overflow! -12, +1 strike"));
        }
        report.overflowed = outcome.overflowed;

        // Events
        match self.scheduler.advance(dt, &mut self.rng) {
            Some(SchedulerTransition::Activated(kind)) => {
                report.event_activated = Some(kind);
                report
                    .feedback
                    .push(FeedbackMessage::good(format!("Event: {}", kind.name())));
            }
            Some(SchedulerTransition::Expired(kind)) => {
                report.event_expired = Some(kind);
            }
            None => {}
        }

        // Urgency
        let drain = self.scheduler.drain_multiplier() * difficulty.profile().urgency_drain;
        let expired = self.registry.decay_tick(dt, drain);
        for penalty in &expired {
            self.apply_penalty(penalty);
            report.feedback.push(FeedbackMessage::bad(format!(
                "{} expired! -8, +1 strike",
                penalty.kind.as_str()
            )));
        }
        report.expired = expired;

        if let Some(cause) = self.state.end_condition() {
            report.ended = Some(self.finish(cause, &mut report.feedback));
        }

        report
    }
}
