//! Match controller: owns all match state and is the only way to mutate it
//!
//! The presentation layer calls `start`, `tick` and `resolve`, renders the
//! returned reports, and reads everything else through `snapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::container::{Container, Lane};
use super::difficulty::Difficulty;
use super::events::{ActiveEvent, EventKind, EventScheduler};
use super::registry::{ContainerExpiryInfo, ContainerRegistry};
use super::resolution;
use super::state::{
    ContainerView, EndCause, EndReport, EventBanner, EventPreview, FeedbackMessage, MatchPhase,
    MatchSnapshot, MatchState,
};
use crate::consts::*;
use crate::error::DropError;
use crate::record::BestScore;

/// Result of routing a container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveReport {
    pub container_id: u32,
    pub lane: Lane,
    pub score_delta: i64,
    pub strike_delta: u32,
    pub combo_after: u32,
    pub feedback: Vec<FeedbackMessage>,
    pub ended: Option<EndReport>,
}

/// Owns the match state, the container queue and the event scheduler
#[derive(Debug, Clone)]
pub struct MatchController {
    pub(super) state: MatchState,
    pub(super) registry: ContainerRegistry,
    pub(super) scheduler: EventScheduler,
    pub(super) best: BestScore,
    pub(super) rng: Pcg32,
}

impl MatchController {
    /// Create a controller with the given RNG seed (match not started)
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let difficulty = Difficulty::default();
        let scheduler = EventScheduler::new(&mut rng, difficulty.profile().event_gap_scale);
        Self {
            state: MatchState::new(difficulty),
            registry: ContainerRegistry::new(),
            scheduler,
            best: BestScore::default(),
            rng,
        }
    }

    pub fn with_random_seed() -> Self {
        Self::new(rand::random())
    }

    /// Discard everything and start a fresh shift
    pub fn start(&mut self, difficulty: Difficulty) {
        self.reset(difficulty);
        self.state.phase = MatchPhase::Running;
        log::info!("Shift started ({})", difficulty.as_str());
    }

    /// Change difficulty between matches (ignored while running)
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if !self.state.is_running() {
            self.reset(difficulty);
        }
    }

    /// Seed the best-score sentinel from the environment
    pub fn set_best_score(&mut self, score: i64) {
        self.best = BestScore::new(score);
    }

    fn reset(&mut self, difficulty: Difficulty) {
        self.state = MatchState::new(difficulty);
        self.registry = ContainerRegistry::new();
        self.scheduler = EventScheduler::new(&mut self.rng, difficulty.profile().event_gap_scale);
    }

    /// Route a container to a lane
    pub fn resolve(&mut self, container_id: u32, lane: Lane) -> Result<ResolveReport, DropError> {
        if !self.state.is_running() {
            return Err(DropError::NotRunning);
        }
        let container = self
            .registry
            .remove(container_id)
            .ok_or(DropError::UnknownContainer(container_id))?;

        let outcome = resolution::resolve(
            &container,
            lane,
            self.state.combo,
            self.scheduler.current_kind(),
        );

        self.state.score += outcome.score_delta;
        self.state.strikes = (self.state.strikes + outcome.strike_delta).min(MAX_STRIKES);
        self.state.combo = outcome.combo_after;

        let mut feedback = outcome.feedback;
        let ended = if self.state.strikes >= MAX_STRIKES {
            Some(self.finish(EndCause::Strikeout, &mut feedback))
        } else {
            None
        };

        Ok(ResolveReport {
            container_id,
            lane,
            score_delta: outcome.score_delta,
            strike_delta: outcome.strike_delta,
            combo_after: outcome.combo_after,
            feedback,
            ended,
        })
    }

    /// Route the front-of-queue container (keyboard shortcut path)
    pub fn resolve_oldest(&mut self, lane: Lane) -> Result<ResolveReport, DropError> {
        if !self.state.is_running() {
            return Err(DropError::NotRunning);
        }
        let id = self.registry.oldest().map(|c| c.id).ok_or(DropError::EmptyQueue)?;
        self.resolve(id, lane)
    }

    /// Apply an expiry or overflow penalty
    pub(super) fn apply_penalty(&mut self, penalty: &ContainerExpiryInfo) {
        self.state.score += penalty.score_delta;
        self.state.strikes = (self.state.strikes + penalty.strike_delta).min(MAX_STRIKES);
        self.state.combo = 0;
    }

    /// Transition to Ended and settle the best score
    pub(super) fn finish(&mut self, cause: EndCause, feedback: &mut Vec<FeedbackMessage>) -> EndReport {
        self.state.phase = MatchPhase::Ended;
        self.state.end_cause = Some(cause);

        let final_score = self.state.score;
        let new_best = self.best.submit(final_score);
        if new_best {
            feedback.push(FeedbackMessage::good("New best score!"));
        }
        log::info!(
            "Shift ended ({}): score {}, strikes {}",
            cause.headline(),
            final_score,
            self.state.strikes
        );

        EndReport {
            cause,
            final_score,
            new_best,
            best_score: self.best.score,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn strikes(&self) -> u32 {
        self.state.strikes
    }

    pub fn combo(&self) -> u32 {
        self.state.combo
    }

    pub fn time_left(&self) -> f32 {
        self.state.time_left
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn best_score(&self) -> i64 {
        self.best.score
    }

    /// Containers in queue order (oldest first)
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.registry.iter()
    }

    pub fn active_event(&self) -> Option<&ActiveEvent> {
        self.scheduler.current()
    }

    pub fn next_event(&self) -> EventKind {
        self.scheduler.preview()
    }

    pub fn next_event_in(&self) -> Option<f32> {
        self.scheduler.next_event_in()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let containers = self
            .registry
            .iter()
            .map(|c| ContainerView {
                id: c.id,
                kind: c.kind,
                base_value: c.base_value(),
                default_lane: c.default_lane(),
                urgency_left: c.urgency_left.max(0.0),
                urgency_ratio: c.urgency_ratio(),
                urgency_level: c.urgency_level(),
            })
            .collect();

        let active_event = self.scheduler.current().map(|e| EventBanner {
            kind: e.kind,
            name: e.kind.name(),
            description: e.kind.description(),
            time_left: e.time_left.max(0.0),
        });

        let preview = self.scheduler.preview();
        let next_event = EventPreview {
            kind: preview,
            name: preview.name(),
            starts_in: self.scheduler.next_event_in().map(|t| t.max(0.0)),
        };

        MatchSnapshot {
            phase: self.state.phase,
            difficulty: self.state.difficulty,
            score: self.state.score,
            strikes: self.state.strikes,
            max_strikes: MAX_STRIKES,
            combo: self.state.combo,
            combo_display: self.state.combo.max(1),
            time_left: self.state.time_left,
            containers,
            active_event,
            next_event,
            best_score: self.best.score,
            end_cause: self.state.end_cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::container::ContainerKind;
    use crate::sim::state::Tone;

    fn running() -> MatchController {
        let mut controller = MatchController::new(2024);
        controller.start(Difficulty::Normal);
        controller
    }

    #[test]
    fn test_not_started_rejects_drops() {
        let mut controller = MatchController::new(1);
        assert_eq!(controller.phase(), MatchPhase::NotStarted);
        assert_eq!(
            controller.resolve(1, Lane::Domestic),
            Err(DropError::NotRunning)
        );
    }

    #[test]
    fn test_correct_food_drop() {
        let mut controller = running();
        let food = controller.registry.spawn(ContainerKind::Food);

        let report = controller.resolve(food.id, Lane::Domestic).unwrap();
        assert_eq!(report.score_delta, 15);
        assert_eq!(report.strike_delta, 0);
        assert_eq!(report.combo_after, 1);
        assert_eq!(controller.score(), 15);
        assert_eq!(controller.combo(), 1);
        assert!(report.ended.is_none());
    }

    #[test]
    fn test_food_exemption_drop() {
        let mut controller = running();
        controller
            .scheduler
            .force_activate(EventKind::FoodExemption, 12.0);
        let food = controller.registry.spawn(ContainerKind::Food);

        let report = controller.resolve(food.id, Lane::Import).unwrap();
        assert_eq!(report.score_delta, 0);
        assert_eq!(report.strike_delta, 0);
        assert_eq!(controller.strikes(), 0);
        assert_eq!(controller.combo(), 1);
    }

    #[test]
    fn test_resolve_twice_is_noop() {
        let mut controller = running();
        let c = controller.registry.spawn(ContainerKind::Electronics);
        assert!(controller.resolve(c.id, Lane::Import).is_ok());
        let score = controller.score();

        assert_eq!(
            controller.resolve(c.id, Lane::Import),
            Err(DropError::UnknownContainer(c.id))
        );
        assert_eq!(controller.score(), score);
        assert_eq!(controller.combo(), 1);
    }

    #[test]
    fn test_combo_of_six() {
        let mut controller = running();
        let mut last = None;
        for _ in 0..6 {
            let c = controller.registry.spawn(ContainerKind::Electronics);
            last = controller.resolve(c.id, Lane::Import).ok();
        }
        let last = last.unwrap();
        assert_eq!(last.combo_after, 6);
        assert_eq!(last.score_delta, 30);
    }

    #[test]
    fn test_wrong_lane_strikeout_ends_match() {
        let mut controller = running();
        controller.set_best_score(1_000);
        for _ in 0..3 {
            let c = controller.registry.spawn(ContainerKind::Machinery);
            let report = controller.resolve(c.id, Lane::Domestic).unwrap();
            if controller.strikes() < MAX_STRIKES {
                assert!(report.ended.is_none());
            } else {
                let end = report.ended.unwrap();
                assert_eq!(end.cause, EndCause::Strikeout);
                assert!(!end.new_best);
                assert_eq!(end.final_score, -30);
            }
        }
        assert_eq!(controller.phase(), MatchPhase::Ended);
        assert!(!controller.is_running());

        let c = controller.registry.spawn(ContainerKind::Food);
        assert_eq!(controller.resolve(c.id, Lane::Domestic), Err(DropError::NotRunning));
        assert_eq!(controller.score(), -30);
    }

    #[test]
    fn test_resolve_oldest() {
        let mut controller = running();
        assert_eq!(controller.resolve_oldest(Lane::Hold), Err(DropError::EmptyQueue));

        let first = controller.registry.spawn(ContainerKind::Food);
        let second = controller.registry.spawn(ContainerKind::Machinery);
        let report = controller.resolve_oldest(Lane::Hold).unwrap();
        assert_eq!(report.container_id, first.id);
        assert_eq!(report.score_delta, 5);
        assert_eq!(controller.containers().next().map(|c| c.id), Some(second.id));
    }

    #[test]
    fn test_start_resets_everything() {
        let mut controller = running();
        let c = controller.registry.spawn(ContainerKind::Machinery);
        controller.resolve(c.id, Lane::Domestic).unwrap();
        controller.registry.spawn(ContainerKind::Food);
        controller.scheduler.force_activate(EventKind::DomesticAudit, 10.0);

        controller.start(Difficulty::Hard);
        assert_eq!(controller.score(), 0);
        assert_eq!(controller.strikes(), 0);
        assert_eq!(controller.combo(), 0);
        assert_eq!(controller.time_left(), GAME_LENGTH);
        assert_eq!(controller.containers().count(), 0);
        assert!(controller.active_event().is_none());
        assert_eq!(controller.difficulty(), Difficulty::Hard);
        assert!(controller.is_running());

        // Ids restart with the new shift
        assert_eq!(controller.registry.spawn(ContainerKind::Food).id, 1);
    }

    #[test]
    fn test_set_difficulty_only_between_matches() {
        let mut controller = MatchController::new(9);
        controller.set_difficulty(Difficulty::Easy);
        assert_eq!(controller.difficulty(), Difficulty::Easy);
        assert_eq!(controller.phase(), MatchPhase::NotStarted);

        controller.start(Difficulty::Normal);
        controller.set_difficulty(Difficulty::Hard);
        assert_eq!(controller.difficulty(), Difficulty::Normal);
    }

    #[test]
    fn test_snapshot() {
        let mut controller = running();
        let c = controller.registry.spawn(ContainerKind::Electronics);
        if let Some(live) = controller.registry.get_mut(c.id) {
            live.urgency_left = 2.0;
        }
        controller.scheduler.force_activate(EventKind::ImportSurcharge, 11.0);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, MatchPhase::Running);
        assert_eq!(snapshot.combo_display, 1);
        assert_eq!(snapshot.max_strikes, 3);
        assert_eq!(snapshot.containers.len(), 1);
        assert_eq!(snapshot.containers[0].urgency_ratio, 0.2);
        assert_eq!(snapshot.containers[0].default_lane, Lane::Import);
        let banner = snapshot.active_event.unwrap();
        assert_eq!(banner.name, "Import Surcharge");
        assert_eq!(banner.time_left, 11.0);
        assert!(snapshot.next_event.starts_in.is_none());

        let json = serde_json::to_value(controller.snapshot()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["containers"][0]["kind"], "Electronics");
    }

    #[test]
    fn test_negative_feedback_tone() {
        let mut controller = running();
        controller.scheduler.force_activate(EventKind::DomesticAudit, 10.0);
        let c = controller.registry.spawn(ContainerKind::Electronics);
        let report = controller.resolve(c.id, Lane::Domestic).unwrap();
        assert_eq!(report.score_delta, -15);
        assert!(report.feedback.iter().all(|f| f.tone == Tone::Bad));
    }
}
