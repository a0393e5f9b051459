//! Timed rule-modifier events
//!
//! At most one event is active at a time. The scheduler alternates between an
//! idle countdown and an active event, and always knows which event comes next
//! so the HUD can preview it.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use super::container::{Container, ContainerKind, Lane};
use crate::consts::*;

/// Event catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    ImportSurcharge,
    FoodExemption,
    InspectionBacklog,
    DomesticFastTrack,
    PriorityMachinery,
    DomesticAudit,
}

/// What an event sees when a drop is resolved
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub lane: Lane,
    pub container: &'a Container,
    /// Lane matched the container's default lane
    pub is_correct_by_default: bool,
}

/// Scoring adjustments an event applies to a drop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventEffect {
    pub points: i64,
    pub force_correct: bool,
    /// Cancel the base-value credit (the event grants its own flat credit)
    pub skip_default_correct_points: bool,
}

impl EventEffect {
    fn points(points: i64) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }
}

/// Static catalog entry
#[derive(Debug, Serialize)]
pub struct EventDefinition {
    pub kind: EventKind,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub resolve: fn(&ResolveContext) -> EventEffect,
}

static CATALOG: [EventDefinition; 6] = [
    EventDefinition {
        kind: EventKind::ImportSurcharge,
        id: "import-surcharge",
        name: "Import Surcharge",
        description: "Any drop in Import gets an extra -10 penalty.",
        resolve: import_surcharge,
    },
    EventDefinition {
        kind: EventKind::FoodExemption,
        id: "food-exemption",
        name: "Food Exemption",
        description: "Food dropped in Import counts as correct (+15).",
        resolve: food_exemption,
    },
    EventDefinition {
        kind: EventKind::InspectionBacklog,
        id: "inspection-backlog",
        name: "Inspection Backlog",
        description: "Hold gives 0 points; urgency drains 25% faster.",
        resolve: inspection_backlog,
    },
    EventDefinition {
        kind: EventKind::DomesticFastTrack,
        id: "domestic-fast-track",
        name: "Domestic Fast-Track",
        description: "Correct Domestic drops gain +10 bonus.",
        resolve: domestic_fast_track,
    },
    EventDefinition {
        kind: EventKind::PriorityMachinery,
        id: "priority-machinery",
        name: "Priority Machinery",
        description: "Machinery correctly routed earns +12.",
        resolve: priority_machinery,
    },
    EventDefinition {
        kind: EventKind::DomesticAudit,
        id: "domestic-audit",
        name: "Domestic Audit",
        description: "Wrong Domestic routing costs -5 extra.",
        resolve: domestic_audit,
    },
];

fn import_surcharge(ctx: &ResolveContext) -> EventEffect {
    EventEffect::points(if ctx.lane == Lane::Import { -10 } else { 0 })
}

fn food_exemption(ctx: &ResolveContext) -> EventEffect {
    if ctx.container.kind == ContainerKind::Food && ctx.lane == Lane::Import {
        EventEffect {
            points: 15,
            force_correct: true,
            skip_default_correct_points: true,
        }
    } else {
        EventEffect::default()
    }
}

fn inspection_backlog(ctx: &ResolveContext) -> EventEffect {
    EventEffect::points(if ctx.lane == Lane::Hold { -5 } else { 0 })
}

fn domestic_fast_track(ctx: &ResolveContext) -> EventEffect {
    let correct_domestic = ctx.lane == Lane::Domestic
        && ctx.is_correct_by_default
        && ctx.container.default_lane() == Lane::Domestic;
    EventEffect::points(if correct_domestic { 10 } else { 0 })
}

fn priority_machinery(ctx: &ResolveContext) -> EventEffect {
    let hit = ctx.container.kind == ContainerKind::Machinery && ctx.is_correct_by_default;
    EventEffect::points(if hit { 12 } else { 0 })
}

fn domestic_audit(ctx: &ResolveContext) -> EventEffect {
    let hit = ctx.lane == Lane::Domestic && !ctx.is_correct_by_default;
    EventEffect::points(if hit { -5 } else { 0 })
}

impl EventKind {
    /// Every catalog entry, in catalog order
    pub fn catalog() -> &'static [EventDefinition] {
        &CATALOG
    }

    pub fn definition(&self) -> &'static EventDefinition {
        // Catalog order matches declaration order
        &CATALOG[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.definition().name
    }

    pub fn description(&self) -> &'static str {
        self.definition().description
    }

    pub fn resolve(&self, ctx: &ResolveContext) -> EventEffect {
        (self.definition().resolve)(ctx)
    }

    /// Urgency drain multiplier while this event is active
    pub fn drain_multiplier(&self) -> f32 {
        match self {
            EventKind::InspectionBacklog => BACKLOG_DRAIN,
            _ => 1.0,
        }
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        CATALOG
            .choose(rng)
            .map(|def| def.kind)
            .unwrap_or(EventKind::ImportSurcharge)
    }
}

/// An event currently modifying the rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    pub time_left: f32,
}

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerState {
    /// Counting down to the next event
    Idle { next_event_in: f32 },
    Active(ActiveEvent),
}

/// Notable scheduler changes during one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerTransition {
    Activated(EventKind),
    Expired(EventKind),
}

/// Selects, activates and expires events
#[derive(Debug, Clone)]
pub struct EventScheduler {
    state: SchedulerState,
    preview: EventKind,
    gap_scale: f32,
}

impl EventScheduler {
    /// Idle scheduler with the opening gap and a random preview
    pub fn new<R: Rng + ?Sized>(rng: &mut R, gap_scale: f32) -> Self {
        let next_event_in = scaled_range(rng, FIRST_EVENT_GAP, gap_scale);
        Self {
            state: SchedulerState::Idle { next_event_in },
            preview: EventKind::random(rng),
            gap_scale,
        }
    }

    pub fn current(&self) -> Option<&ActiveEvent> {
        match &self.state {
            SchedulerState::Active(event) => Some(event),
            SchedulerState::Idle { .. } => None,
        }
    }

    pub fn current_kind(&self) -> Option<EventKind> {
        self.current().map(|e| e.kind)
    }

    /// Event that will activate next
    pub fn preview(&self) -> EventKind {
        self.preview
    }

    /// Countdown to the next event (None while one is active)
    pub fn next_event_in(&self) -> Option<f32> {
        match self.state {
            SchedulerState::Idle { next_event_in } => Some(next_event_in),
            SchedulerState::Active(_) => None,
        }
    }

    /// Urgency drain contributed by the active event
    pub fn drain_multiplier(&self) -> f32 {
        self.current_kind()
            .map(|kind| kind.drain_multiplier())
            .unwrap_or(1.0)
    }

    /// Advance countdowns by `dt`
    ///
    /// An expiring event never hands over to a new one in the same call.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Option<SchedulerTransition> {
        match &mut self.state {
            SchedulerState::Active(event) => {
                event.time_left -= dt;
                if event.time_left > 0.0 {
                    return None;
                }
                let kind = event.kind;
                self.preview = EventKind::random(rng);
                self.state = SchedulerState::Idle {
                    next_event_in: scaled_range(rng, EVENT_GAP, self.gap_scale),
                };
                log::debug!("Event expired: {}", kind.name());
                Some(SchedulerTransition::Expired(kind))
            }
            SchedulerState::Idle { next_event_in } => {
                *next_event_in -= dt;
                if *next_event_in > 0.0 {
                    return None;
                }
                let kind = self.preview;
                let (min, max) = EVENT_DURATION;
                self.state = SchedulerState::Active(ActiveEvent {
                    kind,
                    time_left: rng.random_range(min..max),
                });
                self.preview = EventKind::random(rng);
                log::debug!("Event activated: {}", kind.name());
                Some(SchedulerTransition::Activated(kind))
            }
        }
    }

    /// Activate an event immediately (debug/testing)
    pub fn force_activate(&mut self, kind: EventKind, duration: f32) {
        self.state = SchedulerState::Active(ActiveEvent {
            kind,
            time_left: duration,
        });
    }
}

fn scaled_range<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32), scale: f32) -> f32 {
    rng.random_range(min..max) * scale
}
