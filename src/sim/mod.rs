//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay free of presentation:
//! - Time arrives as frame deltas from the caller
//! - Randomness comes only from the controller's seeded RNG
//! - Stable iteration order (containers by id)
//! - No rendering, audio, input or storage dependencies

pub mod container;
pub mod controller;
pub mod difficulty;
pub mod events;
pub mod registry;
pub mod resolution;
pub mod state;
pub mod tick;

pub use container::{Container, ContainerKind, Lane, UrgencyLevel};
pub use controller::{MatchController, ResolveReport};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use events::{ActiveEvent, EventDefinition, EventEffect, EventKind, EventScheduler};
pub use registry::{ContainerExpiryInfo, ContainerRegistry};
pub use resolution::{Resolution, combo_multiplier, resolve};
pub use state::{
    EndCause, EndReport, FeedbackMessage, MatchPhase, MatchSnapshot, MatchState, Tone,
};
pub use tick::{TickReport, clamp_frame_dt};
