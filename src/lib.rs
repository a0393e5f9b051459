//! Tariff Panic - A port-terminal routing arcade game
//!
//! Core modules:
//! - `sim`: Match simulation (spawning, urgency decay, events, drop resolution)
//! - `record`: Best-score sentinel comparison
//! - `settings`: Data-driven match configuration
//! - `platform`: Browser binding (wasm32 only)

pub mod error;
pub mod platform;
pub mod record;
pub mod settings;
pub mod sim;

pub use error::{DropError, SettingsError};
pub use record::BestScore;
pub use settings::Settings;
pub use sim::{Difficulty, Lane, MatchController};

/// Game configuration constants
pub mod consts {
    /// Length of a shift in seconds
    pub const GAME_LENGTH: f32 = 90.0;
    /// Strikes that end the shift
    pub const MAX_STRIKES: u32 = 3;
    /// Largest frame delta the simulation will accept (protects against tab-backgrounding)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Spawn interval before any difficulty scaling kicks in
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.4;
    /// Elapsed time before Machinery joins the spawn pool
    pub const MACHINERY_UNLOCK_SECS: f32 = 15.0;

    /// Container left to expire
    pub const EXPIRY_SCORE_PENALTY: i64 = -8;
    /// Oldest container pushed off a full queue
    pub const OVERFLOW_SCORE_PENALTY: i64 = -12;

    /// Flat credit for using the Hold lane
    pub const HOLD_POINTS: i64 = 5;
    /// Penalty for routing to the wrong lane
    pub const WRONG_LANE_PENALTY: i64 = -10;
    /// Credit restored when an event forces a wrong drop to count as correct
    pub const FORCED_CORRECT_BONUS: i64 = 10;

    /// Correct drops per combo step
    pub const COMBO_STEP: u32 = 3;
    /// Multiplier added per combo step
    pub const COMBO_STEP_BONUS: f64 = 0.25;
    /// Maximum number of combo steps (2.0x cap)
    pub const COMBO_MAX_STEPS: u32 = 4;

    /// Event duration range (seconds)
    pub const EVENT_DURATION: (f32, f32) = (10.0, 14.0);
    /// Gap before the first event of a shift (seconds, scaled by difficulty)
    pub const FIRST_EVENT_GAP: (f32, f32) = (18.0, 24.0);
    /// Gap between events (seconds, scaled by difficulty)
    pub const EVENT_GAP: (f32, f32) = (16.0, 22.0);
    /// Urgency drain multiplier while Inspection Backlog is active
    pub const BACKLOG_DRAIN: f32 = 1.25;
}

/// Round half toward positive infinity, the way score bonuses have always been rounded
#[inline]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
