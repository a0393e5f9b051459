//! Container types, lanes and the live container entity

use serde::{Deserialize, Serialize};

/// Routing destination for a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Domestic,
    Import,
    /// Fallback lane: small flat credit, never counts as correct
    Hold,
}

impl Lane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Domestic => "Domestic",
            Lane::Import => "Import",
            Lane::Hold => "Hold",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "domestic" => Some(Lane::Domestic),
            "import" => Some(Lane::Import),
            "hold" => Some(Lane::Hold),
            _ => None,
        }
    }

    /// Keyboard shortcut mapping (1/2/3)
    pub fn from_hotkey(key: char) -> Option<Self> {
        match key {
            '1' => Some(Lane::Domestic),
            '2' => Some(Lane::Import),
            '3' => Some(Lane::Hold),
            _ => None,
        }
    }
}

/// Container catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    Electronics,
    Food,
    Machinery,
}

impl ContainerKind {
    /// Kinds available at the start of a shift
    pub const EARLY_POOL: [ContainerKind; 2] = [ContainerKind::Food, ContainerKind::Electronics];
    /// Kinds available once Machinery unlocks
    pub const FULL_POOL: [ContainerKind; 3] = [
        ContainerKind::Food,
        ContainerKind::Electronics,
        ContainerKind::Machinery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Electronics => "Electronics",
            ContainerKind::Food => "Food",
            ContainerKind::Machinery => "Machinery",
        }
    }

    /// Points for a correct drop
    pub fn base_value(&self) -> i64 {
        match self {
            ContainerKind::Electronics => 20,
            ContainerKind::Food => 15,
            ContainerKind::Machinery => 25,
        }
    }

    /// Seconds before a fresh container expires (at 1x drain)
    pub fn urgency_max(&self) -> f32 {
        match self {
            ContainerKind::Electronics => 10.0,
            ContainerKind::Food => 8.0,
            ContainerKind::Machinery => 12.0,
        }
    }

    pub fn default_lane(&self) -> Lane {
        match self {
            ContainerKind::Electronics => Lane::Import,
            ContainerKind::Food => Lane::Domestic,
            ContainerKind::Machinery => Lane::Import,
        }
    }
}

/// Display band for the urgency bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UrgencyLevel {
    Fresh,
    Mid,
    Low,
}

impl UrgencyLevel {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio <= 0.25 {
            UrgencyLevel::Low
        } else if ratio <= 0.55 {
            UrgencyLevel::Mid
        } else {
            UrgencyLevel::Fresh
        }
    }
}

/// A container waiting in the queue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub id: u32,
    pub kind: ContainerKind,
    /// Seconds until expiry (decreasing)
    pub urgency_left: f32,
}

impl Container {
    pub fn new(id: u32, kind: ContainerKind) -> Self {
        debug_assert!(kind.urgency_max() > 0.0, "catalog urgency must be positive");
        Self {
            id,
            kind,
            urgency_left: kind.urgency_max(),
        }
    }

    pub fn base_value(&self) -> i64 {
        self.kind.base_value()
    }

    pub fn default_lane(&self) -> Lane {
        self.kind.default_lane()
    }

    pub fn urgency_max(&self) -> f32 {
        self.kind.urgency_max()
    }

    /// Remaining urgency in [0, 1]
    pub fn urgency_ratio(&self) -> f32 {
        (self.urgency_left / self.urgency_max()).clamp(0.0, 1.0)
    }

    pub fn urgency_level(&self) -> UrgencyLevel {
        UrgencyLevel::from_ratio(self.urgency_ratio())
    }

    pub fn is_expired(&self) -> bool {
        self.urgency_left <= 0.0
    }
}
