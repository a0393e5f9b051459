//! Best-score record
//!
//! The environment owns persistence; the simulation only compares against the
//! value it was handed and reports when a match beats it.

use serde::{Deserialize, Serialize};

/// Best score sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BestScore {
    pub score: i64,
}

impl BestScore {
    pub fn new(score: i64) -> Self {
        Self { score }
    }

    /// Check if a finished match sets a new record
    pub fn qualifies(&self, score: i64) -> bool {
        score > self.score
    }

    /// Record a finished match; returns true if it set a new record
    pub fn submit(&mut self, score: i64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New best score: {} (was {})", score, self.score);
        self.score = score;
        true
    }
}
