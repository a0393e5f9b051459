//! Platform abstraction layer
//!
//! The browser page owns rendering, input, audio and storage. It drives the
//! simulation through `WasmShift` and receives every report as JSON.

use serde::Serialize;

/// Serialize a report for the host page ("{}" if serialization fails)
pub fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to serialize report: {}", e);
            "{}".to_string()
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use super::to_json;
    use crate::sim::{Difficulty, Lane, MatchController};

    /// One browser-hosted shift
    #[wasm_bindgen]
    pub struct WasmShift {
        controller: MatchController,
    }

    #[wasm_bindgen]
    impl WasmShift {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WasmShift {
            WasmShift {
                controller: MatchController::with_random_seed(),
            }
        }

        /// Start a shift ("easy" | "normal" | "hard"; anything else plays normal)
        pub fn start(&mut self, difficulty: &str) {
            let difficulty = Difficulty::from_name(difficulty).unwrap_or_default();
            self.controller.start(difficulty);
        }

        pub fn set_difficulty(&mut self, difficulty: &str) {
            if let Some(difficulty) = Difficulty::from_name(difficulty) {
                self.controller.set_difficulty(difficulty);
            }
        }

        /// Best score read from the page's storage
        pub fn set_best_score(&mut self, score: f64) {
            self.controller.set_best_score(score.round() as i64);
        }

        pub fn tick(&mut self, dt: f32) -> String {
            to_json(&self.controller.tick(dt))
        }

        pub fn resolve(&mut self, container_id: u32, lane: &str) -> String {
            let Some(lane) = Lane::from_name(lane) else {
                return "{}".to_string();
            };
            match self.controller.resolve(container_id, lane) {
                Ok(report) => to_json(&report),
                Err(e) => {
                    log::debug!("Drop ignored: {}", e);
                    "{}".to_string()
                }
            }
        }

        pub fn resolve_oldest(&mut self, lane: &str) -> String {
            let Some(lane) = Lane::from_name(lane) else {
                return "{}".to_string();
            };
            match self.controller.resolve_oldest(lane) {
                Ok(report) => to_json(&report),
                Err(e) => {
                    log::debug!("Drop ignored: {}", e);
                    "{}".to_string()
                }
            }
        }

        pub fn snapshot(&self) -> String {
            to_json(&self.controller.snapshot())
        }
    }

    impl Default for WasmShift {
        fn default() -> Self {
            Self::new()
        }
    }

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }
        log::info!("Tariff Panic core loaded");
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::WasmShift;
