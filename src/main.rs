//! Tariff Panic entry point
//!
//! The browser build is driven from JavaScript through `platform::WasmShift`.
//! Natively this runs one headless shift with a simple autopilot.

#[cfg(not(target_arch = "wasm32"))]
use tariff_panic::{Lane, MatchController, Settings, sim::TickReport};

/// Seconds of match time between autopilot drops
#[cfg(not(target_arch = "wasm32"))]
const AUTOPILOT_REACTION: f32 = 0.8;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tariff Panic (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut controller = match settings.seed {
        Some(seed) => MatchController::new(seed),
        None => MatchController::with_random_seed(),
    };
    controller.set_best_score(settings.best_score);
    controller.start(settings.difficulty);

    let dt = settings.frame_dt();
    let mut since_drop = 0.0;
    loop {
        let report = controller.tick(dt);
        log_tick(&report);
        if let Some(end) = report.ended {
            println!("{}", end.cause.headline());
            println!("{}", end.summary());
            if end.new_best {
                println!("New best score: {}", end.best_score);
            }
            break;
        }

        since_drop += dt;
        if since_drop >= AUTOPILOT_REACTION {
            since_drop = 0.0;
            let next = controller.containers().next().map(|c| c.default_lane());
            if let Some(lane) = next {
                autopilot_drop(&mut controller, lane);
                if !controller.is_running() {
                    break;
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn autopilot_drop(controller: &mut MatchController, lane: Lane) {
    match controller.resolve_oldest(lane) {
        Ok(report) => {
            for message in &report.feedback {
                log::info!("[{:?}] {}", message.tone, message.text);
            }
            if let Some(end) = report.ended {
                println!("{}", end.cause.headline());
                println!("{}", end.summary());
            }
        }
        Err(e) => log::debug!("Autopilot drop ignored: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn log_tick(report: &TickReport) {
    for container in &report.spawned {
        log::debug!("Spawned {} #{}", container.kind.as_str(), container.id);
    }
    for message in &report.feedback {
        log::info!("[{:?}] {}", message.tone, message.text);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::wasm_start, this is just to satisfy the compiler
}
