//! Headless free-fall run.
//!
//! Drives a complete drop on a synthetic 60 Hz clock and prints a JSON
//! summary of the run. Parameters come from an optional JSON file:
//!
//! ```text
//! freefall-app [params.json]
//! ```

use std::time::{Duration, Instant};

use dynamics::terminal_velocity;
use runner::SimulationRunner;
use simcore::{RunStatus, SimParams};

use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Simulated-time cap so drag-free or zero-gravity drops still terminate.
const MAX_SIM_TIME: f64 = 600.0;

#[derive(Debug, Serialize)]
struct RunSummary {
    params: SimParams,
    final_status: RunStatus,
    fall_time: f64,
    impact_velocity: f64,
    terminal_velocity: Option<f64>,
    samples: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let params = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        }
        None => SimParams::default(),
    };

    let mut sim = SimulationRunner::new(params)?;
    log::info!(
        "dropping {} kg from {} m (g = {} m/s²)",
        params.mass,
        params.initial_height,
        params.gravity
    );

    // Synthetic clock; the run does not need to happen in real time.
    let frame = Duration::from_micros(16_667);
    let mut now = Instant::now();
    sim.start(now);
    while sim.status() == RunStatus::Running && sim.state().time < MAX_SIM_TIME {
        now += frame;
        sim.tick(now);
    }

    if sim.status() == RunStatus::Running {
        log::warn!("still airborne after {MAX_SIM_TIME} s of simulated time, giving up");
    }

    let state = sim.state();
    let vt = terminal_velocity(sim.params());
    let summary = RunSummary {
        params: *sim.params(),
        final_status: sim.status(),
        fall_time: state.time,
        impact_velocity: state.velocity,
        terminal_velocity: vt.is_finite().then_some(vt),
        samples: sim.samples().len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
