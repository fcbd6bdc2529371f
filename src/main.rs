//! Headless driver: runs a scenario for a number of frames and prints the
//! diagnostics overlay.
//!
//! ```text
//! starfall [scenario|config.json] [frames]
//! RUST_LOG=starfall=debug starfall hyperdrive 600
//! ```

use starfall::{FrameClock, Simulation, SimulationConfig};
use std::error::Error;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FRAMES: u64 = 600;
const FIXED_DT: f64 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(arg) if arg.ends_with(".json") || Path::new(&arg).is_file() => SimulationConfig::from_path(&arg)?,
        Some(name) => SimulationConfig::preset(&name)?,
        None => SimulationConfig::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    info!(
        name = %config.name,
        scenario = config.scenario.name(),
        width = config.width,
        height = config.height,
        frames,
        "starting"
    );

    let mut sim = Simulation::from_config(&config)?;
    let mut clock = FrameClock::new();
    clock.set_fixed_delta(Some(FIXED_DT));

    while clock.frame() < frames {
        let dt = clock.tick();
        let report = sim.update(dt);

        if clock.frame() % 60 == 0 {
            info!(
                frame = clock.frame(),
                particles = sim.registry().total_len(),
                spawned = report.spawned,
                destroyed = report.destroyed,
                "progress"
            );
        }
    }

    println!("{}", sim.diagnostics().overlay_text(config.justification));
    Ok(())
}
