//! tower: runs one elevator bank end to end.
//!
//! Seven cars serve floors 0..=54 while a producer submits 21 random rides
//! to or from the ground floor, one every half second.  Every pickup and
//! delivery is logged; `RUST_LOG=debug` adds assignments, `trace` adds every
//! floor step.
//!
//! ```text
//! cargo run -p tower                       # defaults
//! cargo run -p tower -- demos/tower/config.json
//! LIFT_CONFIG=my.json LIFT_OUTPUT_DIR=output/tower cargo run -p tower
//! ```
//!
//! With `LIFT_OUTPUT_DIR` set, `trip_events.csv` and `car_summaries.csv` are
//! written there.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info};

use lift_core::TowerConfig;
use lift_fleet::FanoutObserver;
use lift_output::{CsvTripWriter, LogObserver, RecordStatus, TripRecordObserver};
use lift_sim::SimBuilder;

// ── Configuration ─────────────────────────────────────────────────────────────

/// First CLI argument, else `LIFT_CONFIG`, else built-in defaults.
fn load_config() -> Result<TowerConfig> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("LIFT_CONFIG"))
        .map(PathBuf::from);
    let Some(path) = path else {
        info!("no config file given, using defaults");
        return Ok(TowerConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

fn csv_recorder(dir: &Path, config: &TowerConfig) -> Result<TripRecordObserver<CsvTripWriter>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvTripWriter::new(dir)?;
    Ok(TripRecordObserver::with_start_floors(writer, &vec![config.initial_floor; config.car_count]))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;

    let mut observer = FanoutObserver::new().with(LogObserver);
    let mut output: Option<(PathBuf, RecordStatus)> = None;
    if let Some(dir) = std::env::var_os("LIFT_OUTPUT_DIR").map(PathBuf::from) {
        let recorder = csv_recorder(&dir, &config)?;
        output = Some((dir, recorder.status()));
        observer.push(Box::new(recorder));
    }

    let report = SimBuilder::new(config).observer(observer).build()?.run()?;

    if let Some((dir, status)) = output {
        match status.take_error() {
            Some(e) => error!("trip output error: {e}"),
            None => info!("wrote {} trip events to {}", status.events_written(), dir.display()),
        }
        for row in status.summaries() {
            info!(
                "car {:>2}: {:>3} trips, {:>4} floors, ended at floor {}",
                row.car, row.trips_completed, row.floors_travelled, row.final_floor
            );
        }
    }

    println!("Simulation over!  {report}");
    println!("All threads safely stopped and joined.");
    Ok(())
}
