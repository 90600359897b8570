//! `Simulation`: one complete run of an elevator bank.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lift_channel::ShutdownSignal;
use lift_core::TowerConfig;
use lift_fleet::Tower;
use log::{info, warn};

use crate::{RequestSource, Requester, SimError, SimResult};

/// Totals for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimReport {
    pub submitted:        usize,
    pub dispatched:       u64,
    pub trips_completed:  u64,
    pub floors_travelled: u64,
    /// Submitted requests no car ever received.
    pub stranded:         usize,
    pub elapsed:          Duration,
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submitted, {} dispatched, {} trips completed, {} floors travelled in {:.2?}",
            self.submitted, self.dispatched, self.trips_completed, self.floors_travelled, self.elapsed
        )?;
        if self.stranded > 0 {
            write!(f, ", {} stranded", self.stranded)?;
        }
        Ok(())
    }
}

/// A built simulation.  Construct with [`SimBuilder`](crate::SimBuilder).
pub struct Simulation {
    config:    TowerConfig,
    tower:     Arc<Tower>,
    source:    Box<dyn RequestSource>,
    requester: Arc<ShutdownSignal>,
}

impl Simulation {
    pub(crate) fn new(config: TowerConfig, tower: Tower, source: Box<dyn RequestSource>) -> Self {
        Self { config, tower: Arc::new(tower), source, requester: Arc::new(ShutdownSignal::new()) }
    }

    pub fn config(&self) -> &TowerConfig {
        &self.config
    }

    pub fn tower(&self) -> &Tower {
        &self.tower
    }

    /// Trigger from any thread to end request production early.  The run
    /// then drains what was already submitted and finishes normally.
    pub fn producer_stop(&self) -> Arc<ShutdownSignal> {
        Arc::clone(&self.requester)
    }

    /// Run to completion:
    ///
    /// 1. start the bank and the requester,
    /// 2. wait for the requester to exhaust its source,
    /// 3. wait for quiescence, or for a worker to stop early,
    /// 4. shut down and wait for every thread to finish.
    pub fn run(self) -> SimResult<SimReport> {
        let Self { config, tower, source, requester } = self;
        let started = Instant::now();
        info!(
            "simulation starting: {} cars over floors 0..={}, one request every {} ms, {} ms per floor",
            config.car_count,
            config.top_floor,
            config.request_period_ms,
            config.movement_delay_ms,
        );

        tower.start()?;

        let producer = match Requester::spawn(
            Arc::clone(&tower),
            source,
            config.request_period(),
            requester.listener(),
        ) {
            Ok(producer) => producer,
            Err(e) => return Err(abort(&tower, e)),
        };
        let submitted = match producer.join() {
            Ok(n) => n,
            Err(e) => return Err(abort(&tower, e)),
        };

        if !tower.await_quiescence_or_failure() {
            warn!("a worker stopped early; shutting down without reaching quiescence");
        }

        let stranded = tower.shutdown().len();
        let dispatched = tower.await_termination()?;

        let states = tower.fleet().states();
        let report = SimReport {
            submitted,
            dispatched,
            trips_completed: states.iter().map(|s| s.trips_completed).sum(),
            floors_travelled: states.iter().map(|s| s.floors_travelled).sum(),
            stranded,
            elapsed: started.elapsed(),
        };
        info!("simulation over: {report}");
        Ok(report)
    }
}

/// Tear the bank down after a failure outside it.  The triggering error wins
/// over anything termination reports.
fn abort(tower: &Tower, error: SimError) -> SimError {
    warn!("aborting simulation: {error}");
    tower.shutdown();
    if let Err(e) = tower.await_termination() {
        warn!("while aborting: {e}");
    }
    error
}
