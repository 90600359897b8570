//! Fluent builder for constructing a [`Simulation`].

use lift_core::{Floor, TowerConfig};
use lift_fleet::{Fleet, NoopObserver, Tower, TripObserver};

use crate::{RandomRequests, RequestSource, SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                     |
/// |----------------------|---------------------------------------------|
/// | `.source(s)`         | [`RandomRequests::from_config`]             |
/// | `.observer(o)`       | [`NoopObserver`]                            |
/// | `.start_floors(v)`   | every car at `config.initial_floor`         |
///
/// # Example
///
/// ```rust,ignore
/// let report = SimBuilder::new(config)
///     .observer(LogObserver)
///     .build()?
///     .run()?;
/// ```
pub struct SimBuilder {
    config:   TowerConfig,
    source:   Option<Box<dyn RequestSource>>,
    observer: Option<Box<dyn TripObserver>>,
    floors:   Option<Vec<Floor>>,
}

impl SimBuilder {
    pub fn new(config: TowerConfig) -> Self {
        Self { config, source: None, observer: None, floors: None }
    }

    pub fn source(mut self, source: impl RequestSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn observer(mut self, observer: impl TripObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Per-car starting floors (must be length `car_count`, each inside
    /// `0..=top_floor`).
    pub fn start_floors(mut self, floors: Vec<Floor>) -> Self {
        self.floors = Some(floors);
        self
    }

    /// Validate inputs and return a ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        let config = self.config;
        config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let floors = match self.floors {
            Some(floors) => {
                if floors.len() != config.car_count {
                    return Err(SimError::Config(format!(
                        "{} start floors given for {} cars",
                        floors.len(),
                        config.car_count
                    )));
                }
                if let Some(&bad) = floors.iter().find(|&&f| !config.serves(f)) {
                    return Err(SimError::Config(format!(
                        "start floor {bad} is outside 0..={}",
                        config.top_floor
                    )));
                }
                floors
            }
            None => vec![config.initial_floor; config.car_count],
        };

        let fleet = Fleet::with_floors(&floors, config.movement_delay())?;
        let observer = self.observer.unwrap_or_else(|| Box::new(NoopObserver));
        let source = self
            .source
            .unwrap_or_else(|| Box::new(RandomRequests::from_config(&config)));

        Ok(Simulation::new(config, Tower::from_fleet(fleet, observer), source))
    }
}
