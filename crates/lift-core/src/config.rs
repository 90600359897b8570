//! Simulation configuration.
//!
//! # Time model
//!
//! There is no simulated clock.  Movement costs a fixed wall-clock delay per
//! floor (`movement_delay_ms`), and the producer submits requests on a fixed
//! wall-clock period (`request_period_ms`).  A trip of `n` floors therefore
//! takes roughly `n * movement_delay_ms` milliseconds of real time.

use std::time::Duration;

use crate::{Floor, LiftError, LiftResult};

// ── TowerConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration for one elevator bank.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.  Missing fields fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TowerConfig {
    /// Number of cars in the bank.  Fixed for the lifetime of the run.
    pub car_count: usize,

    /// Highest floor served.  The ground floor is 0.
    pub top_floor: Floor,

    /// Floor every car starts at.
    pub initial_floor: Floor,

    /// Wall-clock cost of moving one floor, in milliseconds.
    pub movement_delay_ms: u64,

    /// Fixed period between two generated requests, in milliseconds.
    pub request_period_ms: u64,

    /// Total requests the producer submits before stopping.
    pub max_requests: usize,

    /// Seed for the random request source.  The same seed always produces
    /// the same request sequence.
    pub seed: u64,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            car_count:         7,
            top_floor:         54,
            initial_floor:     0,
            movement_delay_ms: 250,
            request_period_ms: 500,
            max_requests:      21,
            seed:              42,
        }
    }
}

impl TowerConfig {
    #[inline]
    pub fn movement_delay(&self) -> Duration {
        Duration::from_millis(self.movement_delay_ms)
    }

    #[inline]
    pub fn request_period(&self) -> Duration {
        Duration::from_millis(self.request_period_ms)
    }

    /// `true` if `floor` is inside the served range `0..=top_floor`.
    #[inline]
    pub fn serves(&self, floor: Floor) -> bool {
        (0..=self.top_floor).contains(&floor)
    }

    /// Reject configurations the dispatch core cannot run.
    pub fn validate(&self) -> LiftResult<()> {
        if self.car_count == 0 {
            return Err(LiftError::Config("car_count must be at least 1".into()));
        }
        if u32::try_from(self.car_count).is_err() {
            return Err(LiftError::Config(format!("car_count {} is too large", self.car_count)));
        }
        if self.top_floor < 1 {
            return Err(LiftError::Config(format!(
                "top_floor must be at least 1, got {}",
                self.top_floor
            )));
        }
        if !self.serves(self.initial_floor) {
            return Err(LiftError::Config(format!(
                "initial_floor {} is outside 0..={}",
                self.initial_floor, self.top_floor
            )));
        }
        if self.request_period_ms == 0 {
            return Err(LiftError::Config("request_period_ms must be non-zero".into()));
        }
        Ok(())
    }
}
