//! Deterministic RNG for request generation.
//!
//! # Determinism strategy
//!
//! The producer owns a single `SmallRng` seeded from `TowerConfig::seed`.
//! Only the producer thread draws from it, so no synchronisation is needed
//! and the same seed always yields the same request sequence regardless of
//! how the cars are scheduled.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG used by request sources.
///
/// The type is `Send` but deliberately not shared: move it into the one
/// thread that generates requests.
pub struct RequestRng(SmallRng);

impl RequestRng {
    pub fn new(seed: u64) -> Self {
        RequestRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
