//! Request sources.

use std::collections::VecDeque;

use lift_core::{Floor, Request, RequestRng, TowerConfig};

/// Produces the requests the requester submits, one at a time.
///
/// Runs on the requester thread.
pub trait RequestSource: Send {
    /// The next request, or `None` once the source is exhausted.
    fn next_request(&mut self) -> Option<Request>;

    /// Requests left, if known.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

// ── RandomRequests ────────────────────────────────────────────────────────────

/// Seeded random traffic between the ground floor and the rest of the
/// building.
///
/// Each request is, with equal probability, a ride up from floor 0 to some
/// floor `n` or a ride down from `n` to floor 0, with `n` uniform in
/// `1..=top_floor`.
pub struct RandomRequests {
    rng:       RequestRng,
    top_floor: Floor,
    remaining: usize,
}

impl RandomRequests {
    pub fn new(seed: u64, top_floor: Floor, count: usize) -> Self {
        Self { rng: RequestRng::new(seed), top_floor: top_floor.max(1), remaining: count }
    }

    pub fn from_config(config: &TowerConfig) -> Self {
        Self::new(config.seed, config.top_floor, config.max_requests)
    }
}

impl RequestSource for RandomRequests {
    fn next_request(&mut self) -> Option<Request> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let floor = self.rng.gen_range(1..=self.top_floor);
        if self.rng.gen_bool(0.5) {
            Some(Request::up_from_ground(floor))
        } else {
            Some(Request::down_to_ground(floor))
        }
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

// ── ScriptedRequests ──────────────────────────────────────────────────────────

/// A fixed list of requests, replayed in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRequests {
    queue: VecDeque<Request>,
}

impl ScriptedRequests {
    pub fn new(requests: impl IntoIterator<Item = Request>) -> Self {
        Self { queue: requests.into_iter().collect() }
    }
}

impl RequestSource for ScriptedRequests {
    fn next_request(&mut self) -> Option<Request> {
        self.queue.pop_front()
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.queue.len())
    }
}
