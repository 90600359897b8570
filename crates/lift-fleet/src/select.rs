//! Car selection.
//!
//! Two rules, applied in order:
//!
//! 1. **Closest free**: among cars with nothing queued and nothing in
//!    flight, the one whose current floor is nearest the pickup floor.
//! 2. **Least busy**: if no car is free, the one with the shortest queue;
//!    ties go to the car whose last assigned destination is nearest the
//!    pickup floor.
//!
//! Any remaining tie goes to the lowest car id.
//!
//! These functions are pure: they see a snapshot, never the live board.
//! [`Fleet::select`](crate::Fleet::select) takes the snapshot and records
//! the result under one lock.

use lift_core::{CarId, Floor};

use crate::CarSnapshot;

/// Which rule produced an [`Assignment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionRule {
    ClosestFree,
    LeastBusy,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub car:  CarId,
    pub rule: SelectionRule,
}

/// Pick a car for a request picked up at `pickup`.  `None` only for an
/// empty snapshot.
pub fn choose_car(cars: &[CarSnapshot], pickup: Floor) -> Option<Assignment> {
    closest_free(cars, pickup)
        .map(|car| Assignment { car, rule: SelectionRule::ClosestFree })
        .or_else(|| {
            least_busy(cars, pickup).map(|car| Assignment { car, rule: SelectionRule::LeastBusy })
        })
}

pub fn closest_free(cars: &[CarSnapshot], pickup: Floor) -> Option<CarId> {
    cars.iter()
        .filter(|c| c.free)
        .min_by_key(|c| (c.floor.abs_diff(pickup), c.id))
        .map(|c| c.id)
}

pub fn least_busy(cars: &[CarSnapshot], pickup: Floor) -> Option<CarId> {
    cars.iter()
        .min_by_key(|c| (c.queue_length, c.last_destination.abs_diff(pickup), c.id))
        .map(|c| c.id)
}
