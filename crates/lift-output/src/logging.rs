//! `LogObserver`: trip progress as log lines.

use lift_core::{CarId, Floor, Request};
use lift_fleet::TripObserver;
use log::{debug, info, trace, warn};

/// Log target for every line this observer writes.  Filter with
/// `RUST_LOG=lift::trips=info`.
pub const TRIP_LOG_TARGET: &str = "lift::trips";

/// Logs one `info` line per pickup and per delivery, in the form
///
/// ```text
/// [Lift #2, PICKUP, from: 7, request received on floor: 0]
/// [Lift #2, DELIVERY, from: 7, to: 0]
/// ```
///
/// Arrivals go to `debug`, single floor steps to `trace`, and abandoned
/// requests to `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TripObserver for LogObserver {
    fn on_pickup(&mut self, car: CarId, request: &Request, from: Floor) {
        if from == request.current_floor {
            info!(target: TRIP_LOG_TARGET, "[Lift #{}, PICKUP, from: {from}]", car.0);
        } else {
            info!(
                target: TRIP_LOG_TARGET,
                "[Lift #{}, PICKUP, from: {}, request received on floor: {from}]",
                car.0,
                request.current_floor,
            );
        }
    }

    fn on_moved(&mut self, car: CarId, floor: Floor) {
        trace!(target: TRIP_LOG_TARGET, "[Lift #{}, AT, floor: {floor}]", car.0);
    }

    fn on_delivery(&mut self, car: CarId, request: &Request) {
        info!(
            target: TRIP_LOG_TARGET,
            "[Lift #{}, DELIVERY, from: {}, to: {}]",
            car.0,
            request.current_floor,
            request.destination_floor,
        );
    }

    fn on_completed(&mut self, car: CarId, request: &Request) {
        debug!(target: TRIP_LOG_TARGET, "[Lift #{}, ARRIVED, at: {}]", car.0, request.destination_floor);
    }

    fn on_abandoned(&mut self, car: CarId, request: &Request, floor: Floor) {
        warn!(target: TRIP_LOG_TARGET, "[Lift #{}, ABANDONED, {request}, at: {floor}]", car.0);
    }
}
