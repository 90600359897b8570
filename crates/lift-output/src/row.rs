//! Plain data row types written by output backends.

use lift_core::Floor;
use lift_fleet::TripEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripEventKind {
    Pickup,
    Moved,
    Delivery,
    Completed,
    Abandoned,
}

impl TripEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TripEventKind::Pickup => "pickup",
            TripEventKind::Moved => "moved",
            TripEventKind::Delivery => "delivery",
            TripEventKind::Completed => "completed",
            TripEventKind::Abandoned => "abandoned",
        }
    }
}

/// One trip event, flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripEventRow {
    /// Arrival order at the observer, from 0.
    pub seq:               u64,
    pub car:               u32,
    pub kind:              TripEventKind,
    /// Where the car stood when the event happened.
    pub floor:             Floor,
    /// Request floors; `None` for `Moved`.
    pub pickup_floor:      Option<Floor>,
    pub destination_floor: Option<Floor>,
}

impl TripEventRow {
    pub fn from_event(seq: u64, event: &TripEvent) -> Self {
        let (kind, floor, request) = match *event {
            TripEvent::Pickup { request, from, .. } => (TripEventKind::Pickup, from, Some(request)),
            TripEvent::Moved { floor, .. } => (TripEventKind::Moved, floor, None),
            TripEvent::Delivery { request, .. } => {
                (TripEventKind::Delivery, request.current_floor, Some(request))
            }
            TripEvent::Completed { request, .. } => {
                (TripEventKind::Completed, request.destination_floor, Some(request))
            }
            TripEvent::Abandoned { request, floor, .. } => {
                (TripEventKind::Abandoned, floor, Some(request))
            }
        };
        Self {
            seq,
            car: event.car().0,
            kind,
            floor,
            pickup_floor: request.map(|r| r.current_floor),
            destination_floor: request.map(|r| r.destination_floor),
        }
    }
}

/// Per-car totals, written once at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSummaryRow {
    pub car:              u32,
    pub trips_completed:  u64,
    pub trips_abandoned:  u64,
    pub floors_travelled: u64,
    /// Last floor the car was seen at.
    pub final_floor:      Floor,
}

impl CarSummaryRow {
    pub fn new(car: u32, floor: Floor) -> Self {
        Self { car, trips_completed: 0, trips_abandoned: 0, floors_travelled: 0, final_floor: floor }
    }
}
