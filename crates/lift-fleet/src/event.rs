//! Trip events and the observer that receives them.
//!
//! Car threads never call an observer directly.  They send [`TripEvent`]s
//! down an unbounded channel and a dedicated `trip-events` thread replays
//! them onto the observer in arrival order, so a slow observer can never
//! hold up a car.  Events from one car arrive in the order that car
//! produced them; events from different cars interleave freely.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use lift_core::{CarId, Floor, Request};

use crate::{FleetError, FleetResult};

// ── TripEvent ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TripEvent {
    /// Car took `request` from its inbox while standing at `from`.
    Pickup { car: CarId, request: Request, from: Floor },
    /// Car arrived at `floor` after a one-floor step.
    Moved { car: CarId, floor: Floor },
    /// Car reached the pickup floor and sets off for the destination.
    Delivery { car: CarId, request: Request },
    /// Car reached the destination.  The car is free again unless more is
    /// queued.
    Completed { car: CarId, request: Request },
    /// Shutdown caught `request` in flight or still queued; it was never
    /// completed.
    Abandoned { car: CarId, request: Request, floor: Floor },
}

impl TripEvent {
    pub fn car(&self) -> CarId {
        match *self {
            TripEvent::Pickup { car, .. }
            | TripEvent::Moved { car, .. }
            | TripEvent::Delivery { car, .. }
            | TripEvent::Completed { car, .. }
            | TripEvent::Abandoned { car, .. } => car,
        }
    }
}

// ── TripObserver ──────────────────────────────────────────────────────────────

/// Callbacks for trip progress.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Runs on the `trip-events` thread.
///
/// # Example: trip counter
///
/// ```rust,ignore
/// struct Counter(Arc<AtomicUsize>);
///
/// impl TripObserver for Counter {
///     fn on_completed(&mut self, _car: CarId, _request: &Request) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait TripObserver: Send {
    fn on_pickup(&mut self, _car: CarId, _request: &Request, _from: Floor) {}

    fn on_moved(&mut self, _car: CarId, _floor: Floor) {}

    fn on_delivery(&mut self, _car: CarId, _request: &Request) {}

    fn on_completed(&mut self, _car: CarId, _request: &Request) {}

    fn on_abandoned(&mut self, _car: CarId, _request: &Request, _floor: Floor) {}

    /// Called once, after the last event from the last car.
    fn on_finish(&mut self) {}
}

/// A [`TripObserver`] that does nothing.
pub struct NoopObserver;

impl TripObserver for NoopObserver {}

/// Forwards every callback to each inner observer in insertion order.
#[derive(Default)]
pub struct FanoutObserver {
    observers: Vec<Box<dyn TripObserver>>,
}

impl FanoutObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: impl TripObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn push(&mut self, observer: Box<dyn TripObserver>) {
        self.observers.push(observer);
    }
}

impl TripObserver for FanoutObserver {
    fn on_pickup(&mut self, car: CarId, request: &Request, from: Floor) {
        self.observers.iter_mut().for_each(|o| o.on_pickup(car, request, from));
    }

    fn on_moved(&mut self, car: CarId, floor: Floor) {
        self.observers.iter_mut().for_each(|o| o.on_moved(car, floor));
    }

    fn on_delivery(&mut self, car: CarId, request: &Request) {
        self.observers.iter_mut().for_each(|o| o.on_delivery(car, request));
    }

    fn on_completed(&mut self, car: CarId, request: &Request) {
        self.observers.iter_mut().for_each(|o| o.on_completed(car, request));
    }

    fn on_abandoned(&mut self, car: CarId, request: &Request, floor: Floor) {
        self.observers.iter_mut().for_each(|o| o.on_abandoned(car, request, floor));
    }

    fn on_finish(&mut self) {
        self.observers.iter_mut().for_each(|o| o.on_finish());
    }
}

/// Route one event to the matching callback.
pub fn deliver(observer: &mut dyn TripObserver, event: &TripEvent) {
    match event {
        TripEvent::Pickup { car, request, from } => observer.on_pickup(*car, request, *from),
        TripEvent::Moved { car, floor } => observer.on_moved(*car, *floor),
        TripEvent::Delivery { car, request } => observer.on_delivery(*car, request),
        TripEvent::Completed { car, request } => observer.on_completed(*car, request),
        TripEvent::Abandoned { car, request, floor } => observer.on_abandoned(*car, request, *floor),
    }
}

// ── EventPump ─────────────────────────────────────────────────────────────────

/// The `trip-events` thread.  Ends once every sender has been dropped.
pub(crate) struct EventPump {
    handle: JoinHandle<()>,
}

impl EventPump {
    pub fn spawn(events: Receiver<TripEvent>, mut observer: Box<dyn TripObserver>) -> FleetResult<Self> {
        let handle = thread::Builder::new()
            .name("trip-events".into())
            .spawn(move || {
                for event in events.iter() {
                    deliver(observer.as_mut(), &event);
                }
                observer.on_finish();
            })?;
        Ok(Self { handle })
    }

    pub fn join(self) -> FleetResult<()> {
        self.handle
            .join()
            .map_err(|_| FleetError::Panicked("trip-events".into()))
    }
}
