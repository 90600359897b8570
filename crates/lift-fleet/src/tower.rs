//! `Tower` wires one elevator bank together: system channel, dispatcher,
//! fleet, and the trip-event pump.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};
use lift_channel::{RequestChannel, ShutdownSignal};
use lift_core::{Request, TowerConfig};
use log::{info, warn};
use parking_lot::{Mutex, RwLock};

use crate::event::{deliver, EventPump};
use crate::{Dispatcher, Fleet, FleetError, FleetResult, NoopObserver, TripEvent, TripObserver};

struct Running {
    /// `None` once joined; the outcome is then in `dispatched`.
    dispatcher: Option<Dispatcher>,
    dispatched: Option<FleetResult<u64>>,
    pump:       EventPump,
    /// Keeps the pump alive past the cars so late abandonments still reach
    /// the observer.
    events:     Sender<TripEvent>,
}

impl Running {
    fn join_dispatcher(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            self.dispatched = Some(dispatcher.join());
        }
    }
}

/// Top-level handle.  Every method takes `&self`; producers may call
/// [`submit`](Self::submit) from any thread.
///
/// # Shutdown order
///
/// [`shutdown`](Self::shutdown) closes intake, then waits for the
/// dispatcher to return before stopping the cars, so no request is assigned
/// to a car that is already leaving.  Requests still in the system channel
/// are returned to the caller; requests already assigned are reported to the
/// observer as abandoned.
pub struct Tower {
    requests: Arc<RequestChannel>,
    fleet:    Arc<Fleet>,
    stop:     ShutdownSignal,
    /// Shared by submitters, exclusive for the shutdown trigger.
    intake:   RwLock<()>,
    observer: Mutex<Option<Box<dyn TripObserver>>>,
    running:  Mutex<Option<Running>>,
}

impl Tower {
    pub fn new(config: &TowerConfig) -> FleetResult<Self> {
        Self::with_observer(config, NoopObserver)
    }

    pub fn with_observer(config: &TowerConfig, observer: impl TripObserver + 'static) -> FleetResult<Self> {
        Ok(Self::from_fleet(Fleet::from_config(config)?, Box::new(observer)))
    }

    /// Wrap an already-built fleet, e.g. one with per-car start floors.
    pub fn from_fleet(fleet: Fleet, observer: Box<dyn TripObserver>) -> Self {
        Self {
            requests: Arc::new(RequestChannel::new()),
            fleet:    Arc::new(fleet),
            stop:     ShutdownSignal::new(),
            intake:   RwLock::new(()),
            observer: Mutex::new(Some(observer)),
            running:  Mutex::new(None),
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Requests submitted but not yet taken by the dispatcher.
    pub fn unassigned(&self) -> usize {
        self.requests.len()
    }

    /// Hand a request to the bank.  Never blocks on the cars.
    ///
    /// Accepted before [`start`](Self::start) too; such requests wait in the
    /// system channel.  Fails with [`FleetError::Stopped`] once
    /// [`shutdown`](Self::shutdown) has begun.
    pub fn submit(&self, request: Request) -> FleetResult<()> {
        let _open = self.intake.read();
        if self.stop.is_triggered() {
            return Err(FleetError::Stopped);
        }
        self.fleet.note_submitted();
        if let Err(e) = self.requests.add(request) {
            self.fleet.note_withdrawn();
            return Err(e.into());
        }
        Ok(())
    }

    /// Start the trip-event pump, every car, and the dispatcher.
    ///
    /// Idempotent while running.  Fails with [`FleetError::Stopped`] after
    /// [`shutdown`](Self::shutdown).
    pub fn start(&self) -> FleetResult<()> {
        let mut running = self.running.lock();
        if running.is_some() {
            return Ok(());
        }
        if self.stop.is_triggered() {
            return Err(FleetError::Stopped);
        }

        let observer = self.observer.lock().take().unwrap_or_else(|| Box::new(NoopObserver));
        let (events_tx, events_rx) = unbounded();
        let pump = EventPump::spawn(events_rx, observer)?;
        if let Err(e) = self.fleet.start_all(&events_tx) {
            drop(events_tx);
            pump.join()?;
            return Err(e);
        }

        let dispatcher = match Dispatcher::spawn(
            Arc::clone(&self.requests),
            Arc::clone(&self.fleet),
            self.stop.listener(),
        ) {
            Ok(dispatcher) => dispatcher,
            Err(e) => {
                self.fleet.stop_all();
                return Err(e);
            }
        };

        *running = Some(Running {
            dispatcher: Some(dispatcher),
            dispatched: None,
            pump,
            events: events_tx,
        });
        info!("tower started");
        Ok(())
    }

    /// Close intake, wait for the dispatcher to return, then signal every
    /// car.  Does not wait for the cars; returns the requests that were never
    /// assigned to one.
    ///
    /// Idempotent; later calls return an empty list.
    pub fn shutdown(&self) -> Vec<Request> {
        {
            let _closed = self.intake.write();
            if self.stop.trigger() {
                info!("tower shutting down");
            }
        }
        if let Some(running) = self.running.lock().as_mut() {
            running.join_dispatcher();
        }
        self.fleet.stop_all();
        let stranded = self.requests.drain();
        for request in &stranded {
            warn!("{request} was never assigned a car");
            self.fleet.note_withdrawn();
        }
        stranded
    }

    /// `true` if, before any shutdown, the dispatcher or a car has already
    /// stopped.  Quiescence may then never arrive; shut down and collect
    /// the fault from [`await_termination`](Self::await_termination).
    pub fn has_failed_worker(&self) -> bool {
        !self.stop.is_triggered() && self.fleet.has_stopped_worker()
    }

    pub fn await_quiescence(&self) {
        self.fleet.await_quiescence();
    }

    /// Block until the bank is quiescent or a worker has stopped early.
    /// Returns whether it is quiescent; on `false`, shut down and collect the
    /// fault from [`await_termination`](Self::await_termination).
    pub fn await_quiescence_or_failure(&self) -> bool {
        self.fleet.await_quiescence_or_stop()
    }

    pub fn await_quiescence_timeout(&self, timeout: Duration) -> bool {
        self.fleet.await_quiescence_timeout(timeout)
    }

    /// Block until the dispatcher, every car, and the event pump have
    /// finished.  Returns the number of requests dispatched.
    ///
    /// Blocks until something calls [`shutdown`](Self::shutdown).  Every
    /// thread is joined even if an earlier one failed; the first failure is
    /// returned.
    pub fn await_termination(&self) -> FleetResult<u64> {
        // Join under the lock so a concurrent `shutdown` still sees the
        // dispatcher finish before it stops the cars.
        let running = {
            let mut running = self.running.lock();
            if let Some(r) = running.as_mut() {
                r.join_dispatcher();
            }
            running.take()
        };
        let Some(running) = running else {
            let fleet = self.fleet.await_termination();
            if let Some(mut observer) = self.observer.lock().take() {
                for event in self.fleet.sweep_inboxes() {
                    warn!("{event:?} never reached a running car");
                    deliver(observer.as_mut(), &event);
                }
                observer.on_finish();
            }
            fleet?;
            return Ok(0);
        };

        let fleet = self.fleet.await_termination();
        for event in self.fleet.sweep_inboxes() {
            warn!("{event:?} was left behind by its car");
            // The pump holds the receiver until `events` drops below.
            let _ = running.events.send(event);
        }
        let Running { dispatched, pump, events, .. } = running;
        drop(events);
        let pump = pump.join();

        let dispatched = dispatched.unwrap_or(Ok(0));
        let dispatched = dispatched?;
        fleet?;
        pump?;
        info!("tower terminated after dispatching {dispatched} requests");
        Ok(dispatched)
    }
}

impl Drop for Tower {
    fn drop(&mut self) {
        // Leave no detached thread blocked on a channel.
        self.stop.trigger();
        self.fleet.stop_all();
    }
}
