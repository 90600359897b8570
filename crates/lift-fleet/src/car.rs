//! Car handle and the per-car worker thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use lift_channel::{RequestChannel, ShutdownListener};
use lift_core::{CarId, Direction, Floor, LiftError, LiftResult, Request};
use log::{debug, error, trace, warn};

use crate::board::{Board, CarPhase};
use crate::TripEvent;

// ── Car ───────────────────────────────────────────────────────────────────────

/// One car of the fleet: an id and a private inbox.
///
/// State lives on the fleet's board, not here.  Only the fleet's selection
/// step adds to the inbox and only the car's own worker takes from it.
pub struct Car {
    id:    CarId,
    inbox: Arc<RequestChannel>,
}

impl Car {
    pub(crate) fn new(id: CarId) -> Self {
        Self { id, inbox: Arc::new(RequestChannel::new()) }
    }

    #[inline]
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Requests assigned but not yet taken.  Racy by nature.
    pub fn queued(&self) -> usize {
        self.inbox.len()
    }

    pub(crate) fn inbox(&self) -> &RequestChannel {
        &self.inbox
    }

    pub(crate) fn worker(
        &self,
        board: Arc<Board>,
        delay: Duration,
        shutdown: ShutdownListener,
        events: Sender<TripEvent>,
    ) -> CarWorker {
        CarWorker { id: self.id, inbox: Arc::clone(&self.inbox), board, delay, shutdown, events }
    }
}

// ── CarWorker ─────────────────────────────────────────────────────────────────

/// Everything a car thread owns.
pub(crate) struct CarWorker {
    id:       CarId,
    inbox:    Arc<RequestChannel>,
    board:    Arc<Board>,
    delay:    Duration,
    shutdown: ShutdownListener,
    events:   Sender<TripEvent>,
}

impl CarWorker {
    pub fn spawn(self) -> std::io::Result<JoinHandle<LiftResult<()>>> {
        thread::Builder::new()
            .name(format!("car-{}", self.id.0))
            .spawn(move || self.run())
    }

    fn run(self) -> LiftResult<()> {
        let _exit = ExitGuard { board: Arc::clone(&self.board), car: self.id };
        let reason = self.serve();
        self.abandon_queued();
        if reason.is_cancelled() {
            debug!("{} exiting", self.id);
            Ok(())
        } else {
            error!("{} stopped on fault: {reason}", self.id);
            Err(reason)
        }
    }

    /// Take and execute requests until something stops the loop.  Returns
    /// the reason it stopped.
    fn serve(&self) -> LiftError {
        loop {
            let request = match self.inbox.take(&self.shutdown) {
                Ok(request) => request,
                Err(reason) => return reason,
            };
            if let Err(reason) = self.execute(request) {
                return reason;
            }
        }
    }

    fn execute(&self, request: Request) -> LiftResult<()> {
        let from = self.board.update(self.id, |car| {
            car.pending = car.pending.saturating_sub(1);
            car.busy = true;
            car.phase = CarPhase::ToPickup;
            car.floor
        });
        debug!("{} accepted {request} at floor {from}", self.id);
        self.emit(TripEvent::Pickup { car: self.id, request, from });

        let at = self.travel(request, from, request.current_floor)?;

        self.board.update(self.id, |car| car.phase = CarPhase::ToDestination);
        self.emit(TripEvent::Delivery { car: self.id, request });

        self.travel(request, at, request.destination_floor)?;

        self.board.update(self.id, |car| {
            car.busy = false;
            car.phase = CarPhase::Idle;
            car.trips_completed += 1;
        });
        self.emit(TripEvent::Completed { car: self.id, request });
        Ok(())
    }

    /// Walk from `from` to `to` one floor at a time.
    ///
    /// Cancellation is checked before every step, so a shutdown lets the
    /// current step finish and then stops the car where it stands.  The
    /// in-flight request is reported as abandoned.
    fn travel(&self, request: Request, from: Floor, to: Floor) -> LiftResult<Floor> {
        let mut floor = from;
        while floor != to {
            if self.shutdown.is_cancelled() {
                warn!("{} abandoned {request} at floor {floor}", self.id);
                self.emit(TripEvent::Abandoned { car: self.id, request, floor });
                return Err(LiftError::Cancelled);
            }
            let direction = Direction::between(floor, to)?;
            thread::sleep(self.delay);
            floor += direction.step();
            self.board.step(self.id, floor);
            trace!("{} at floor {floor}", self.id);
            self.emit(TripEvent::Moved { car: self.id, floor });
        }
        Ok(floor)
    }

    /// Report everything still queued in the inbox as abandoned.
    fn abandon_queued(&self) {
        let stranded = self.inbox.drain();
        if stranded.is_empty() {
            return;
        }
        let floor = self.board.update(self.id, |car| {
            car.pending = car.pending.saturating_sub(stranded.len());
            car.floor
        });
        for request in stranded {
            warn!("{} abandoned queued {request}", self.id);
            self.emit(TripEvent::Abandoned { car: self.id, request, floor });
        }
    }

    fn emit(&self, event: TripEvent) {
        // A closed receiver means nobody is listening.
        let _ = self.events.send(event);
    }
}

// ── ExitGuard ─────────────────────────────────────────────────────────────────

/// Marks the car exited when the worker returns or unwinds.
struct ExitGuard {
    board: Arc<Board>,
    car:   CarId,
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.board.update(self.car, |car| {
            car.busy = false;
            car.phase = CarPhase::Exited;
            car.exited = true;
        });
    }
}
