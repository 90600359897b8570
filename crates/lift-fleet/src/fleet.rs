//! The fleet: a fixed set of cars, their shared board, and lifecycle
//! control.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use lift_channel::ShutdownSignal;
use lift_core::{CarId, Floor, LiftError, LiftResult, Request, TowerConfig};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::board::{Board, BoardState, CarPhase};
use crate::select::choose_car;
use crate::{Assignment, Car, CarSnapshot, CarState, FleetError, FleetResult, TripEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Lifecycle {
    Ready,
    Running,
    Stopped,
}

/// A fixed collection of cars indexed by [`CarId`].
///
/// Every method takes `&self`; share between threads behind an `Arc`.
///
/// # Lifecycle
///
/// `Ready` → [`start_all`](Self::start_all) → `Running` →
/// [`stop_all`](Self::stop_all) → `Stopped`.  Starting twice is a no-op.
/// Stopping twice is a no-op.  Starting after a stop is an error.  Stopping
/// a fleet that never started marks every car exited at once.
pub struct Fleet {
    cars:      Vec<Car>,
    board:     Arc<Board>,
    delay:     Duration,
    shutdown:  ShutdownSignal,
    lifecycle: Mutex<Lifecycle>,
    workers:   Mutex<Vec<(CarId, JoinHandle<LiftResult<()>>)>>,
}

impl Fleet {
    /// `car_count` cars, all at `initial_floor`.
    pub fn new(car_count: usize, initial_floor: Floor, movement_delay: Duration) -> FleetResult<Self> {
        Self::with_floors(&vec![initial_floor; car_count], movement_delay)
    }

    /// One car per entry of `floors`, car `i` starting at `floors[i]`.
    pub fn with_floors(floors: &[Floor], movement_delay: Duration) -> FleetResult<Self> {
        if floors.is_empty() {
            return Err(FleetError::EmptyFleet);
        }
        let cars = (0..floors.len())
            .map(|i| {
                CarId::try_from(i)
                    .map(Car::new)
                    .map_err(|_| LiftError::Config(format!("car index {i} does not fit a car id")))
            })
            .collect::<LiftResult<Vec<_>>>()?;
        Ok(Self {
            cars,
            board: Arc::new(Board::new(floors)),
            delay: movement_delay,
            shutdown: ShutdownSignal::new(),
            lifecycle: Mutex::new(Lifecycle::Ready),
            workers: Mutex::new(Vec::new()),
        })
    }

    pub fn from_config(config: &TowerConfig) -> FleetResult<Self> {
        config.validate()?;
        Self::new(config.car_count, config.initial_floor, config.movement_delay())
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn movement_delay(&self) -> Duration {
        self.delay
    }

    /// Point-in-time copy of one car's state.  `None` for an unknown id.
    pub fn state(&self, car: CarId) -> Option<CarState> {
        self.board.read(|b| b.cars.get(car.index()).cloned())
    }

    /// Point-in-time copy of every car's state, indexed by car id.
    pub fn states(&self) -> Vec<CarState> {
        self.board.read(|b| b.cars.clone())
    }

    /// The consistent view selection works from.
    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.board.read(BoardState::snapshot)
    }

    pub fn floor(&self, car: CarId) -> Option<Floor> {
        self.state(car).map(|s| s.floor)
    }

    pub fn is_free(&self, car: CarId) -> Option<bool> {
        self.state(car).map(|s| s.is_free())
    }

    pub fn request_count(&self, car: CarId) -> Option<usize> {
        self.state(car).map(|s| s.queue_length())
    }

    pub fn last_destination(&self, car: CarId) -> Option<Floor> {
        self.state(car).map(|s| s.last_destination)
    }

    pub fn is_exited(&self, car: CarId) -> Option<bool> {
        self.state(car).map(|s| s.exited)
    }

    /// No unassigned backlog and every car free.
    pub fn is_quiescent(&self) -> bool {
        self.board.read(BoardState::is_quiescent)
    }

    pub fn is_terminated(&self) -> bool {
        self.board.read(BoardState::all_exited)
    }

    /// A car has exited or the dispatcher feeding this fleet has returned.
    pub fn has_stopped_worker(&self) -> bool {
        self.board.read(BoardState::worker_stopped)
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Choose a car for `request` and hand the request to it.
    ///
    /// Snapshot, choice, and bookkeeping happen under one board lock, so
    /// concurrent calls see each other's assignments.  Works before the
    /// fleet has started; requests assigned then wait in the car's inbox.
    ///
    /// Cars that have exited are never chosen.  Fails with
    /// [`FleetError::Stopped`] after [`stop_all`](Self::stop_all) or once
    /// every car has exited; the request is then left untouched.
    pub fn select(&self, request: Request) -> FleetResult<Assignment> {
        // Held throughout so `stop_all` cannot slip in between.
        let lifecycle = self.lifecycle.lock();
        if *lifecycle == Lifecycle::Stopped {
            return Err(FleetError::Stopped);
        }
        let mut board = self.board.lock();
        let live: Vec<_> = board
            .snapshot()
            .into_iter()
            .filter(|c| !board.cars[c.id.index()].exited)
            .collect();
        let assignment = choose_car(&live, request.current_floor).ok_or(FleetError::Stopped)?;
        board.backlog = board.backlog.saturating_sub(1);
        self.cars[assignment.car.index()].inbox().add(request)?;
        let car = board.car_mut(assignment.car);
        car.pending += 1;
        car.last_destination = request.destination_floor;
        drop(board);
        drop(lifecycle);
        self.board.notify();

        debug!("{request} → {} ({:?})", assignment.car, assignment.rule);
        Ok(assignment)
    }

    // ── Backlog ───────────────────────────────────────────────────────────

    /// Count one request accepted upstream but not yet selected.
    pub(crate) fn note_submitted(&self) {
        self.board.adjust_backlog(|n| n + 1);
    }

    /// Undo [`note_submitted`](Self::note_submitted) for a request that will
    /// never reach [`select`](Self::select).
    pub(crate) fn note_withdrawn(&self) {
        self.board.adjust_backlog(|n| n.saturating_sub(1));
    }

    /// The dispatcher feeding this fleet has returned.  Wakes every waiter.
    pub(crate) fn note_dispatcher_exit(&self) {
        self.board.lock().dispatcher_stopped = true;
        self.board.notify();
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Spawn one worker thread per car.  Trip events go to `events`.
    ///
    /// Idempotent while running.  Fails with [`FleetError::Stopped`] after
    /// [`stop_all`](Self::stop_all).  If a spawn fails, the cars already
    /// started are stopped and the fleet ends up stopped.
    pub fn start_all(&self, events: &Sender<TripEvent>) -> FleetResult<()> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running => return Ok(()),
            Lifecycle::Stopped => return Err(FleetError::Stopped),
            Lifecycle::Ready => {}
        }

        let mut workers = self.workers.lock();
        for car in &self.cars {
            let worker = car.worker(
                Arc::clone(&self.board),
                self.delay,
                self.shutdown.listener(),
                events.clone(),
            );
            match worker.spawn() {
                Ok(handle) => workers.push((car.id(), handle)),
                Err(e) => {
                    warn!("failed to spawn {}: {e}", car.id());
                    self.shutdown.trigger();
                    self.mark_exited(car.id().index()..self.cars.len());
                    *lifecycle = Lifecycle::Stopped;
                    return Err(FleetError::Spawn(e));
                }
            }
        }

        *lifecycle = Lifecycle::Running;
        info!("fleet started: {} cars", self.cars.len());
        Ok(())
    }

    /// Signal every car to stop.  Returns immediately; pair with
    /// [`await_termination`](Self::await_termination).
    ///
    /// Returns `true` only for the call that actually stopped the fleet.
    pub fn stop_all(&self) -> bool {
        let mut lifecycle = self.lifecycle.lock();
        let was = *lifecycle;
        self.shutdown.trigger();
        *lifecycle = Lifecycle::Stopped;
        match was {
            Lifecycle::Ready => {
                // No worker will ever run to mark these.
                self.mark_exited(0..self.cars.len());
                info!("fleet stopped before start");
                true
            }
            Lifecycle::Running => {
                info!("fleet stopping");
                true
            }
            Lifecycle::Stopped => false,
        }
    }

    fn mark_exited(&self, range: std::ops::Range<usize>) {
        {
            let mut board = self.board.lock();
            for car in &mut board.cars[range] {
                car.phase = CarPhase::Exited;
                car.exited = true;
            }
        }
        self.board.notify();
    }

    /// Block until no request is pending anywhere and every car is free.
    ///
    /// Returns immediately for an idle fleet, started or not.
    pub fn await_quiescence(&self) {
        self.board.wait_until(BoardState::is_quiescent);
    }

    /// As [`await_quiescence`](Self::await_quiescence), giving up after
    /// `timeout`.  Returns whether the fleet was quiescent on exit.
    pub fn await_quiescence_timeout(&self, timeout: Duration) -> bool {
        self.board.wait_until_for(timeout, BoardState::is_quiescent)
    }

    /// Block until the fleet is quiescent or some worker has stopped.
    /// Returns whether it is quiescent.
    pub fn await_quiescence_or_stop(&self) -> bool {
        self.board.wait_until(|b| b.is_quiescent() || b.worker_stopped());
        self.is_quiescent()
    }

    /// Block until every car has exited, then join the worker threads.
    ///
    /// Blocks forever if nothing ever calls [`stop_all`](Self::stop_all).
    /// Returns the first worker fault, if any.
    pub fn await_termination(&self) -> FleetResult<()> {
        self.board.wait_until(BoardState::all_exited);
        self.join_workers()
    }

    /// As [`await_termination`](Self::await_termination), giving up after
    /// `timeout`.  `Ok(false)` means some car is still running.
    pub fn await_termination_timeout(&self, timeout: Duration) -> FleetResult<bool> {
        if !self.board.wait_until_for(timeout, BoardState::all_exited) {
            return Ok(false);
        }
        self.join_workers()?;
        Ok(true)
    }

    fn join_workers(&self) -> FleetResult<()> {
        let workers = std::mem::take(&mut *self.workers.lock());
        let mut first_failure = None;
        for (car, handle) in workers {
            let failure = match handle.join() {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => FleetError::Worker { car, source },
                Err(_) => FleetError::Panicked(format!("car-{}", car.0)),
            };
            first_failure.get_or_insert(failure);
        }
        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Remove whatever is left in the car inboxes after termination, as
    /// abandoned-trip events at each car's final floor.
    ///
    /// Non-empty only for a fleet stopped before start that already held
    /// assignments, or a car that died without draining its inbox.
    pub(crate) fn sweep_inboxes(&self) -> Vec<TripEvent> {
        let mut swept = Vec::new();
        {
            let mut board = self.board.lock();
            for car in &self.cars {
                let stranded = car.inbox().drain();
                if stranded.is_empty() {
                    continue;
                }
                let state = board.car_mut(car.id());
                state.pending = state.pending.saturating_sub(stranded.len());
                let floor = state.floor;
                swept.extend(stranded.into_iter().map(|request| TripEvent::Abandoned {
                    car: car.id(),
                    request,
                    floor,
                }));
            }
        }
        if !swept.is_empty() {
            self.board.notify();
        }
        swept
    }
}

impl std::fmt::Debug for Fleet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fleet")
            .field("cars", &self.cars.len())
            .field("lifecycle", &*self.lifecycle.lock())
            .finish()
    }
}
