//! Shared car-state board.
//!
//! One mutex guards the state of every car plus the fleet backlog; one
//! condition variable is notified whenever a change could flip
//! [`BoardState::is_quiescent`], [`BoardState::all_exited`] or
//! [`BoardState::worker_stopped`].  Floor steps
//! do not notify.

use std::time::{Duration, Instant};

use lift_core::{CarId, Floor};
use parking_lot::{Condvar, Mutex, MutexGuard};

// ── CarPhase ──────────────────────────────────────────────────────────────────

/// What a car is doing right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CarPhase {
    /// Waiting on its inbox.
    Idle,
    /// Travelling to the pickup floor of the in-flight request.
    ToPickup,
    /// Travelling to the destination floor of the in-flight request.
    ToDestination,
    /// Worker thread has returned.  Terminal.
    Exited,
}

// ── CarState ──────────────────────────────────────────────────────────────────

/// Published state of one car.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarState {
    pub floor:            Floor,
    /// A request has been taken from the inbox and its trip is not done.
    pub busy:             bool,
    /// Requests assigned to the car but not yet taken from its inbox.
    pub pending:          usize,
    /// Destination of the most recently assigned request, or the starting
    /// floor if nothing has been assigned yet.
    pub last_destination: Floor,
    pub phase:            CarPhase,
    pub exited:           bool,
    pub trips_completed:  u64,
    pub floors_travelled: u64,
}

impl CarState {
    pub fn new(floor: Floor) -> Self {
        Self {
            floor,
            busy: false,
            pending: 0,
            last_destination: floor,
            phase: CarPhase::Idle,
            exited: false,
            trips_completed: 0,
            floors_travelled: 0,
        }
    }

    /// Nothing queued and nothing in flight.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.pending == 0 && !self.busy
    }

    /// Queued requests plus the in-flight one, if any.
    #[inline]
    pub fn queue_length(&self) -> usize {
        self.pending + usize::from(self.busy)
    }
}

// ── CarSnapshot ───────────────────────────────────────────────────────────────

/// The slice of a car's state that selection looks at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CarSnapshot {
    pub id:               CarId,
    pub floor:            Floor,
    pub free:             bool,
    pub queue_length:     usize,
    pub last_destination: Floor,
}

impl CarSnapshot {
    pub fn of(id: CarId, state: &CarState) -> Self {
        Self {
            id,
            floor:            state.floor,
            free:             state.is_free(),
            queue_length:     state.queue_length(),
            last_destination: state.last_destination,
        }
    }
}

// ── BoardState ────────────────────────────────────────────────────────────────

pub(crate) struct BoardState {
    pub cars:               Vec<CarState>,
    /// Requests submitted to the tower but not yet handed to a car.
    pub backlog:            usize,
    /// The dispatcher thread feeding this board has returned.
    pub dispatcher_stopped: bool,
}

impl BoardState {
    pub fn car_mut(&mut self, car: CarId) -> &mut CarState {
        &mut self.cars[car.index()]
    }

    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.cars
            .iter()
            .zip((0..).map(CarId))
            .map(|(state, id)| CarSnapshot::of(id, state))
            .collect()
    }

    pub fn all_free(&self) -> bool {
        self.cars.iter().all(CarState::is_free)
    }

    pub fn all_exited(&self) -> bool {
        self.cars.iter().all(|c| c.exited)
    }

    pub fn is_quiescent(&self) -> bool {
        self.backlog == 0 && self.all_free()
    }

    /// Some worker has returned, so quiescence may never arrive.
    pub fn worker_stopped(&self) -> bool {
        self.dispatcher_stopped || self.cars.iter().any(|c| c.exited)
    }
}

// ── Board ─────────────────────────────────────────────────────────────────────

pub(crate) struct Board {
    state:   Mutex<BoardState>,
    changed: Condvar,
}

impl Board {
    pub fn new(floors: &[Floor]) -> Self {
        Self {
            state:   Mutex::new(BoardState {
                cars:               floors.iter().copied().map(CarState::new).collect(),
                backlog:            0,
                dispatcher_stopped: false,
            }),
            changed: Condvar::new(),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock()
    }

    pub fn notify(&self) {
        self.changed.notify_all();
    }

    pub fn read<R>(&self, f: impl FnOnce(&BoardState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Mutate one car's state and wake every waiter.
    pub fn update<R>(&self, car: CarId, f: impl FnOnce(&mut CarState) -> R) -> R {
        let out = f(self.state.lock().car_mut(car));
        self.changed.notify_all();
        out
    }

    /// Record a one-floor step.  Does not wake waiters.
    pub fn step(&self, car: CarId, floor: Floor) {
        let mut state = self.state.lock();
        let car = state.car_mut(car);
        car.floor = floor;
        car.floors_travelled += 1;
    }

    pub fn adjust_backlog(&self, f: impl FnOnce(usize) -> usize) {
        {
            let mut state = self.state.lock();
            state.backlog = f(state.backlog);
        }
        self.changed.notify_all();
    }

    /// Block until `done` holds.
    pub fn wait_until(&self, done: impl Fn(&BoardState) -> bool) {
        let mut state = self.state.lock();
        while !done(&state) {
            self.changed.wait(&mut state);
        }
    }

    /// Block until `done` holds or `timeout` elapses.  Returns whether `done`
    /// held on exit.
    pub fn wait_until_for(&self, timeout: Duration, done: impl Fn(&BoardState) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while !done(&state) {
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                return done(&state);
            }
        }
        true
    }
}
