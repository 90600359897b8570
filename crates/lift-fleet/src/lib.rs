//! `lift-fleet`: the concurrent dispatch core.
//!
//! # Threads
//!
//! ```text
//! producer ──submit──▶ system RequestChannel
//!                            │
//!                      [dispatcher]  take → Fleet::select
//!                            │
//!              ┌─────────────┼─────────────┐
//!              ▼             ▼             ▼
//!          car-0 inbox   car-1 inbox   car-N inbox
//!              │             │             │
//!          [car-0]       [car-1]       [car-N]    trip loop, one floor per delay
//!              └──────── TripEvent ───────┘
//!                            │
//!                      [trip-events]  → TripObserver
//! ```
//!
//! Every car publishes its state on one shared board (a mutex plus a
//! condition variable).  Selection reads a consistent snapshot of the board
//! and records the assignment under the same lock, so two selections can
//! never both claim the same free car.  `await_quiescence` and
//! `await_termination` sleep on the board's condition variable.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{Request, TowerConfig};
//! use lift_fleet::Tower;
//!
//! let tower = Tower::new(&TowerConfig::default())?;
//! tower.start()?;
//! tower.submit(Request::up_from_ground(12))?;
//! tower.await_quiescence();
//! tower.shutdown();
//! tower.await_termination()?;
//! ```

pub mod board;
pub mod car;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod fleet;
pub mod select;
pub mod tower;


pub use board::{CarPhase, CarSnapshot, CarState};
pub use car::Car;
pub use dispatcher::Dispatcher;
pub use error::{FleetError, FleetResult};
pub use event::{FanoutObserver, NoopObserver, TripEvent, TripObserver};
pub use fleet::Fleet;
pub use select::{choose_car, Assignment, SelectionRule};
pub use tower::Tower;
