//! `lift-core`: foundational types for the `lift_bank` elevator simulation.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CarId`                                               |
//! | [`request`]     | `Floor`, `Direction`, `Request`                       |
//! | [`config`]      | `TowerConfig`                                         |
//! | [`rng`]         | `RequestRng` (seeded request generation)              |
//! | [`error`]       | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod request;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TowerConfig;
pub use error::{LiftError, LiftResult};
pub use ids::CarId;
pub use request::{Direction, Floor, Request};
pub use rng::RequestRng;
