//! `lift-sim`: drives a [`Tower`](lift_fleet::Tower) through one run.
//!
//! # Run order
//!
//! ```text
//!   ① announce  : log the configuration
//!   ② start     : event pump, cars, dispatcher
//!   ③ produce   : `requester` thread submits one request per period,
//!                  the first immediately, until the source is exhausted
//!   ④ drain     : wait for quiescence (no backlog, every car free)
//!   ⑤ shut down : dispatcher first, then cars; join everything
//!   ⑥ report    : SimReport
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::TowerConfig;
//! use lift_sim::SimBuilder;
//!
//! let report = SimBuilder::new(TowerConfig::default()).build()?.run()?;
//! println!("{report}");
//! ```

pub mod builder;
pub mod error;
pub mod requester;
pub mod sim;
pub mod source;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use requester::{submit_at_fixed_rate, Requester};
pub use sim::{SimReport, Simulation};
pub use source::{RandomRequests, RequestSource, ScriptedRequests};
