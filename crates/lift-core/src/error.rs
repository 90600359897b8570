//! Dispatch error type.
//!
//! Sub-crates define their own error enums and wrap `LiftError` as one
//! variant (`FleetError::Lift`, `SimError::Lift`).

use thiserror::Error;

use crate::Floor;

/// Errors surfaced by the request channels and the car trip loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LiftError {
    /// Cooperative shutdown observed while waiting.  Not a failure: the
    /// context that sees it exits cleanly.
    #[error("cancelled by shutdown signal")]
    Cancelled,

    /// The hand-off primitive became unusable while still needed.
    #[error("request queue fault: {0}")]
    QueueFault(String),

    /// A direction was requested for a move that goes nowhere.
    #[error("no movement direction from floor {from} to floor {to}")]
    InvalidMovementDirection { from: Floor, to: Floor },

    #[error("configuration error: {0}")]
    Config(String),
}

impl LiftError {
    /// `true` for the normal shutdown signal, `false` for real faults.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LiftError::Cancelled)
    }
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
