use lift_core::{CarId, LiftError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("a fleet needs at least one car")]
    EmptyFleet,

    #[error("fleet has already been shut down")]
    Stopped,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{car} stopped on a fault: {source}")]
    Worker {
        car:    CarId,
        #[source]
        source: LiftError,
    },

    #[error("worker thread {0} panicked")]
    Panicked(String),

    #[error(transparent)]
    Lift(#[from] LiftError),
}

pub type FleetResult<T> = Result<T, FleetError>;
