use lift_core::LiftError;
use lift_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error("failed to spawn requester thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("requester thread panicked")]
    RequesterPanicked,
}

pub type SimResult<T> = Result<T, SimError>;
