use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),

    #[error("theta must be finite and non-negative, got {0}")]
    InvalidTheta(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The body collection could not be allocated.
    #[error("could not allocate {bodies} bodies")]
    Allocation {
        bodies: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("could not read scenario file")]
    Io(#[from] std::io::Error),

    #[error("could not parse scenario")]
    Yaml(#[from] serde_yaml::Error),
}
