//! Error types for the swarm planning crate.

use thiserror::Error;

/// Represents errors that can occur while planning or exporting a drone show.
#[derive(Error, Debug)]
pub enum ShowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported formation type: {0}")]
    UnsupportedFormation(String),

    #[error("unsupported digit for 'number' formation: {0}")]
    UnsupportedDigit(u8),

    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(String),

    #[error("assignment failed: {0} drones vs {1} targets")]
    SizeMismatch(usize, usize),

    #[error("time-scaling exhausted {max_iterations} iterations without reaching dynamic feasibility")]
    DynamicInfeasible { max_iterations: usize },

    #[error("collision resolver exhausted {max_iters} iterations without reaching separation")]
    CollisionUnresolved { max_iters: usize },

    #[error("collision resolver hit the max total delay ({max_total_delay}s) for drone {drone_id}")]
    CollisionUnresolvedMaxDelay { drone_id: u32, max_total_delay: f64 },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ShowError>;
