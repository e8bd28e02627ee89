//! Simulation error type.

use std::fmt;

use crate::validation::ValidationError;

/// Errors surfaced by the simulation engine and its request boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The process set failed strict validation.
    InvalidInput(Vec<ValidationError>),
    /// The algorithm identifier is not one of `fcfs`, `sjf`, `priority`, `rr`.
    UnknownAlgorithm(String),
    /// A simulation loop exceeded the iteration budget for its input.
    IterationLimit {
        /// Algorithm whose loop was cut short.
        algorithm: &'static str,
        /// Budget that was exhausted.
        limit: usize,
    },
    /// The request body could not be parsed.
    MalformedRequest(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidInput(errors) => {
                write!(f, "invalid process set")?;
                for (i, e) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{e}")?;
                }
                Ok(())
            }
            SimulationError::UnknownAlgorithm(_) => f.write_str("Invalid algorithm"),
            SimulationError::IterationLimit { algorithm, limit } => write!(
                f,
                "{algorithm} simulation exceeded {limit} iterations"
            ),
            SimulationError::MalformedRequest(msg) => write!(f, "malformed request: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::InvalidInput(errors)
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::MalformedRequest(err.to_string())
    }
}
