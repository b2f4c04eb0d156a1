//! Simulation error taxonomy.

use thiserror::Error;

use crate::models::Tick;
use crate::validation::ValidationError;

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimulationError {
    /// Caller input rejected before any engine state changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An engine invariant was violated. Indicates a logic bug; the run
    /// is aborted and no report is produced.
    #[error("internal inconsistency at tick {clock}: {message}")]
    InternalInconsistency {
        /// Simulated clock when the violation was detected.
        clock: Tick,
        /// What went wrong.
        message: String,
    },
}

impl SimulationError {
    /// Create an internal inconsistency error
    #[inline]
    pub fn inconsistency(clock: Tick, message: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            clock,
            message: message.into(),
        }
    }

    /// Whether the caller can fix the input and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias for engine operations.
pub type SimulationResult<T> = Result<T, SimulationError>;
