//! Input validation for simulation requests.
//!
//! Checks caller-supplied numbers before they reach the engine. Detects:
//! - Negative arrival times
//! - Non-positive burst times
//! - Non-positive Round-Robin quanta
//!
//! The engine never re-validates; anything that passes here is a valid
//! precondition for `register` and the run methods.

use std::num::NonZeroU64;

use thiserror::Error;

use crate::models::Tick;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// The rejected value.
    pub value: i64,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Arrival time below zero.
    NegativeArrival,
    /// Burst time of zero or less.
    NonPositiveBurst,
    /// Time quantum of zero or less.
    NonPositiveQuantum,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, value: i64, message: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            message: message.into(),
        }
    }
}

/// Validates a process definition.
///
/// # Returns
/// The `(arrival, burst)` pair as clock ticks, or the first violation found
/// (arrival is checked before burst).
pub fn validate_process(arrival: i64, burst: i64) -> Result<(Tick, Tick), ValidationError> {
    if arrival < 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            arrival,
            format!("Arrival time cannot be negative (got {arrival})"),
        ));
    }
    if burst <= 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            burst,
            format!("Burst time must be positive (got {burst})"),
        ));
    }
    Ok((arrival as Tick, burst as Tick))
}

/// Validates a Round-Robin time quantum.
pub fn validate_quantum(quantum: i64) -> Result<NonZeroU64, ValidationError> {
    u64::try_from(quantum)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                quantum,
                format!("Time quantum must be a positive integer (got {quantum})"),
            )
        })
}
