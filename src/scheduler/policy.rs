//! Scheduling policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

use crate::models::Tick;
use crate::validation::{validate_quantum, ValidationError};

/// CPU scheduling policy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum Policy {
    /// First-Come-First-Served: a dispatched process runs to completion.
    Fcfs,
    /// Round-Robin: at most `quantum` ticks per slice, then re-queued at the tail.
    RoundRobin {
        /// Slice length in ticks.
        quantum: NonZeroU64,
    },
}

impl Policy {
    /// Round-Robin with a caller-supplied quantum.
    pub fn round_robin(quantum: i64) -> Result<Self, ValidationError> {
        Ok(Policy::RoundRobin {
            quantum: validate_quantum(quantum)?,
        })
    }

    /// Ticks the occupant may run before the next scheduling decision.
    ///
    /// FCFS accounts one tick at a time but never preempts.
    pub fn slice_len(&self, remaining: Tick) -> Tick {
        match self {
            Policy::Fcfs => remaining.min(1),
            Policy::RoundRobin { quantum } => quantum.get().min(remaining),
        }
    }

    /// Whether an unfinished occupant is returned to the ready queue after its slice.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::RoundRobin { .. })
    }

    /// Short policy name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::RoundRobin { .. } => "RR",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => f.write_str("First-Come, First-Served"),
            Policy::RoundRobin { quantum } => write!(f, "Round Robin (quantum = {quantum})"),
        }
    }
}
