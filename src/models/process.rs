//! Process model.
//!
//! A process is split in two: an immutable [`ProcessSpec`] fixed at
//! registration, and a [`ProcessState`] holding everything a single
//! simulation run mutates. The engine keeps both in parallel arenas indexed
//! by position, so re-running only rebuilds the states.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Simulated clock value.
pub type Tick = u64;

/// Process identifier, assigned sequentially from 1 in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Raw numeric value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Static definition of a process.
///
/// Never mutated after registration. Also serves as the summary row
/// returned by `list_processes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique identifier.
    pub id: ProcessId,
    /// Tick at which the process becomes eligible for scheduling.
    pub arrival: Tick,
    /// Total CPU ticks required (> 0).
    pub burst: Tick,
}

impl ProcessSpec {
    /// Creates a process definition.
    ///
    /// Inputs are assumed validated (`burst > 0`); see
    /// [`validate_process`](crate::validation::validate_process).
    pub fn new(id: ProcessId, arrival: Tick, burst: Tick) -> Self {
        Self { id, arrival, burst }
    }

    /// Arrival-priority ordering with identifier tie-break.
    ///
    /// This is the canonical order of the engine's process set.
    pub fn arrival_order(&self, other: &Self) -> Ordering {
        self.arrival
            .cmp(&other.arrival)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(Arr={}, Burst={})", self.id, self.arrival, self.burst)
    }
}

/// Per-run mutable timing record of a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// Ticks still required; in `[0, burst]`.
    pub remaining: Tick,
    /// First tick the process held the CPU.
    pub start: Option<Tick>,
    /// Tick at which `remaining` reached zero.
    pub completion: Option<Tick>,
    /// `turnaround - burst`, set on completion.
    pub waiting: Tick,
    /// `completion - arrival`, set on completion.
    pub turnaround: Tick,
    /// `start - arrival`, set once at first dispatch.
    pub response: Option<Tick>,
}

impl ProcessState {
    /// Fresh state for a run: full burst remaining, nothing recorded.
    pub fn new(spec: &ProcessSpec) -> Self {
        Self {
            remaining: spec.burst,
            start: None,
            completion: None,
            waiting: 0,
            turnaround: 0,
            response: None,
        }
    }

    /// Whether the process has finished in the current run.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    /// Records the first dispatch. Later calls leave start and response untouched.
    pub fn mark_dispatched(&mut self, spec: &ProcessSpec, now: Tick) -> bool {
        if self.start.is_some() {
            return false;
        }
        self.start = Some(now);
        self.response = Some(now - spec.arrival);
        true
    }

    /// Consumes one tick of CPU. Returns `true` when the burst is exhausted.
    pub fn consume_tick(&mut self) -> bool {
        debug_assert!(self.remaining > 0, "executing a finished process");
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Computes turnaround and waiting time.
    ///
    /// No-op unless both start and completion are set.
    pub fn finalize(&mut self, spec: &ProcessSpec) {
        let (Some(_), Some(completion)) = (self.start, self.completion) else {
            return;
        };
        self.turnaround = completion - spec.arrival;
        self.waiting = self.turnaround - spec.burst;
    }
}
