//! Simulation domain models.
//!
//! Provides the data types shared by the scheduling engine and its
//! callers: process definitions, per-run process state, and the
//! execution trace.
//!
//! # Terminology
//!
//! | Type | Meaning |
//! |------|---------|
//! | `ProcessSpec` | Arrival and burst of a registered job (immutable) |
//! | `ProcessState` | Remaining burst and timing facts for one run |
//! | `TraceSlot` | Who held the CPU during `[start, end)` |
//! | `CpuOwner` | A process or the idle marker |

mod process;
pub mod trace;

pub use process::{ProcessId, ProcessSpec, ProcessState, Tick};
pub use trace::{CpuOwner, TraceSlot};
