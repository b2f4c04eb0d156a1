//! Scheduling engine and run reports.
//!
//! Provides the single-CPU simulation engine for First-Come-First-Served
//! and Round-Robin, and the report computed at the end of every run.
//!
//! # Algorithm
//!
//! `SchedulingEngine` advances a discrete clock. Arrivals are admitted to
//! a FIFO ready queue, the head is dispatched onto a free CPU, and the
//! occupant runs one tick (FCFS) or one quantum-bounded slice
//! (Round-Robin) before the next decision.
//!
//! # Report
//!
//! `SimulationReport` carries the trace, idle and utilization totals, and
//! turnaround, waiting and response time per process and on average.

mod engine;
mod policy;
mod report;

pub use engine::SchedulingEngine;
pub use policy::Policy;
pub use report::{AverageMetrics, ProcessMetrics, SimulationReport};
