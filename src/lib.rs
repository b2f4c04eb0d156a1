//! Discrete-time CPU scheduling simulator.
//!
//! Models a single CPU serving a set of processes under First-Come-First-Served
//! or Round-Robin scheduling, producing an execution trace (Gantt chart) and
//! per-process waiting, turnaround, and response times. Nothing is actually
//! executed; only clock advancement and queue transitions are simulated.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessId`, `ProcessSpec`, `ProcessState`,
//!   `TraceSlot`, `CpuOwner`
//! - **`scheduler`**: `SchedulingEngine`, `Policy`, `SimulationReport`
//! - **`validation`**: Caller input checks (arrival, burst, quantum)
//! - **`error`**: `SimulationError`
//! - **`config`**: `SimulationConfig`, `IdleAdvance`
//! - **`workload`**: Seeded random workloads
//! - **`render`**: Text Gantt chart and metrics table
//! - **`cli`**: Command parser and interactive session
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::scheduler::SchedulingEngine;
//!
//! let mut engine = SchedulingEngine::new();
//! engine.register(0, 4).unwrap();
//! engine.register(10, 3).unwrap();
//!
//! let report = engine.run_fcfs().unwrap();
//! assert_eq!(report.total_ticks, 13);
//! assert_eq!(report.idle_ticks, 6);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::{IdleAdvance, SimulationConfig};
pub use error::{SimulationError, SimulationResult};
pub use scheduler::{Policy, SchedulingEngine, SimulationReport};
