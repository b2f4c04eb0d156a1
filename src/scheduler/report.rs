//! Simulation report and performance metrics.
//!
//! Computes the standard CPU scheduling measures from the final process
//! states and the execution trace of a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | CPU Utilization | (total - idle) / total × 100 |
//! | Throughput | completed processes / total ticks |
//!
//! Averages are taken over completed processes only.

use serde::{Deserialize, Serialize};

use super::Policy;
use crate::models::{trace, CpuOwner, ProcessId, ProcessSpec, ProcessState, Tick, TraceSlot};

/// Metrics row for one process.
///
/// Timing fields are `None` for a process that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: ProcessId,
    /// Arrival tick.
    pub arrival: Tick,
    /// Total burst.
    pub burst: Tick,
    /// First dispatch tick.
    pub start: Option<Tick>,
    /// Completion tick.
    pub completion: Option<Tick>,
    /// completion - arrival.
    pub turnaround: Option<Tick>,
    /// turnaround - burst.
    pub waiting: Option<Tick>,
    /// start - arrival.
    pub response: Option<Tick>,
}

impl ProcessMetrics {
    /// Builds a row from a process definition and its final state.
    pub fn from_state(spec: &ProcessSpec, state: &ProcessState) -> Self {
        let completed = state.is_complete();
        Self {
            id: spec.id,
            arrival: spec.arrival,
            burst: spec.burst,
            start: state.start,
            completion: state.completion,
            turnaround: completed.then_some(state.turnaround),
            waiting: completed.then_some(state.waiting),
            response: state.response,
        }
    }

    /// Whether the process finished.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }
}

/// Means over completed processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Number of completed processes the means are taken over.
    pub completed: usize,
    /// Mean turnaround time.
    pub turnaround: f64,
    /// Mean waiting time.
    pub waiting: f64,
    /// Mean response time.
    pub response: f64,
}

impl AverageMetrics {
    /// Averages the completed rows of `rows`; all zero when none completed.
    pub fn calculate(rows: &[ProcessMetrics]) -> Self {
        let mut completed = 0usize;
        let mut total_turnaround: Tick = 0;
        let mut total_waiting: Tick = 0;
        let mut total_response: Tick = 0;

        for row in rows.iter().filter(|r| r.is_complete()) {
            completed += 1;
            total_turnaround += row.turnaround.unwrap_or(0);
            total_waiting += row.waiting.unwrap_or(0);
            total_response += row.response.unwrap_or(0);
        }

        if completed == 0 {
            return Self::default();
        }

        let n = completed as f64;
        Self {
            completed,
            turnaround: total_turnaround as f64 / n,
            waiting: total_waiting as f64 / n,
            response: total_response as f64 / n,
        }
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy the run used.
    pub policy: Policy,
    /// Final clock value.
    pub total_ticks: Tick,
    /// Ticks with no process on the CPU.
    pub idle_ticks: Tick,
    /// Ticks with a process on the CPU.
    pub busy_ticks: Tick,
    /// busy / total × 100, or 0 for an empty run.
    pub cpu_utilization_pct: f64,
    /// Completed processes per tick, or 0 for an empty run.
    pub throughput: f64,
    /// Execution trace as recorded by the engine.
    pub trace: Vec<TraceSlot>,
    /// One row per registered process, sorted by identifier.
    pub processes: Vec<ProcessMetrics>,
    /// Means over completed processes.
    pub averages: AverageMetrics,
}

impl SimulationReport {
    /// Computes the report from the engine's final state.
    ///
    /// # Arguments
    /// * `specs` / `states` - Parallel slices, in any order.
    /// * `total_ticks` - Final clock.
    /// * `idle_ticks` - Accumulated idle time.
    /// * `trace` - Recorded intervals.
    pub fn calculate(
        policy: Policy,
        specs: &[ProcessSpec],
        states: &[ProcessState],
        total_ticks: Tick,
        idle_ticks: Tick,
        trace: Vec<TraceSlot>,
    ) -> Self {
        let mut processes: Vec<ProcessMetrics> = specs
            .iter()
            .zip(states)
            .map(|(spec, state)| ProcessMetrics::from_state(spec, state))
            .collect();
        processes.sort_by_key(|row| row.id);

        let averages = AverageMetrics::calculate(&processes);
        let busy_ticks = total_ticks - idle_ticks;

        let (cpu_utilization_pct, throughput) = if total_ticks == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_ticks as f64 / total_ticks as f64 * 100.0,
                averages.completed as f64 / total_ticks as f64,
            )
        };

        Self {
            policy,
            total_ticks,
            idle_ticks,
            busy_ticks,
            cpu_utilization_pct,
            throughput,
            trace,
            processes,
            averages,
        }
    }

    /// Trace with adjacent same-owner intervals coalesced.
    pub fn merged_trace(&self) -> Vec<TraceSlot> {
        trace::merge_adjacent(&self.trace)
    }

    /// Intervals during which `pid` held the CPU.
    pub fn slices_for(&self, pid: ProcessId) -> Vec<TraceSlot> {
        self.trace
            .iter()
            .filter(|s| s.owner == CpuOwner::Process(pid))
            .copied()
            .collect()
    }

    /// Metrics row for `pid`.
    pub fn metrics_for(&self, pid: ProcessId) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|row| row.id == pid)
    }

    /// Whether every registered process completed.
    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(ProcessMetrics::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: u32, arrival: Tick, burst: Tick) -> ProcessSpec {
        ProcessSpec::new(ProcessId(id), arrival, burst)
    }

    fn finished(spec: &ProcessSpec, start: Tick, completion: Tick) -> ProcessState {
        let mut state = ProcessState::new(spec);
        state.remaining = 0;
        state.mark_dispatched(spec, start);
        state.completion = Some(completion);
        state.finalize(spec);
        state
    }

    #[test]
    fn test_report_basic() {
        let specs = vec![spec(1, 0, 4), spec(2, 10, 3)];
        let states = vec![finished(&specs[0], 0, 4), finished(&specs[1], 10, 13)];
        let trace = vec![
            TraceSlot::running(ProcessId(1), 0, 4),
            TraceSlot::idle(4, 10),
            TraceSlot::running(ProcessId(2), 10, 13),
        ];

        let report = SimulationReport::calculate(Policy::Fcfs, &specs, &states, 13, 6, trace);
        assert_eq!(report.busy_ticks, 7);
        assert!((report.cpu_utilization_pct - 700.0 / 13.0).abs() < 1e-10);
        assert!((report.throughput - 2.0 / 13.0).abs() < 1e-10);
        assert_eq!(report.averages.completed, 2);
        assert!((report.averages.turnaround - 3.5).abs() < 1e-10);
        assert!((report.averages.waiting - 0.0).abs() < 1e-10);
        assert!(report.all_completed());
    }

    #[test]
    fn test_rows_sorted_by_id() {
        let specs = vec![spec(2, 0, 1), spec(1, 3, 1)];
        let states = vec![finished(&specs[0], 0, 1), finished(&specs[1], 3, 4)];
        let report = SimulationReport::calculate(Policy::Fcfs, &specs, &states, 4, 2, vec![]);
        let ids: Vec<u32> = report.processes.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_incomplete_rows_excluded_from_averages() {
        let specs = vec![spec(1, 0, 2), spec(2, 0, 5)];
        let mut pending = ProcessState::new(&specs[1]);
        pending.mark_dispatched(&specs[1], 2);
        let states = vec![finished(&specs[0], 0, 2), pending];

        let report = SimulationReport::calculate(Policy::Fcfs, &specs, &states, 3, 0, vec![]);
        let row = report.metrics_for(ProcessId(2)).unwrap();
        assert!(!row.is_complete());
        assert_eq!(row.turnaround, None);
        assert_eq!(row.response, Some(2));
        assert_eq!(report.averages.completed, 1);
        assert!((report.averages.turnaround - 2.0).abs() < 1e-10);
        assert!(!report.all_completed());
    }

    #[test]
    fn test_empty_report() {
        let report = SimulationReport::calculate(Policy::Fcfs, &[], &[], 0, 0, vec![]);
        assert_eq!(report.total_ticks, 0);
        assert!((report.cpu_utilization_pct - 0.0).abs() < 1e-10);
        assert!((report.throughput - 0.0).abs() < 1e-10);
        assert_eq!(report.averages, AverageMetrics::default());
        assert!(report.processes.is_empty());
    }

    #[test]
    fn test_slices_for() {
        let trace = vec![
            TraceSlot::running(ProcessId(1), 0, 2),
            TraceSlot::running(ProcessId(2), 2, 4),
            TraceSlot::running(ProcessId(1), 4, 5),
        ];
        let report = SimulationReport::calculate(Policy::Fcfs, &[], &[], 5, 0, trace);
        let slices = report.slices_for(ProcessId(1));
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1], TraceSlot::running(ProcessId(1), 4, 5));
    }
}
