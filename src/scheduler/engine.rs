//! Tick-driven scheduling engine.
//!
//! # Algorithm
//!
//! Each loop iteration at clock `t`:
//! 1. **Admit**: every process with `arrival <= t`, work remaining, not
//!    queued and not running joins the ready queue tail, in identifier order.
//! 2. **Dispatch**: if the CPU is free, pop the queue head. The first
//!    dispatch of a process fixes its start and response time.
//! 3. **Execute**: the occupant runs for `policy.slice_len(remaining)`
//!    ticks, re-admitting arrivals after every tick. On exhaustion it
//!    completes; under Round-Robin an unfinished occupant goes back to the
//!    queue tail, behind anything admitted during its slice.
//! 4. **Idle**: with nothing to run, the clock moves to the next arrival
//!    (or one tick, see [`IdleAdvance`]) and the gap is charged to idle.
//!
//! The loop ends once every registered process has a completion time.
//!
//! # Complexity
//! O(T * n) where T = total ticks and n = registered processes.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

use std::collections::VecDeque;

use tracing::{debug, error, info, instrument, trace};

use super::{Policy, SimulationReport};
use crate::config::{IdleAdvance, SimulationConfig};
use crate::error::{SimulationError, SimulationResult};
use crate::models::{ProcessId, ProcessSpec, ProcessState, Tick, TraceSlot};
use crate::validation::{validate_process, ValidationError};

/// Sequential process identifier source, starting at 1.
#[derive(Debug, Clone)]
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn allocate(&mut self) -> ProcessId {
        let id = ProcessId(self.next);
        self.next += 1;
        id
    }
}

/// Single-CPU scheduling simulator.
///
/// Owns the registered process set and all per-run state. A run method
/// blocks until every process completes and returns a
/// [`SimulationReport`]; the same process set can be run any number of
/// times under different policies.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::scheduler::SchedulingEngine;
///
/// let mut engine = SchedulingEngine::new();
/// engine.register(0, 5).unwrap();
/// engine.register(1, 3).unwrap();
///
/// let report = engine.run_round_robin(2).unwrap();
/// assert_eq!(report.total_ticks, 8);
/// assert_eq!(report.idle_ticks, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingEngine {
    config: SimulationConfig,
    ids: IdAllocator,
    /// Sorted by arrival, then identifier.
    processes: Vec<ProcessSpec>,
    /// Parallel to `processes`.
    states: Vec<ProcessState>,
    /// Parallel to `processes`; true while the process sits in `ready`.
    queued: Vec<bool>,
    ready: VecDeque<usize>,
    running: Option<usize>,
    clock: Tick,
    idle_ticks: Tick,
    trace: Vec<TraceSlot>,
}

impl SchedulingEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config,
            ids: IdAllocator::new(),
            processes: Vec::new(),
            states: Vec::new(),
            queued: Vec::new(),
            ready: VecDeque::new(),
            running: None,
            clock: 0,
            idle_ticks: 0,
            trace: Vec::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration used by subsequent runs.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether no process is registered.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Registers a process and returns its identifier.
    ///
    /// Rejects `arrival < 0` and `burst <= 0` without touching engine
    /// state; a rejected call does not consume an identifier.
    pub fn register(&mut self, arrival: i64, burst: i64) -> Result<ProcessId, ValidationError> {
        let (arrival, burst) = validate_process(arrival, burst)?;
        Ok(self.insert(arrival, burst))
    }

    /// Registers a batch of `(arrival, burst)` pairs.
    ///
    /// Every entry is validated before any is registered.
    pub fn register_all(
        &mut self,
        batch: &[(i64, i64)],
    ) -> Result<Vec<ProcessId>, ValidationError> {
        let validated = batch
            .iter()
            .map(|&(arrival, burst)| validate_process(arrival, burst))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(validated
            .into_iter()
            .map(|(arrival, burst)| self.insert(arrival, burst))
            .collect())
    }

    fn insert(&mut self, arrival: Tick, burst: Tick) -> ProcessId {
        let spec = ProcessSpec::new(self.ids.allocate(), arrival, burst);
        let pos = self
            .processes
            .partition_point(|p| p.arrival_order(&spec).is_lt());
        self.processes.insert(pos, spec);
        self.states.insert(pos, ProcessState::new(&spec));
        self.queued.insert(pos, false);
        info!(pid = %spec.id, arrival, burst, "process registered");
        spec.id
    }

    /// Registered processes sorted by identifier.
    pub fn list_processes(&self) -> Vec<ProcessSpec> {
        let mut list = self.processes.clone();
        list.sort_by_key(|p| p.id);
        list
    }

    /// Drops every registered process and restarts identifiers at 1.
    pub fn reset_all(&mut self) {
        self.processes.clear();
        self.states.clear();
        self.queued.clear();
        self.ids = IdAllocator::new();
        self.reset_for_run();
        info!("engine reset, all processes cleared");
    }

    /// Runs First-Come-First-Served.
    pub fn run_fcfs(&mut self) -> SimulationResult<SimulationReport> {
        self.run(Policy::Fcfs)
    }

    /// Runs Round-Robin with the given quantum.
    ///
    /// Rejects `quantum <= 0` before any state changes.
    pub fn run_round_robin(&mut self, quantum: i64) -> SimulationResult<SimulationReport> {
        let policy = Policy::round_robin(quantum)?;
        self.run(policy)
    }

    /// Runs the simulation to completion under `policy`.
    ///
    /// # Errors
    /// [`SimulationError::InternalInconsistency`] if an engine invariant
    /// breaks; no partial report is returned.
    #[instrument(level = "info", skip_all, fields(policy = policy.name()))]
    pub fn run(&mut self, policy: Policy) -> SimulationResult<SimulationReport> {
        self.reset_for_run();
        info!(processes = self.processes.len(), %policy, "simulation started");

        let total = self.processes.len();
        let mut completed = 0;

        while completed < total {
            self.admit_arrivals();
            self.dispatch();

            let Some(idx) = self.running else {
                self.advance_idle()?;
                continue;
            };

            let slice = policy.slice_len(self.states[idx].remaining);
            if self.execute(idx, slice, policy) {
                self.complete(idx);
                completed += 1;
            } else if policy.is_preemptive() {
                self.preempt(idx);
            }
        }

        info!(
            total_ticks = self.clock,
            idle_ticks = self.idle_ticks,
            "simulation finished"
        );

        Ok(SimulationReport::calculate(
            policy,
            &self.processes,
            &self.states,
            self.clock,
            self.idle_ticks,
            std::mem::take(&mut self.trace),
        ))
    }

    /// Clears the clock, idle counter, trace and ready queue, and restores
    /// every process to its unstarted state.
    fn reset_for_run(&mut self) {
        self.clock = 0;
        self.idle_ticks = 0;
        self.trace.clear();
        self.ready.clear();
        self.running = None;
        for (state, spec) in self.states.iter_mut().zip(&self.processes) {
            *state = ProcessState::new(spec);
        }
        self.queued.iter_mut().for_each(|q| *q = false);
    }

    /// Appends newly arrived processes to the ready queue in identifier order.
    fn admit_arrivals(&mut self) {
        let now = self.clock;
        let mut arrived: Vec<usize> = self
            .processes
            .iter()
            .enumerate()
            .take_while(|(_, p)| p.arrival <= now) // sorted by arrival
            .filter(|&(i, _)| {
                self.states[i].remaining > 0 && !self.queued[i] && self.running != Some(i)
            })
            .map(|(i, _)| i)
            .collect();
        arrived.sort_by_key(|&i| self.processes[i].id);

        for i in arrived {
            self.queued[i] = true;
            self.ready.push_back(i);
            debug!(clock = now, pid = %self.processes[i].id, "admitted to ready queue");
        }
    }

    /// Moves the ready queue head onto a free CPU.
    fn dispatch(&mut self) {
        if self.running.is_some() {
            return;
        }
        let Some(idx) = self.ready.pop_front() else {
            return;
        };
        self.queued[idx] = false;
        self.running = Some(idx);

        let spec = &self.processes[idx];
        let first = self.states[idx].mark_dispatched(spec, self.clock);
        debug!(clock = self.clock, pid = %spec.id, first, "dispatched");
    }

    /// Runs the occupant for `ticks` ticks. Returns `true` if it finished.
    fn execute(&mut self, idx: usize, ticks: Tick, policy: Policy) -> bool {
        let pid = self.processes[idx].id;
        let slice_start = self.clock;
        let mut finished = false;

        for _ in 0..ticks {
            finished = self.states[idx].consume_tick();
            self.clock += 1;
            if !policy.is_preemptive() {
                self.trace
                    .push(TraceSlot::running(pid, self.clock - 1, self.clock));
            }
            self.admit_arrivals();
        }
        if policy.is_preemptive() {
            self.trace
                .push(TraceSlot::running(pid, slice_start, self.clock));
        }

        trace!(
            pid = %pid,
            start = slice_start,
            end = self.clock,
            remaining = self.states[idx].remaining,
            "executed"
        );
        finished
    }

    fn complete(&mut self, idx: usize) {
        let spec = &self.processes[idx];
        let state = &mut self.states[idx];
        state.completion = Some(self.clock);
        state.finalize(spec);
        self.running = None;
        info!(
            clock = self.clock,
            pid = %spec.id,
            turnaround = state.turnaround,
            waiting = state.waiting,
            "process completed"
        );
    }

    /// Returns the occupant to the ready queue tail.
    fn preempt(&mut self, idx: usize) {
        self.queued[idx] = true;
        self.ready.push_back(idx);
        self.running = None;
        debug!(
            clock = self.clock,
            pid = %self.processes[idx].id,
            remaining = self.states[idx].remaining,
            "preempted"
        );
    }

    /// Earliest arrival strictly after the current clock.
    fn next_arrival(&self) -> Option<Tick> {
        let now = self.clock;
        self.processes
            .iter()
            .zip(&self.states)
            .filter(|(p, s)| p.arrival > now && !s.is_complete())
            .map(|(p, _)| p.arrival)
            .min()
    }

    /// Charges a gap with no runnable process to idle time.
    fn advance_idle(&mut self) -> SimulationResult<()> {
        let Some(next) = self.next_arrival() else {
            error!(
                clock = self.clock,
                "CPU idle with incomplete processes and no future arrival"
            );
            return Err(SimulationError::inconsistency(
                self.clock,
                "CPU idle with incomplete processes and no future arrival",
            ));
        };

        let target = match self.config.idle_advance {
            IdleAdvance::Jump => next,
            IdleAdvance::Tick => self.clock + 1,
        };
        self.trace.push(TraceSlot::idle(self.clock, target));
        self.idle_ticks += target - self.clock;
        debug!(from = self.clock, to = target, "CPU idle");
        self.clock = target;
        Ok(())
    }
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new()
    }
}
