//! End-to-end scenarios through the public API.

use cpu_sched_sim::models::{ProcessId, TraceSlot};
use cpu_sched_sim::{IdleAdvance, SchedulingEngine, SimulationConfig, SimulationReport};
use pretty_assertions::assert_eq;

fn pid(n: u32) -> ProcessId {
    ProcessId(n)
}

#[test]
fn fcfs_single_process() {
    let mut engine = SchedulingEngine::new();
    engine.register(0, 5).unwrap();
    let report = engine.run_fcfs().unwrap();

    assert_eq!(report.total_ticks, 5);
    assert_eq!(report.idle_ticks, 0);
    let p1 = report.metrics_for(pid(1)).unwrap();
    assert_eq!(
        (p1.start, p1.completion, p1.waiting, p1.turnaround, p1.response),
        (Some(0), Some(5), Some(0), Some(5), Some(0))
    );
    assert!((report.cpu_utilization_pct - 100.0).abs() < 1e-10);
}

#[test]
fn fcfs_two_processes_with_idle_gap() {
    let mut engine = SchedulingEngine::new();
    engine.register(0, 4).unwrap();
    engine.register(10, 3).unwrap();
    let report = engine.run_fcfs().unwrap();

    assert_eq!(report.total_ticks, 13);
    assert_eq!(report.idle_ticks, 6);
    assert_eq!(report.metrics_for(pid(1)).unwrap().completion, Some(4));
    let p2 = report.metrics_for(pid(2)).unwrap();
    assert_eq!((p2.start, p2.completion), (Some(10), Some(13)));
    assert_eq!(report.trace[4], TraceSlot::idle(4, 10));
}

#[test]
fn round_robin_quantum_two() {
    let mut engine = SchedulingEngine::new();
    engine.register(0, 5).unwrap();
    engine.register(1, 3).unwrap();
    let report = engine.run_round_robin(2).unwrap();

    assert_eq!(
        report.trace,
        vec![
            TraceSlot::running(pid(1), 0, 2),
            TraceSlot::running(pid(2), 2, 4),
            TraceSlot::running(pid(1), 4, 6),
            TraceSlot::running(pid(2), 6, 7),
            TraceSlot::running(pid(1), 7, 8),
        ]
    );
    assert_eq!(report.total_ticks, 8);
    assert_eq!(report.idle_ticks, 0);
    assert_eq!(report.metrics_for(pid(1)).unwrap().completion, Some(8));
}

#[test]
fn empty_set_produces_zero_report() {
    let mut engine = SchedulingEngine::new();
    let report = engine.run_fcfs().unwrap();

    assert_eq!(report.total_ticks, 0);
    assert_eq!(report.idle_ticks, 0);
    assert!((report.cpu_utilization_pct - 0.0).abs() < 1e-10);
    assert!(report.processes.is_empty());
    assert_eq!(report.averages.completed, 0);

    let rr = engine.run_round_robin(3).unwrap();
    assert_eq!(rr.total_ticks, 0);
}

#[test]
fn fcfs_then_round_robin_does_not_leak_state() {
    let batch = [(0, 6), (2, 2), (2, 3), (20, 1)];

    let mut fresh = SchedulingEngine::new();
    fresh.register_all(&batch).unwrap();
    let expected = fresh.run_round_robin(2).unwrap();

    let mut reused = SchedulingEngine::new();
    reused.register_all(&batch).unwrap();
    reused.run_fcfs().unwrap();
    let actual = reused.run_round_robin(2).unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn tick_idle_mode_matches_jump_mode() {
    let batch = [(5, 2), (5, 1), (12, 4)];
    let mut jump = SchedulingEngine::new();
    jump.register_all(&batch).unwrap();
    let mut tick =
        SchedulingEngine::with_config(SimulationConfig::new().with_idle_advance(IdleAdvance::Tick));
    tick.register_all(&batch).unwrap();

    let a = jump.run_fcfs().unwrap();
    let b = tick.run_fcfs().unwrap();
    assert_eq!(a.merged_trace(), b.merged_trace());
    assert_eq!(
        (a.total_ticks, a.idle_ticks, &a.processes),
        (b.total_ticks, b.idle_ticks, &b.processes)
    );
}

#[test]
fn report_serializes_to_json() {
    let mut engine = SchedulingEngine::new();
    engine.register_all(&[(0, 3), (4, 2)]).unwrap();
    let report = engine.run_round_robin(1).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains(r#""policy":"round_robin""#));
    assert!(json.contains(r#""kind":"idle""#));

    let back: SimulationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.trace, report.trace);
    assert_eq!(back.processes, report.processes);
    assert_eq!(back.policy, report.policy);
}
