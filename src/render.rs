//! Text rendering of reports and process lists.
//!
//! Each view is a borrowed `Display` wrapper; the free functions render
//! it to a `String`.

use std::fmt;

use crate::models::ProcessSpec;
use crate::scheduler::{ProcessMetrics, SimulationReport};

const RULE_WIDTH: usize = 80;

/// One-line Gantt chart over the merged trace.
pub struct GanttChart<'a>(pub &'a SimulationReport);

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in self.0.merged_trace() {
            write!(f, "| {} ({}u) ", slot.owner, slot.len())?;
        }
        f.write_str("|")
    }
}

/// Per-process table followed by the averages.
pub struct MetricsTable<'a>(pub &'a SimulationReport);

fn opt(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &ProcessMetrics) -> fmt::Result {
    write!(
        f,
        "{:<5}{:<10}{:<10}{:<10}{:<12}{:<12}{:<10}{:<10}",
        row.id.get(),
        row.arrival,
        row.burst,
        opt(row.start),
        opt(row.completion),
        opt(row.turnaround),
        opt(row.waiting),
        opt(row.response),
    )?;
    if !row.is_complete() {
        f.write_str(" (Not Completed)")?;
    }
    writeln!(f)
}

impl fmt::Display for MetricsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<5}{:<10}{:<10}{:<10}{:<12}{:<12}{:<10}{:<10}",
            "PID", "Arrival", "Burst", "Start", "Completion", "Turnaround", "Waiting", "Response"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for row in &self.0.processes {
            write_row(f, row)?;
        }

        let avg = &self.0.averages;
        if avg.completed == 0 {
            return writeln!(f, "\nNo processes completed to calculate averages.");
        }
        writeln!(f, "\nAverage Turnaround Time: {:.2}", avg.turnaround)?;
        writeln!(f, "Average Waiting Time: {:.2}", avg.waiting)?;
        writeln!(f, "Average Response Time: {:.2}", avg.response)
    }
}

/// Full textual report.
pub struct ReportView<'a>(pub &'a SimulationReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "\n--- Simulation Results ({}) ---", r.policy)?;
        writeln!(f, "Total Simulation Time: {} units", r.total_ticks)?;
        writeln!(f, "CPU Idle Time: {} units", r.idle_ticks)?;
        writeln!(f, "CPU Utilization: {:.2}%", r.cpu_utilization_pct)?;
        writeln!(f, "Throughput: {:.4} processes/unit", r.throughput)?;
        writeln!(f, "\n--- Gantt Chart ---")?;
        writeln!(f, "{}", GanttChart(r))?;
        writeln!(f, "\n--- Process Metrics ---")?;
        write!(f, "{}", MetricsTable(r))?;
        writeln!(f, "---------------------------")
    }
}

/// Registered processes for the `list` command.
pub struct ProcessList<'a>(pub &'a [ProcessSpec]);

impl fmt::Display for ProcessList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No processes added yet.");
        }
        writeln!(f, "\n--- All Processes ---")?;
        writeln!(f, "{:<5}{:<10}{:<10}", "PID", "Arrival", "Burst")?;
        writeln!(f, "{}", "-".repeat(25))?;
        for spec in self.0 {
            writeln!(f, "{:<5}{:<10}{:<10}", spec.id.get(), spec.arrival, spec.burst)?;
        }
        writeln!(f, "---------------------")
    }
}

/// Renders [`GanttChart`], e.g. `| P1 (4u) | Idle (6u) |`.
pub fn gantt_chart(report: &SimulationReport) -> String {
    GanttChart(report).to_string()
}

/// Renders [`MetricsTable`].
pub fn metrics_table(report: &SimulationReport) -> String {
    MetricsTable(report).to_string()
}

/// Renders [`ReportView`].
pub fn report(report: &SimulationReport) -> String {
    ReportView(report).to_string()
}

/// Renders [`ProcessList`].
pub fn process_list(specs: &[ProcessSpec]) -> String {
    ProcessList(specs).to_string()
}
