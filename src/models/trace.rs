//! Execution trace (Gantt chart) model.
//!
//! A trace is an ordered list of half-open intervals `[start, end)`, each
//! attributed to a process or to the idle CPU. A well-formed trace tiles
//! `[0, total_ticks)` with no gap and no overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ProcessId, Tick};

/// Who held the CPU during an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "pid")]
pub enum CpuOwner {
    /// No process was running.
    Idle,
    /// The given process was running.
    Process(ProcessId),
}

impl CpuOwner {
    /// Whether this is the idle marker.
    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, CpuOwner::Idle)
    }

    /// The process, if any.
    #[inline]
    pub fn process(self) -> Option<ProcessId> {
        match self {
            CpuOwner::Idle => None,
            CpuOwner::Process(pid) => Some(pid),
        }
    }
}

impl fmt::Display for CpuOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuOwner::Idle => f.write_str("Idle"),
            CpuOwner::Process(pid) => write!(f, "{pid}"),
        }
    }
}

/// One interval of the execution trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSlot {
    /// CPU holder.
    pub owner: CpuOwner,
    /// First tick (inclusive).
    pub start: Tick,
    /// End tick (exclusive).
    pub end: Tick,
}

impl TraceSlot {
    /// Creates a slot.
    pub fn new(owner: CpuOwner, start: Tick, end: Tick) -> Self {
        debug_assert!(start < end, "empty trace slot [{start}, {end})");
        Self { owner, start, end }
    }

    /// Interval for a running process.
    pub fn running(pid: ProcessId, start: Tick, end: Tick) -> Self {
        Self::new(CpuOwner::Process(pid), start, end)
    }

    /// Idle interval.
    pub fn idle(start: Tick, end: Tick) -> Self {
        Self::new(CpuOwner::Idle, start, end)
    }

    /// Length in ticks.
    #[inline]
    pub fn len(&self) -> Tick {
        self.end - self.start
    }

    /// Always false for a well-formed slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Coalesces adjacent slots that share an owner.
///
/// Engine traces record one slot per executed tick (FCFS), per slice
/// (Round-Robin), or per idle step; merging yields the compact Gantt view.
pub fn merge_adjacent(slots: &[TraceSlot]) -> Vec<TraceSlot> {
    let mut merged: Vec<TraceSlot> = Vec::with_capacity(slots.len());
    for slot in slots {
        match merged.last_mut() {
            Some(last) if last.owner == slot.owner && last.end == slot.start => {
                last.end = slot.end;
            }
            _ => merged.push(*slot),
        }
    }
    merged
}

/// Whether `slots` exactly tile `[0, total)` in order.
pub fn is_contiguous(slots: &[TraceSlot], total: Tick) -> bool {
    let mut cursor = 0;
    for slot in slots {
        if slot.start != cursor || slot.is_empty() {
            return false;
        }
        cursor = slot.end;
    }
    cursor == total
}

/// Sum of slot lengths attributed to `owner`.
pub fn ticks_for(slots: &[TraceSlot], owner: CpuOwner) -> Tick {
    slots
        .iter()
        .filter(|s| s.owner == owner)
        .map(TraceSlot::len)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u32) -> ProcessId {
        ProcessId(id)
    }

    #[test]
    fn test_merge_adjacent() {
        let slots = vec![
            TraceSlot::running(p(1), 0, 1),
            TraceSlot::running(p(1), 1, 2),
            TraceSlot::idle(2, 3),
            TraceSlot::idle(3, 5),
            TraceSlot::running(p(2), 5, 6),
            TraceSlot::running(p(1), 6, 7),
        ];
        let merged = merge_adjacent(&slots);
        assert_eq!(
            merged,
            vec![
                TraceSlot::running(p(1), 0, 2),
                TraceSlot::idle(2, 5),
                TraceSlot::running(p(2), 5, 6),
                TraceSlot::running(p(1), 6, 7),
            ]
        );
    }

    #[test]
    fn test_is_contiguous() {
        let good = vec![TraceSlot::running(p(1), 0, 4), TraceSlot::idle(4, 10)];
        assert!(is_contiguous(&good, 10));
        assert!(!is_contiguous(&good, 11));

        let gap = vec![TraceSlot::running(p(1), 0, 4), TraceSlot::idle(5, 10)];
        assert!(!is_contiguous(&gap, 10));

        assert!(is_contiguous(&[], 0));
    }

    #[test]
    fn test_ticks_for() {
        let slots = vec![
            TraceSlot::running(p(1), 0, 4),
            TraceSlot::idle(4, 10),
            TraceSlot::running(p(1), 10, 11),
        ];
        assert_eq!(ticks_for(&slots, CpuOwner::Process(p(1))), 5);
        assert_eq!(ticks_for(&slots, CpuOwner::Idle), 6);
    }

    #[test]
    fn test_owner_display() {
        assert_eq!(CpuOwner::Idle.to_string(), "Idle");
        assert_eq!(CpuOwner::Process(p(3)).to_string(), "P3");
        assert_eq!(CpuOwner::Process(p(3)).process(), Some(p(3)));
        assert!(CpuOwner::Idle.is_idle());
    }
}
