//! Engine configuration.

use serde::{Deserialize, Serialize};

/// How the clock moves across a gap with nothing to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleAdvance {
    /// Jump straight to the next arrival, one idle interval per gap.
    #[default]
    Jump,
    /// Advance one idle tick per loop iteration.
    Tick,
}

/// Simulation settings applied to every run of an engine.
///
/// Both idle modes produce the same totals and the same merged trace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Idle advancement strategy.
    pub idle_advance: IdleAdvance,
}

impl SimulationConfig {
    /// Default configuration (idle jump).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the idle advancement strategy.
    pub fn with_idle_advance(mut self, idle_advance: IdleAdvance) -> Self {
        self.idle_advance = idle_advance;
        self
    }
}
