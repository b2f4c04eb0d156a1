//! Seeded random workloads.
//!
//! Generates `(arrival, burst)` pairs for quick experiments. The same seed
//! and ranges always produce the same workload.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest batch a single `generate` call produces.
pub const MAX_GENERATED: usize = 10_000;

/// Random workload generator.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::workload::WorkloadGenerator;
///
/// let batch = WorkloadGenerator::new(42).with_burst_range(1..=4).generate(5);
/// assert_eq!(batch.len(), 5);
/// assert!(batch.iter().all(|&(_, burst)| (1..=4).contains(&burst)));
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    arrival_range: RangeInclusive<i64>,
    burst_range: RangeInclusive<i64>,
}

impl WorkloadGenerator {
    /// Creates a generator with arrivals in `0..=20` and bursts in `1..=10`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            arrival_range: 0..=20,
            burst_range: 1..=10,
        }
    }

    /// Sets the inclusive arrival range.
    pub fn with_arrival_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.arrival_range = range;
        self
    }

    /// Sets the inclusive burst range.
    pub fn with_burst_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.burst_range = range;
        self
    }

    /// Generates `count` `(arrival, burst)` pairs, capped at [`MAX_GENERATED`].
    ///
    /// Ranges are passed through unchecked; feed the result to
    /// `register_all` to have it validated.
    pub fn generate(&self, count: usize) -> Vec<(i64, i64)> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count.min(MAX_GENERATED))
            .map(|_| {
                let arrival = rng.random_range(self.arrival_range.clone());
                let burst = rng.random_range(self.burst_range.clone());
                (arrival, burst)
            })
            .collect()
    }
}
