//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected during one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Determinizations that produced a usable tree.
    pub determinizations: u32,

    /// Determinizations dropped after a consistency failure.
    pub discarded: u32,

    /// Selection/expansion/backpropagation cycles.
    pub iterations: u32,

    /// Playouts run (leaves that were already terminal skip the playout).
    pub simulations: u32,

    pub nodes_expanded: u32,

    /// Playouts that hit the move cap.
    pub budget_exhausted: u32,

    /// Wall time for the decision (microseconds).
    pub elapsed_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold per-sample counters into the total. Elapsed time is not summed.
    pub fn merge(&mut self, other: &SearchStats) {
        self.determinizations += other.determinizations;
        self.discarded += other.discarded;
        self.iterations += other.iterations;
        self.simulations += other.simulations;
        self.nodes_expanded += other.nodes_expanded;
        self.budget_exhausted += other.budget_exhausted;
    }

    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.elapsed_us == 0 {
            0.0
        } else {
            f64::from(self.simulations) / (self.elapsed_us as f64 / 1_000_000.0)
        }
    }
}
