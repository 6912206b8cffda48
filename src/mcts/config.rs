//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// ISMCTS configuration.
///
/// Every budget is a hard upper bound. The same config and seed always
/// produce the same decision, with or without `parallel`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IsmctsConfig {
    /// UCB1 exploration constant (default: sqrt(2)).
    pub exploration_constant: f64,

    /// Independent hidden-information samples per decision.
    pub num_determinizations: u32,

    /// Tree iterations run against each sample.
    pub simulations_per_determinization: u32,

    /// Move cap for a single playout. Hitting it counts as a non-win.
    pub max_playout_moves: u32,

    /// Root seed; per-sample seeds are derived from it.
    pub seed: u64,

    /// Run determinizations on the rayon pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for IsmctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            num_determinizations: 20,
            simulations_per_determinization: 25,
            max_playout_moves: 200,
            seed: 42,
            parallel: false,
        }
    }
}

impl IsmctsConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_determinizations(mut self, count: u32) -> Self {
        self.num_determinizations = count;
        self
    }

    pub fn with_simulations(mut self, count: u32) -> Self {
        self.simulations_per_determinization = count;
        self
    }

    pub fn with_max_playout_moves(mut self, moves: u32) -> Self {
        self.max_playout_moves = moves;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject zero budgets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_determinizations == 0 {
            return Err(ConfigError::ZeroBudget("num_determinizations"));
        }
        if self.simulations_per_determinization == 0 {
            return Err(ConfigError::ZeroBudget("simulations_per_determinization"));
        }
        if self.max_playout_moves == 0 {
            return Err(ConfigError::ZeroBudget("max_playout_moves"));
        }
        Ok(())
    }
}
