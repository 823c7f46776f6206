//! MCTS Hyperparameters Configuration
//!
//! This module defines all tunable parameters of the search: the node variant,
//! the exploration constants, the RAVE blending constant and the budget that
//! bounds one move decision.

use crate::mcts::error::MctsError;
use crate::mcts::node_type::NodeType;
use crate::HexMctsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// MCTS hyperparameters configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MCTSHyperparameters {
    /// Scoring variant used to build every tree
    /// Default: uct
    pub node_type: NodeType,

    // ========== Exploration ==========
    /// Exploration constant c in the UCT bound
    /// Default: sqrt(2)
    pub exploration_coefficient: f64,

    /// Exploration constant used by AMAF trees
    /// Default: sqrt(2)
    pub amaf_exploration_coefficient: f64,

    // ========== RAVE (Rapid Action Value Estimation) ==========
    /// RAVE blending constant k for adaptive β calculation
    /// Formula: β = sqrt(k / (3*N + k)) where N = visit count of the action
    /// Higher values = more influence from All-Moves-As-First statistics
    /// Lower values = faster convergence to pure UCT values
    /// Default: 10
    pub rave_k: f64,

    // ========== Budget ==========
    /// Wall-clock budget for one decision, in milliseconds
    /// Checked between simulations only, so a decision may overrun slightly
    /// Default: 2000
    pub time_budget_ms: u64,

    /// Optional cap on the number of simulations per worker
    /// Default: None (time budget only)
    pub max_simulations: Option<usize>,

    // ========== Parallelism & randomness ==========
    /// Independent trees searched in parallel and merged at the root
    /// Default: 1
    pub workers: usize,

    /// Seed for every random source of the agent, None seeds from the OS
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for MCTSHyperparameters {
    fn default() -> Self {
        Self {
            node_type: NodeType::Uct,
            exploration_coefficient: std::f64::consts::SQRT_2,
            amaf_exploration_coefficient: std::f64::consts::SQRT_2,
            rave_k: 10.0,
            time_budget_ms: 2000,
            max_simulations: None,
            workers: 1,
            seed: None,
        }
    }
}

impl MCTSHyperparameters {
    /// Load parameters from a JSON file, missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let params: MCTSHyperparameters = serde_json::from_str(&contents)?;
        params.validate().map_err(HexMctsError::Search)?;
        Ok(params)
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Returns true while another simulation is allowed by the iteration cap
    pub fn allows_simulation(&self, simulations_run: usize) -> bool {
        self.max_simulations
            .map_or(true, |limit| simulations_run < limit)
    }

    /// Validate that every parameter is usable by the search
    pub fn validate(&self) -> Result<(), MctsError> {
        let coefficients = [
            ("exploration_coefficient", self.exploration_coefficient),
            (
                "amaf_exploration_coefficient",
                self.amaf_exploration_coefficient,
            ),
            ("rave_k", self.rave_k),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(MctsError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.workers == 0 {
            return Err(MctsError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }

        if self.max_simulations == Some(0) {
            return Err(MctsError::InvalidConfig(
                "max_simulations must be positive when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "{}_c[{:.3},{:.3}]_rave_k[{:.1}]_budget[{}ms,{}]_workers[{}]",
            self.node_type,
            self.exploration_coefficient,
            self.amaf_exploration_coefficient,
            self.rave_k,
            self.time_budget_ms,
            self.max_simulations
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
            self.workers
        )
    }
}
