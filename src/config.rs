//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of the search driver.

use std::f64::consts::SQRT_2;

use crate::{MCTSError, Result};

/// Criteria for selecting the best child after search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the highest average reward
    ///
    /// Pure exploitation over the root's children. Ties go to the child created first.
    HighestValue,

    /// Select the child with the most visits
    ///
    /// More conservative: it trusts the child the search spent the most effort on.
    MostVisits,
}

/// Configuration for the MCTS algorithm
///
/// # Example
///
/// ```
/// use turnwise_mcts::{MCTSConfig, config::BestChildCriteria};
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_playout_depth(30)
///     .with_max_iterations(10_000)
///     .with_seed(42)
///     .with_best_child_criteria(BestChildCriteria::HighestValue);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant for UCB1
    ///
    /// Higher values favor exploration of less-visited nodes.
    /// The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// Maximum number of random plies played in one simulation
    pub max_playout_depth: usize,

    /// Hard cap on iterations per decision, on top of the time budget
    pub max_iterations: Option<usize>,

    /// Seed for the driver's random source; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Whether to continue from the previous decision's tree when possible
    pub reuse_tree: bool,

    /// Criteria for selecting the best child after search
    pub best_child_criteria: BestChildCriteria,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: SQRT_2,
            max_playout_depth: 20,
            max_iterations: None,
            seed: None,
            reuse_tree: true,
            best_child_criteria: BestChildCriteria::HighestValue,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the ply cap for random playouts
    pub fn with_max_playout_depth(mut self, depth: usize) -> Self {
        self.max_playout_depth = depth;
        self
    }

    /// Sets the maximum number of iterations per decision
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Seeds the random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets whether the tree is carried over between decisions
    pub fn with_tree_reuse(mut self, reuse_tree: bool) -> Self {
        self.reuse_tree = reuse_tree;
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Checks that the parameters describe a runnable search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(MCTSError::InvalidConfiguration(
                "max_iterations must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
