//! # turnwise-mcts
//!
//! A Monte Carlo Tree Search (MCTS) decision engine for turn-based games, built to pick
//! one action per turn under a wall-clock budget and to keep the work it already did.
//!
//! The driver owns its search tree across decisions. When the next observed position
//! matches one of the current root's children, that child becomes the new root and its
//! statistics carry over; otherwise the tree starts again from the observed position.
//!
//! ## Features
//!
//! - Generic over any rule-set implementing [`GameState`]
//! - UCB1 selection with unvisited children always tried first
//! - Bounded-depth random playouts drawn from a seedable random source
//! - Soft time budgets with an optional iteration cap
//! - Tree continuation between turns
//!
//! ## Basic Usage
//!
//! ```
//! use std::time::Duration;
//! use turnwise_mcts::{GameState, MCTSConfig, MCTS};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Step(u8);
//!
//! impl turnwise_mcts::Action for Step {
//!     fn description(&self) -> String {
//!         format!("STEP {}", self.0)
//!     }
//! }
//!
//! // A counter that finishes after a few moves; bigger steps score more
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter {
//!     total: u32,
//!     moves: u8,
//! }
//!
//! impl GameState for Counter {
//!     type Action = Step;
//!     type Player = usize;
//!
//!     fn get_legal_actions(&self) -> Vec<Step> {
//!         if self.is_terminal() {
//!             return vec![];
//!         }
//!         vec![Step(1), Step(2), Step(3)]
//!     }
//!
//!     fn apply_action(&self, action: &Step) -> Self {
//!         Counter {
//!             total: self.total + action.0 as u32,
//!             moves: self.moves + 1,
//!         }
//!     }
//!
//!     fn is_terminal(&self) -> bool {
//!         self.moves >= 3
//!     }
//!
//!     fn evaluate(&self, _player: &usize) -> f64 {
//!         self.total as f64
//!     }
//!
//!     fn get_current_player(&self) -> usize {
//!         0
//!     }
//! }
//!
//! fn main() -> turnwise_mcts::Result<()> {
//!     let config = MCTSConfig::default().with_seed(7).with_max_iterations(200);
//!
//!     // Create the driver once and keep it across turns
//!     let mut mcts = MCTS::new(config);
//!
//!     let state = Counter { total: 0, moves: 0 };
//!     mcts.run_simulations(state.clone(), Duration::from_millis(50))?;
//!     let action = mcts.best_action()?;
//!     println!("Chosen: {}", turnwise_mcts::Action::description(&action));
//!
//!     // Next turn: the observed position matches a child, so the tree is reused
//!     let next = state.apply_action(&action);
//!     mcts.run_simulations(next, Duration::from_millis(50))?;
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each iteration of the search loop runs four phases:
//!
//! 1. **Selection**: descend from the root by UCB1 until reaching a node without children.
//! 2. **Expansion**: if that leaf is not terminal, create one child per legal action.
//! 3. **Simulation**: pick one of the new children at random (or the leaf itself when it
//!    has none) and play random moves from it up to a ply cap, then score the result.
//! 4. **Backpropagation**: add one visit and the reward to every node from the simulated
//!    node up to the root.
//!
//! The loop repeats until the time budget elapses. The deadline is checked between
//! iterations only, so one in-flight iteration always completes.

pub mod config;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::MCTSConfig;
pub use game_state::{Action, GameState, Player};
pub use mcts::MCTS;
pub use policy::{BackpropagationPolicy, ExpansionPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// The root has no children to choose from
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// An action was applied to a state where it is not legal
    ///
    /// The expander and the playout only apply actions taken from the same state's
    /// legal action list, so this points at a state being shared or mutated elsewhere.
    #[error("Action precondition violated: {0}")]
    ActionPreconditionViolation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
