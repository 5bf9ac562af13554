//! Policies for the four phases of the MCTS algorithm
//!
//! - Selection policies: how to descend from the root to a leaf
//! - Expansion policies: how to grow a leaf into children
//! - Simulation policies: how to estimate the value of a position
//! - Backpropagation policies: how to update node statistics

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use expansion::{ExpansionPolicy, FullExpansionPolicy};
pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, SimulationPolicy};
