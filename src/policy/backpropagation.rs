//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how node statistics change after a simulation.

use crate::{
    game_state::GameState,
    tree::{MCTSNode, NodeId, SearchTree},
};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<S: GameState> {
    /// Updates statistics for a node based on a simulation result
    fn update_stats(&self, node: &mut MCTSNode<S>, result: f64);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>>;

    /// Applies `update_stats` to `from` and every ancestor up to the root
    fn propagate(&self, tree: &mut SearchTree<S>, from: NodeId, result: f64) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = tree.node_mut(id);
            self.update_stats(node, result);
            current = node.parent();
        }
    }
}

/// Standard backpropagation policy
///
/// Adds one visit and the full, undiscounted result to each node.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, result: f64) {
        node.increment_visits();
        node.add_reward(result);
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> BackpropagationPolicy<S> for Box<dyn BackpropagationPolicy<S>> {
    fn update_stats(&self, node: &mut MCTSNode<S>, result: f64) {
        (**self).update_stats(node, result)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        (**self).clone_box()
    }

    fn propagate(&self, tree: &mut SearchTree<S>, from: NodeId, result: f64) {
        (**self).propagate(tree, from, result)
    }
}
