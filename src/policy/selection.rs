//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which child to follow at each step of the descent
//! from the root, balancing exploration and exploitation.

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
    utils,
};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<S: GameState> {
    /// Picks the child of `node` to descend into, or `None` if it has no children
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Option<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;

    /// Descends from `start` until reaching a node with no children
    fn select_leaf(&self, tree: &SearchTree<S>, start: NodeId) -> NodeId {
        let mut current = start;
        while let Some(child) = self.select_child(tree, current) {
            current = child;
        }
        current
    }
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// This is the classic selection policy for MCTS:
///
/// ```text
/// UCB1 = average_reward + exploration_constant * sqrt(ln(parent_visits) / child_visits)
/// ```
///
/// `parent_visits` is the visit count of the node whose children are being compared.
/// A child with no visits scores positive infinity, so every sibling is tried once before
/// any is revisited. Ties go to the child created first.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }

    /// Calculates the UCB1 value for a child
    pub fn ucb1_value(&self, child_reward: f64, child_visits: u64, parent_visits: u64) -> f64 {
        utils::ucb1_value(
            child_reward,
            child_visits,
            parent_visits,
            self.exploration_constant,
        )
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl<S: GameState> SelectionPolicy<S> for UCB1Policy {
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Option<NodeId> {
        let parent = tree.node(node);
        let parent_visits = parent.visits();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in parent.children() {
            let child = tree.node(child_id);
            let ucb_value = self.ucb1_value(child.total_reward(), child.visits(), parent_visits);

            // Strict comparison keeps the earliest child on ties
            if best.map_or(true, |(_, best_value)| ucb_value > best_value) {
                best = Some((child_id, ucb_value));
            }
        }

        best.map(|(id, _)| id)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Option<NodeId> {
        (**self).select_child(tree, node)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}
