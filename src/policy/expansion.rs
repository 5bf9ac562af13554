//! Expansion policies determine which children a leaf grows when it is reached.

use log::trace;

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
    Result,
};

/// Trait for policies that expand a leaf node
pub trait ExpansionPolicy<S: GameState> {
    /// Creates children under `node` and returns how many were created
    ///
    /// Must do nothing for a terminal state or a node that already has children.
    fn expand(&self, tree: &mut SearchTree<S>, node: NodeId) -> Result<usize>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>>;
}

/// Full expansion policy
///
/// Creates one child per legal action of the leaf's current player, in the order
/// returned by `get_legal_actions`. Each child's state is derived from the leaf's own
/// state with `try_apply_action`, so a stale action surfaces as an error instead of
/// corrupting the tree.
#[derive(Debug, Clone)]
pub struct FullExpansionPolicy;

impl FullExpansionPolicy {
    /// Creates a new full expansion policy
    pub fn new() -> Self {
        FullExpansionPolicy
    }
}

impl Default for FullExpansionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> ExpansionPolicy<S> for FullExpansionPolicy {
    fn expand(&self, tree: &mut SearchTree<S>, node: NodeId) -> Result<usize> {
        let leaf = tree.node(node);
        if leaf.state.is_terminal() || !leaf.is_leaf() {
            return Ok(0);
        }

        let children = leaf
            .state
            .get_legal_actions()
            .into_iter()
            .map(|action| -> Result<(S, S::Action)> {
                let state = leaf.state.try_apply_action(&action)?;
                Ok((state, action))
            })
            .collect::<Result<Vec<_>>>()?;

        let created = children.len();
        for (state, action) in children {
            tree.add_child(node, state, action);
        }

        trace!("Expanded node {} into {} children", node, created);
        Ok(created)
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> ExpansionPolicy<S> for Box<dyn ExpansionPolicy<S>> {
    fn expand(&self, tree: &mut SearchTree<S>, node: NodeId) -> Result<usize> {
        (**self).expand(tree, node)
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        (**self).clone_box()
    }
}
