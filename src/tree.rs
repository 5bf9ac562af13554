//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in an arena owned by [`SearchTree`] and refer to each other by [`NodeId`].
//! Children are the only owning edge; the parent link is an index used for walking
//! back up during backpropagation.

use std::collections::VecDeque;
use std::fmt;

use crate::game_state::GameState;

/// Index of a node inside its [`SearchTree`]
///
/// Ids are only meaningful for the tree that issued them and are invalidated by
/// [`SearchTree::rebase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this id
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node in the MCTS tree
///
/// Each node owns its own copy of the game state, the action that produced it from
/// the parent's state, and the visit and reward accumulators.
#[derive(Debug, Clone)]
pub struct MCTSNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// The action that led to this state (None for root)
    pub action: Option<S::Action>,

    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visits: u64,
    total_reward: f64,
    depth: usize,
}

impl<S: GameState> MCTSNode<S> {
    fn new(state: S, action: Option<S::Action>, parent: Option<NodeId>, depth: usize) -> Self {
        MCTSNode {
            state,
            action,
            parent,
            children: Vec::new(),
            visits: 0,
            total_reward: 0.0,
            depth,
        }
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the total reward accumulated at this node
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the average reward, or `None` if the node was never simulated
    pub fn value(&self) -> Option<f64> {
        if self.visits == 0 {
            return None;
        }
        Some(self.total_reward / self.visits as f64)
    }

    /// Increments the visit count
    pub fn increment_visits(&mut self) {
        self.visits += 1;
    }

    /// Adds reward to the total
    pub fn add_reward(&mut self, reward: f64) {
        self.total_reward += reward;
    }

    /// Returns the parent of this node (None for root)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in creation order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth of this node below the current root (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// An arena-backed search tree with a single root
#[derive(Debug, Clone)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<MCTSNode<S>>,
    root: NodeId,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree holding a single unvisited root
    pub fn new(root_state: S) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(root_state, None, None, 0)],
            root: NodeId(0),
        }
    }

    /// Returns the root id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the root node
    pub fn root_node(&self) -> &MCTSNode<S> {
        &self.nodes[self.root.0]
    }

    /// Returns the node with the given id
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0]
    }

    /// Returns the node with the given id mutably
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0]
    }

    /// Returns the node with the given id, if it exists
    pub fn get(&self, id: NodeId) -> Option<&MCTSNode<S>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is always false
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node with its id
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Appends a child to `parent` and returns its id
    pub fn add_child(&mut self, parent: NodeId, state: S, action: S::Action) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes
            .push(MCTSNode::new(state, Some(action), Some(parent), depth));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Finds the first child of the root whose state equals `state`
    pub fn find_child_matching(&self, state: &S) -> Option<NodeId> {
        self.root_node()
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].state == *state)
    }

    /// Returns the ids from `id` up to and including the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            path.push(node);
            current = self.nodes[node.0].parent;
        }
        path
    }

    /// Makes `new_root` the root, dropping every node outside its subtree
    ///
    /// The kept nodes retain their statistics and child order. The new root loses its
    /// parent link and producing action, and depths are recomputed from it. All
    /// previously issued ids are invalidated. Returns `None` if `new_root` is unknown.
    pub fn rebase(self, new_root: NodeId) -> Option<Self> {
        if new_root.0 >= self.nodes.len() {
            return None;
        }

        let mut old: Vec<Option<MCTSNode<S>>> = self.nodes.into_iter().map(Some).collect();
        let mut nodes: Vec<MCTSNode<S>> = Vec::new();
        let mut queue = VecDeque::from([(new_root, None::<NodeId>)]);

        while let Some((old_id, parent)) = queue.pop_front() {
            let Some(mut node) = old[old_id.0].take() else {
                continue;
            };
            let id = NodeId(nodes.len());

            match parent {
                Some(p) => {
                    node.depth = nodes[p.0].depth + 1;
                    nodes[p.0].children.push(id);
                }
                None => {
                    node.depth = 0;
                    node.action = None;
                }
            }
            node.parent = parent;

            let children = std::mem::take(&mut node.children);
            queue.extend(children.into_iter().map(|child| (child, Some(id))));
            nodes.push(node);
        }

        Some(SearchTree {
            nodes,
            root: NodeId(0),
        })
    }

    /// Depth of the deepest node
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }
}
