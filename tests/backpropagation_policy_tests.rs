use turnwise_mcts::{
    game_state::Action,
    policy::backpropagation::{BackpropagationPolicy, StandardPolicy},
    tree::SearchTree,
    GameState,
};

/// Simple game state for testing
#[derive(Clone, Debug, PartialEq)]
struct TestGameState {
    depth: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestAction(u8);

impl Action for TestAction {
    fn description(&self) -> String {
        format!("MOVE {}", self.0)
    }
}

impl GameState for TestGameState {
    type Action = TestAction;
    type Player = usize;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        vec![TestAction(0), TestAction(1)]
    }

    fn apply_action(&self, _action: &Self::Action) -> Self {
        TestGameState {
            depth: self.depth + 1,
        }
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn evaluate(&self, _for_player: &usize) -> f64 {
        0.5
    }

    fn get_current_player(&self) -> usize {
        0
    }
}

#[test]
fn test_standard_policy() {
    let mut tree = SearchTree::new(TestGameState { depth: 0 });
    let root = tree.root();
    let policy = StandardPolicy::new();

    // Initial state
    assert_eq!(tree.node(root).visits(), 0);
    assert_eq!(tree.node(root).total_reward(), 0.0);

    // Update once
    policy.update_stats(tree.node_mut(root), 0.5);
    assert_eq!(tree.node(root).visits(), 1);
    assert_eq!(tree.node(root).total_reward(), 0.5);

    // Update again
    policy.update_stats(tree.node_mut(root), 0.75);
    assert_eq!(tree.node(root).visits(), 2);
    assert_eq!(tree.node(root).total_reward(), 1.25);
}

#[test]
fn test_negative_rewards_accumulate() {
    let mut tree = SearchTree::new(TestGameState { depth: 0 });
    let root = tree.root();
    let policy = StandardPolicy::new();

    policy.update_stats(tree.node_mut(root), -3.0);
    policy.update_stats(tree.node_mut(root), 1.0);

    assert_eq!(tree.node(root).total_reward(), -2.0);
    assert_eq!(tree.node(root).value(), Some(-1.0));
}

#[test]
fn test_propagate_updates_whole_chain() {
    let mut tree = SearchTree::new(TestGameState { depth: 0 });
    let root = tree.root();
    let a = tree.add_child(root, TestGameState { depth: 1 }, TestAction(0));
    let b = tree.add_child(a, TestGameState { depth: 2 }, TestAction(0));

    StandardPolicy::new().propagate(&mut tree, b, 7.5);

    for id in [root, a, b] {
        assert_eq!(tree.node(id).visits(), 1);
        assert_eq!(tree.node(id).total_reward(), 7.5);
    }
}

#[test]
fn test_propagate_leaves_siblings_untouched() {
    let mut tree = SearchTree::new(TestGameState { depth: 0 });
    let root = tree.root();
    let a = tree.add_child(root, TestGameState { depth: 1 }, TestAction(0));
    let sibling = tree.add_child(root, TestGameState { depth: 1 }, TestAction(1));
    let b = tree.add_child(a, TestGameState { depth: 2 }, TestAction(0));

    let policy = StandardPolicy::new();
    policy.propagate(&mut tree, b, 2.0);
    policy.propagate(&mut tree, a, 4.0);

    assert_eq!(tree.node(root).visits(), 2);
    assert_eq!(tree.node(root).total_reward(), 6.0);
    assert_eq!(tree.node(a).visits(), 2);
    assert_eq!(tree.node(a).total_reward(), 6.0);
    assert_eq!(tree.node(b).visits(), 1);
    assert_eq!(tree.node(b).total_reward(), 2.0);
    assert_eq!(tree.node(sibling).visits(), 0);
    assert_eq!(tree.node(sibling).value(), None);
}

#[test]
fn test_backpropagation_policy_cloning() {
    let policy = StandardPolicy::new();
    let boxed: Box<dyn BackpropagationPolicy<TestGameState>> = Box::new(policy);
    let cloned = boxed.clone_box();

    let mut tree = SearchTree::new(TestGameState { depth: 0 });
    let root = tree.root();
    cloned.propagate(&mut tree, root, 1.0);
    assert_eq!(tree.node(root).visits(), 1);
}
