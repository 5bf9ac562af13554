use turnwise_mcts::{
    game_state::Action,
    policy::expansion::{ExpansionPolicy, FullExpansionPolicy},
    tree::SearchTree,
    GameState, MCTSError,
};

/// A pile of tokens; each action removes one of the listed amounts
#[derive(Clone, Debug, PartialEq)]
struct Pile {
    tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Take(u32);

impl Action for Take {
    fn description(&self) -> String {
        format!("TAKE {}", self.0)
    }
}

impl GameState for Pile {
    type Action = Take;
    type Player = usize;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        (1..=3).filter(|&n| n <= self.tokens).map(Take).collect()
    }

    fn apply_action(&self, action: &Self::Action) -> Self {
        Pile {
            tokens: self.tokens - action.0,
        }
    }

    fn is_terminal(&self) -> bool {
        self.tokens == 0
    }

    fn evaluate(&self, _for_player: &usize) -> f64 {
        -(self.tokens as f64)
    }

    fn get_current_player(&self) -> usize {
        0
    }
}

/// Rejects every action at application time
#[derive(Clone, Debug, PartialEq)]
struct Stale;

impl GameState for Stale {
    type Action = Take;
    type Player = usize;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        vec![Take(1), Take(2)]
    }

    fn apply_action(&self, _action: &Self::Action) -> Self {
        Stale
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn evaluate(&self, _for_player: &usize) -> f64 {
        0.0
    }

    fn get_current_player(&self) -> usize {
        0
    }

    fn is_legal(&self, action: &Self::Action) -> bool {
        action.0 != 2
    }
}

#[test]
fn test_creates_one_child_per_legal_action_in_order() {
    let mut tree = SearchTree::new(Pile { tokens: 5 });
    let root = tree.root();

    let created = FullExpansionPolicy::new().expand(&mut tree, root).unwrap();
    assert_eq!(created, 3);
    assert_eq!(tree.len(), 4);

    let children = tree.root_node().children().to_vec();
    let actions: Vec<_> = children
        .iter()
        .map(|&id| tree.node(id).action.clone().unwrap())
        .collect();
    assert_eq!(actions, vec![Take(1), Take(2), Take(3)]);

    for (&id, expected) in children.iter().zip([4, 3, 2]) {
        let child = tree.node(id);
        assert_eq!(child.state, Pile { tokens: expected });
        assert_eq!(child.parent(), Some(root));
        assert_eq!(child.depth(), 1);
        assert_eq!(child.visits(), 0);
    }

    // The leaf keeps its own state
    assert_eq!(tree.node(root).state, Pile { tokens: 5 });
}

#[test]
fn test_expanding_twice_is_a_no_op() {
    let mut tree = SearchTree::new(Pile { tokens: 5 });
    let root = tree.root();
    let policy = FullExpansionPolicy::new();

    policy.expand(&mut tree, root).unwrap();
    assert_eq!(policy.expand(&mut tree, root).unwrap(), 0);
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_terminal_leaf_is_not_expanded() {
    let mut tree = SearchTree::new(Pile { tokens: 0 });
    let root = tree.root();

    assert_eq!(FullExpansionPolicy::new().expand(&mut tree, root).unwrap(), 0);
    assert!(tree.root_node().is_leaf());
}

#[test]
fn test_precondition_violation_leaves_tree_unchanged() {
    let mut tree = SearchTree::new(Stale);
    let root = tree.root();

    let result = FullExpansionPolicy::new().expand(&mut tree, root);
    assert_eq!(
        result,
        Err(MCTSError::ActionPreconditionViolation("TAKE 2".to_string()))
    );
    assert_eq!(tree.len(), 1);
}
