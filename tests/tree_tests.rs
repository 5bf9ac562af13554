use turnwise_mcts::{game_state::Action, tree::SearchTree, GameState};

/// States are labelled by the path of moves that reached them
#[derive(Clone, Debug, PartialEq)]
struct PathState(Vec<u8>);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Move(u8);

impl Action for Move {
    fn description(&self) -> String {
        format!("MOVE {}", self.0)
    }
}

impl GameState for PathState {
    type Action = Move;
    type Player = usize;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        vec![Move(1), Move(2)]
    }

    fn apply_action(&self, action: &Self::Action) -> Self {
        let mut path = self.0.clone();
        path.push(action.0);
        PathState(path)
    }

    fn is_terminal(&self) -> bool {
        self.0.len() >= 4
    }

    fn evaluate(&self, _for_player: &usize) -> f64 {
        self.0.iter().map(|&m| m as f64).sum()
    }

    fn get_current_player(&self) -> usize {
        0
    }
}

fn state(path: &[u8]) -> PathState {
    PathState(path.to_vec())
}

#[test]
fn test_new_tree_has_bare_root() {
    let tree = SearchTree::new(state(&[]));
    let root = tree.root_node();

    assert_eq!(tree.len(), 1);
    assert!(root.action.is_none());
    assert!(root.parent().is_none());
    assert!(root.is_leaf());
    assert_eq!(root.visits(), 0);
    assert_eq!(root.value(), None);
}

#[test]
fn test_find_child_matching_compares_values() {
    let mut tree = SearchTree::new(state(&[]));
    let root = tree.root();
    let _s1 = tree.add_child(root, state(&[1]), Move(1));
    let s2 = tree.add_child(root, state(&[2]), Move(2));

    // A separately built but equal value is found
    assert_eq!(tree.find_child_matching(&state(&[]).apply_action(&Move(2))), Some(s2));
    assert_eq!(tree.find_child_matching(&state(&[3])), None);
    // Only root children are considered
    assert_eq!(tree.find_child_matching(&state(&[])), None);
}

#[test]
fn test_rebase_keeps_subtree_and_statistics() {
    let mut tree = SearchTree::new(state(&[]));
    let root = tree.root();
    let s1 = tree.add_child(root, state(&[1]), Move(1));
    let s2 = tree.add_child(root, state(&[2]), Move(2));
    let s1_child = tree.add_child(s1, state(&[1, 1]), Move(1));
    let s2_a = tree.add_child(s2, state(&[2, 1]), Move(1));
    let s2_b = tree.add_child(s2, state(&[2, 2]), Move(2));
    let s2_a_a = tree.add_child(s2_a, state(&[2, 1, 1]), Move(1));

    for (id, visits, reward) in [
        (root, 9, 1.0),
        (s1, 4, 1.0),
        (s1_child, 2, 1.0),
        (s2, 5, 2.0),
        (s2_a, 3, 2.0),
        (s2_b, 1, 2.0),
        (s2_a_a, 1, 3.0),
    ] {
        let node = tree.node_mut(id);
        for _ in 0..visits {
            node.increment_visits();
            node.add_reward(reward);
        }
    }

    let rebased = tree.rebase(s2).unwrap();

    assert_eq!(rebased.len(), 4);
    let new_root = rebased.root_node();
    assert_eq!(new_root.state, state(&[2]));
    assert_eq!(new_root.visits(), 5);
    assert_eq!(new_root.total_reward(), 10.0);
    assert!(new_root.action.is_none());
    assert!(new_root.parent().is_none());
    assert_eq!(new_root.depth(), 0);

    // Child order and statistics survive
    let children = new_root.children().to_vec();
    assert_eq!(children.len(), 2);
    assert_eq!(rebased.node(children[0]).state, state(&[2, 1]));
    assert_eq!(rebased.node(children[0]).visits(), 3);
    assert_eq!(rebased.node(children[0]).action, Some(Move(1)));
    assert_eq!(rebased.node(children[0]).parent(), Some(rebased.root()));
    assert_eq!(rebased.node(children[1]).state, state(&[2, 2]));
    assert_eq!(rebased.node(children[1]).depth(), 1);

    let grandchild = rebased.node(children[0]).children()[0];
    assert_eq!(rebased.node(grandchild).state, state(&[2, 1, 1]));
    assert_eq!(rebased.node(grandchild).depth(), 2);
    assert_eq!(rebased.node(grandchild).total_reward(), 3.0);
    assert_eq!(rebased.max_depth(), 2);

    // Nothing from the discarded branch is reachable
    assert!(rebased.iter().all(|(_, node)| node.state.0.first() == Some(&2)));
}

#[test]
fn test_rebase_unknown_node_fails() {
    let tree = SearchTree::new(state(&[]));
    let other = {
        let mut bigger = SearchTree::new(state(&[]));
        let root = bigger.root();
        bigger.add_child(root, state(&[1]), Move(1))
    };

    assert!(tree.rebase(other).is_none());
}

#[test]
fn test_path_to_root() {
    let mut tree = SearchTree::new(state(&[]));
    let root = tree.root();
    let a = tree.add_child(root, state(&[1]), Move(1));
    let b = tree.add_child(a, state(&[1, 2]), Move(2));

    assert_eq!(tree.path_to_root(b), vec![b, a, root]);
    assert_eq!(tree.path_to_root(root), vec![root]);
}
