//! Traits defining game state representation for MCTS.
//!
//! The GameState trait is the only thing the search needs from a rule-set. The search
//! never looks inside a state: it enumerates actions, applies them, asks whether the
//! game is over and asks for a score.

use std::fmt::Debug;

use rand::{seq::SliceRandom, Rng};

use crate::{MCTSError, Result};

/// Trait for actions that can be taken in a game
///
/// Actions are opaque to the search. The description is what a caller prints when
/// it commits to the action.
pub trait Action: Clone + Debug + PartialEq {
    /// Returns a human-readable description of this action
    fn description(&self) -> String;
}

/// Trait for players in a game
pub trait Player: Clone + Debug + PartialEq {}

/// Trait defining the game state interface required for MCTS
///
/// States are values: `apply_action` returns a new state and leaves `self` untouched,
/// so no two nodes of the tree ever share a position. Equality must compare the whole
/// position, since it decides whether the tree can be reused on the next turn.
pub trait GameState: Clone + PartialEq {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the legal actions from this state, in a stable order
    ///
    /// Children are created in this order, and selection ties are broken by it.
    ///
    /// # Example
    ///
    /// ```
    /// # use turnwise_mcts::{GameState, Action};
    /// # #[derive(Debug, Clone, PartialEq)]
    /// # struct MyAction(usize);
    /// # impl Action for MyAction { fn description(&self) -> String { self.0.to_string() } }
    /// # #[derive(Clone, PartialEq)]
    /// # struct MyGame;
    /// # impl GameState for MyGame {
    /// # type Action = MyAction;
    /// # type Player = usize;
    /// fn get_legal_actions(&self) -> Vec<MyAction> {
    ///     vec![MyAction(0), MyAction(1), MyAction(2)]
    /// }
    /// # fn apply_action(&self, _: &MyAction) -> Self { self.clone() }
    /// # fn is_terminal(&self) -> bool { false }
    /// # fn evaluate(&self, _: &usize) -> f64 { 0.0 }
    /// # fn get_current_player(&self) -> usize { 0 }
    /// # }
    /// ```
    fn get_legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action, returning the resulting state
    ///
    /// Must not modify `self`. The action is one of `self.get_legal_actions()`.
    fn apply_action(&self, action: &Self::Action) -> Self;

    /// Returns true if this state is terminal (game over)
    fn is_terminal(&self) -> bool;

    /// Scores this state from the perspective of the given player
    ///
    /// The score does not need to be bounded or to be a win/loss indicator, but it must
    /// grow with real progress in the game: averages of it drive every UCB1 comparison.
    fn evaluate(&self, for_player: &Self::Player) -> f64;

    /// Returns the player whose actions are being searched from this state
    fn get_current_player(&self) -> Self::Player;

    /// Returns true if `action` may be applied to this state
    ///
    /// The default checks membership in `get_legal_actions()`. Expansion calls this once
    /// per child, so the default makes expanding a node quadratic in its action count;
    /// rule-sets with a direct precondition test should override it.
    fn is_legal(&self, action: &Self::Action) -> bool {
        self.get_legal_actions().contains(action)
    }

    /// Applies an action after checking its precondition
    fn try_apply_action(&self, action: &Self::Action) -> Result<Self> {
        if !self.is_legal(action) {
            return Err(MCTSError::ActionPreconditionViolation(action.description()));
        }
        Ok(self.apply_action(action))
    }

    /// Plays uniformly random actions from this state for at most `max_depth` plies
    ///
    /// Stops early on a terminal state or a state with no legal actions. Returns the
    /// score of the final state for `for_player` and the actions that were played.
    /// Actions are drawn from `get_legal_actions()` and applied without a further
    /// `is_legal` check.
    fn simulate_random_playout<R: Rng + ?Sized>(
        &self,
        for_player: &Self::Player,
        max_depth: usize,
        rng: &mut R,
    ) -> Result<(f64, Vec<Self::Action>)> {
        let mut current_state = self.clone();
        let mut trace = Vec::new();

        while !current_state.is_terminal() && trace.len() < max_depth {
            let legal_actions = current_state.get_legal_actions();
            let Some(action) = legal_actions.choose(rng) else {
                break;
            };

            current_state = current_state.apply_action(action);
            trace.push(action.clone());
        }

        Ok((current_state.evaluate(for_player), trace))
    }
}

impl Player for usize {}
impl Player for i32 {}
impl Player for u8 {}
impl Player for char {}
impl Player for String {}

/// Unit marker for games with no explicit player representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoPlayer;

impl Player for NoPlayer {}
