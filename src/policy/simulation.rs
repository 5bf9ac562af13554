//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies estimate the value of a position, usually by playing it out.

use rand::RngCore;

use crate::{game_state::GameState, Result};

/// Trait for policies that simulate games
///
/// The random source is owned by the driver and passed in, so a seeded driver makes
/// every playout reproducible.
pub trait SimulationPolicy<S: GameState> {
    /// Simulates a game from `state` and returns the reward scored for `for_player`
    ///
    /// The driver passes the player to move at the search root, so every reward in one
    /// tree is measured from the searching agent's side.
    fn simulate(
        &self,
        state: &S,
        for_player: &S::Player,
        rng: &mut dyn RngCore,
    ) -> Result<f64>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Random simulation policy
///
/// Plays uniformly random legal actions from a private copy of the state until the
/// game ends or `max_depth` plies have been played, then scores the final position
/// for the requested player.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Maximum number of plies per playout
    pub max_depth: usize,
}

impl RandomPolicy {
    /// Creates a new random policy with the given ply cap
    pub fn new(max_depth: usize) -> Self {
        RandomPolicy { max_depth }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(20)
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(
        &self,
        state: &S,
        for_player: &S::Player,
        rng: &mut dyn RngCore,
    ) -> Result<f64> {
        let (reward, _trace) = state.simulate_random_playout(for_player, self.max_depth, rng)?;
        Ok(reward)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(
        &self,
        state: &S,
        for_player: &S::Player,
        rng: &mut dyn RngCore,
    ) -> Result<f64> {
        (**self).simulate(state, for_player, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}
