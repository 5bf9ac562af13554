//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the search driver, which owns the tree across decisions,
//! continues it from turn to turn, and runs the four phases of selection, expansion,
//! simulation and backpropagation under a time budget.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game_state::{Action, GameState},
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        expansion::{ExpansionPolicy, FullExpansionPolicy},
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{MCTSNode, SearchTree},
    MCTSError, Result,
};

/// The Monte Carlo Tree Search driver
///
/// Create one driver per game and keep it for the whole game: each call to
/// [`run_simulations`](MCTS::run_simulations) continues the tree built by the previous
/// call when the observed position is one the search already modeled.
pub struct MCTS<S: GameState> {
    /// Search tree, absent until the first decision
    tree: Option<SearchTree<S>>,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last decision
    statistics: SearchStatistics,

    /// Random source for child picks and playouts
    rng: StdRng,

    selection_policy: Box<dyn SelectionPolicy<S>>,
    expansion_policy: Box<dyn ExpansionPolicy<S>>,
    simulation_policy: Box<dyn SimulationPolicy<S>>,
    backpropagation_policy: Box<dyn BackpropagationPolicy<S>>,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a driver with no tree and the standard policies for `config`
    pub fn new(config: MCTSConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let selection_policy: Box<dyn SelectionPolicy<S>> =
            Box::new(UCB1Policy::new(config.exploration_constant));

        let expansion_policy: Box<dyn ExpansionPolicy<S>> = Box::new(FullExpansionPolicy::new());

        let simulation_policy: Box<dyn SimulationPolicy<S>> =
            Box::new(RandomPolicy::new(config.max_playout_depth));

        let backpropagation_policy: Box<dyn BackpropagationPolicy<S>> =
            Box::new(StandardPolicy::new());

        MCTS {
            tree: None,
            config,
            statistics: SearchStatistics::new(),
            rng,
            selection_policy,
            expansion_policy,
            simulation_policy,
            backpropagation_policy,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the expansion policy to use
    pub fn with_expansion_policy<P: ExpansionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.expansion_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Starts the driver from an existing tree
    pub fn with_tree(mut self, tree: SearchTree<S>) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Returns the current tree, if any decision has been made
    pub fn tree(&self) -> Option<&SearchTree<S>> {
        self.tree.as_ref()
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the statistics of the last decision
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Drops the tree; the next decision starts from scratch
    pub fn reset(&mut self) {
        self.tree = None;
    }

    /// Searches from `observed` until `budget` elapses
    ///
    /// Continues the previous tree when one of its root's children holds a state equal
    /// to `observed`, and otherwise starts a fresh tree. A zero budget performs no
    /// iterations but still rebases, so [`best_action`](MCTS::best_action) can answer
    /// from carried-over statistics.
    pub fn run_simulations(&mut self, observed: S, budget: Duration) -> Result<()> {
        self.config.validate()?;

        let start_time = Instant::now();
        self.statistics = SearchStatistics::new();
        let searcher = observed.get_current_player();
        self.continue_or_replace_tree(observed);

        let max_iterations = self.config.max_iterations.unwrap_or(usize::MAX);
        let mut iterations = 0;
        let outcome = loop {
            if iterations >= max_iterations {
                break Ok(());
            }
            if start_time.elapsed() >= budget {
                self.statistics.stopped_by_time = true;
                break Ok(());
            }
            if let Err(e) = self.execute_iteration(&searcher) {
                break Err(e);
            }
            iterations += 1;
        };

        self.record_statistics(iterations, start_time);
        if let Err(e) = &outcome {
            warn!("Search stopped after {} iterations: {}", iterations, e);
            return outcome;
        }

        self.log_root_children();
        info!(
            "Ran {} iterations in {:?}, tree holds {} nodes",
            iterations,
            self.statistics.total_time,
            self.statistics.tree_size
        );
        Ok(())
    }

    /// Same as [`run_simulations`](MCTS::run_simulations) with a budget in milliseconds
    ///
    /// Zero and negative budgets run no iterations.
    pub fn run_simulations_ms(&mut self, observed: S, budget_ms: i64) -> Result<()> {
        let budget = Duration::from_millis(budget_ms.max(0) as u64);
        self.run_simulations(observed, budget)
    }

    /// Runs a search from `observed` and returns the chosen action
    pub fn decide(&mut self, observed: S, budget: Duration) -> Result<S::Action> {
        self.run_simulations(observed, budget)?;
        self.best_action()
    }

    /// Returns the action of the best root child
    ///
    /// With the default [`BestChildCriteria::HighestValue`] this is the child with the
    /// highest average reward, without any exploration bonus. Children that were never
    /// simulated rank below every simulated child. Ties go to the child created first.
    pub fn best_action(&self) -> Result<S::Action> {
        let tree = self.tree.as_ref().ok_or(MCTSError::NoLegalActions)?;
        let children = tree.root_node().children();
        let first = *children.first().ok_or(MCTSError::NoLegalActions)?;

        let mut best = first;
        let mut best_key = self.child_key(tree.node(first));
        for &child in &children[1..] {
            let key = self.child_key(tree.node(child));
            if key > best_key {
                best = child;
                best_key = key;
            }
        }

        tree.node(best).action.clone().ok_or(MCTSError::NoLegalActions)
    }

    /// Returns `(action, total reward, visits)` for each root child in creation order
    pub fn root_child_stats(&self) -> Vec<(S::Action, f64, u64)> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };

        tree.root_node()
            .children()
            .iter()
            .map(|&id| tree.node(id))
            .filter_map(|child| {
                let action = child.action.clone()?;
                Some((action, child.total_reward(), child.visits()))
            })
            .collect()
    }

    /// Returns a visualization of the search tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        let mut result = String::new();
        if let Some(tree) = &self.tree {
            Self::visualize_node(tree, tree.root_node(), max_depth, &mut result);
        }
        result
    }

    fn visualize_node(
        tree: &SearchTree<S>,
        node: &MCTSNode<S>,
        max_depth: usize,
        output: &mut String,
    ) {
        let indent = "  ".repeat(node.depth());
        let action_str = match &node.action {
            Some(action) => action.description(),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, total: {:.3}, value: {:.3})\n",
            indent,
            action_str,
            node.visits(),
            node.total_reward(),
            node.value().unwrap_or(0.0)
        ));

        if node.depth() >= max_depth {
            return;
        }
        for &child in node.children() {
            Self::visualize_node(tree, tree.node(child), max_depth, output);
        }
    }

    fn child_key(&self, child: &MCTSNode<S>) -> f64 {
        match self.config.best_child_criteria {
            BestChildCriteria::HighestValue => child.value().unwrap_or(f64::NEG_INFINITY),
            BestChildCriteria::MostVisits => child.visits() as f64,
        }
    }

    /// Rebases onto the child matching `observed`, or starts a new single-node tree
    fn continue_or_replace_tree(&mut self, observed: S) {
        let previous = self.tree.take();

        let continued = match previous {
            Some(tree) if self.config.reuse_tree => tree
                .find_child_matching(&observed)
                .and_then(|child| tree.rebase(child)),
            _ => None,
        };

        match continued {
            Some(tree) => {
                let visits = tree.root_node().visits();
                info!(
                    "Continuing previous tree: {} nodes, {} root visits",
                    tree.len(),
                    visits
                );
                self.statistics.reused_tree = true;
                self.statistics.reused_visits = visits;
                self.tree = Some(tree);
            }
            None => {
                info!("Creating new tree");
                self.tree = Some(SearchTree::new(observed));
            }
        }
    }

    fn record_statistics(&mut self, iterations: usize, start_time: Instant) {
        self.statistics.iterations = iterations;
        self.statistics.total_time = start_time.elapsed();
        if let Some(tree) = &self.tree {
            self.statistics.tree_size = tree.len();
            self.statistics.max_depth = tree.max_depth();
            self.statistics.root_visits = tree.root_node().visits();
        }
    }

    /// Execute a single iteration of the MCTS algorithm, scoring for `searcher`
    fn execute_iteration(&mut self, searcher: &S::Player) -> Result<()> {
        let Some(tree) = self.tree.as_mut() else {
            return Ok(());
        };

        // 1. Selection
        let root = tree.root();
        let leaf = self.selection_policy.select_leaf(tree, root);

        // 2. Expansion
        self.expansion_policy.expand(tree, leaf)?;

        // 3. Simulation, from a random new child when there is one
        let simulated = tree
            .node(leaf)
            .children()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(leaf);
        let reward = self
            .simulation_policy
            .simulate(&tree.node(simulated).state, searcher, &mut self.rng)?;

        trace!(
            "Simulated node {} at depth {} with reward {}",
            simulated,
            tree.node(simulated).depth(),
            reward
        );

        // 4. Backpropagation
        self.backpropagation_policy.propagate(tree, simulated, reward);

        Ok(())
    }

    fn log_root_children(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for (action, total, visits) in self.root_child_stats() {
            debug!(
                "child: {}, total score: {}, visits: {}",
                action.description(),
                total,
                visits
            );
        }
    }
}
