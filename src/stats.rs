//! Per-decision search statistics
//!
//! The driver replaces its [`SearchStatistics`] at the start of every
//! `run_simulations` call, so the numbers always describe the latest decision only.
//! Visits carried over from an earlier turn are reported separately from the
//! iterations run for this one.

use std::time::Duration;

/// What one decision cost and how much of its evidence came from earlier turns
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Iterations run for this decision
    pub iterations: usize,

    /// Wall time from the start of the call to the end of the last iteration
    pub total_time: Duration,

    /// Nodes in the tree when the search stopped, carried-over nodes included
    pub tree_size: usize,

    /// Depth of the deepest node below the root
    pub max_depth: usize,

    /// Root visits when the search stopped
    pub root_visits: u64,

    /// Whether the previous tree was continued from a matching child
    pub reused_tree: bool,

    /// Root visits inherited from the previous decision
    pub reused_visits: u64,

    /// Whether the time budget, rather than the iteration cap, ended the search
    pub stopped_by_time: bool,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean wall time of one iteration, in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        match self.iterations {
            0 => 0.0,
            n => self.total_time.as_micros() as f64 / n as f64,
        }
    }

    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }

    /// Fraction of the root's visits that were inherited rather than searched now
    ///
    /// Zero for a fresh tree or an unvisited root.
    pub fn reuse_share(&self) -> f64 {
        if self.root_visits == 0 {
            return 0.0;
        }
        self.reused_visits as f64 / self.root_visits as f64
    }

    /// Multi-line report of the decision
    pub fn summary(&self) -> String {
        let ended_by = if self.stopped_by_time {
            "time budget"
        } else {
            "iteration cap"
        };
        format!(
            "Decision search:\n\
             - Iterations: {} in {:.3} s ({:.1}/s, {:.3} µs each)\n\
             - Tree: {} nodes, depth {}\n\
             - Root visits: {} ({} carried over, {:.1}%)\n\
             - Ended by: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.iterations_per_second(),
            self.avg_time_per_iteration_us(),
            self.tree_size,
            self.max_depth,
            self.root_visits,
            self.reused_visits,
            self.reuse_share() * 100.0,
            ended_by
        )
    }
}
