//! All solvers with a nontrivial runtime should be implemented using the
//! [`IterativeAlgorithm`] trait.
//!
//! The idea is co-operative scheduling: an algorithm does a bounded chunk of
//! work (for the branch-and-bound engine, one frontier pop and its
//! expansion) and then returns control. An external entity decides whether
//! to invoke it again, which is also the only place a wall-clock deadline or
//! a termination signal is checked.

use crate::utils::signal_handling;
use std::time::{Duration, Instant};

/// [`IterativeAlgorithm`] provides a consistent interface to execute all our
/// solvers. It does not prescribe a constructor; each solver has its own
/// parameters. Construction should be cheap and involve little computation.
///
/// As an adopter you have to implement at least
/// [`IterativeAlgorithm::execute_step`], [`IterativeAlgorithm::is_completed`]
/// and [`IterativeAlgorithm::best_known_solution`]. If your algorithm is
/// known to eventually terminate, also adopt the marker trait
/// [`TerminatingIterativeAlgorithm`].
pub trait IterativeAlgorithm<Result> {
    /// Advances the computation by one bounded unit of work.
    /// May not be called again once [`IterativeAlgorithm::is_completed`]
    /// returns true.
    fn execute_step(&mut self);

    /// Returns true iff the algorithm is completed and
    /// [`IterativeAlgorithm::execute_step`] may not be called again.
    fn is_completed(&self) -> bool;

    /// Returns the currently best known solution or None if no solution is
    /// known yet.
    fn best_known_solution(&mut self) -> Option<Result>;

    /// Keeps calling [`IterativeAlgorithm::execute_step`] until the
    /// `predicate` becomes false, a termination signal was received, or
    /// [`IterativeAlgorithm::is_completed`] becomes true. The predicate is
    /// evaluated after each iteration, i.e. a step is carried out even if
    /// the predicate always returns false.
    fn run_while<F: FnMut(&mut Self) -> bool>(&mut self, mut predicate: F) {
        while !self.is_completed() && !signal_handling::received_ctrl_c() {
            self.execute_step();

            if !predicate(self) {
                break;
            }
        }
    }

    /// Keeps calling [`IterativeAlgorithm::execute_step`] until either the
    /// timeout elapsed, a termination signal was received, or
    /// [`IterativeAlgorithm::is_completed`] is true. The timeout is
    /// guaranteed only in the sense that no further step is started after
    /// it elapsed; a step that is already running is not interrupted.
    fn run_until_timeout(&mut self, timeout: Duration) {
        let start = Instant::now();
        self.run_while(|_| start.elapsed() < timeout);
    }
}

/// Marker trait for algorithms that will eventually terminate on their own,
/// in contrast to, say, an open-ended local search. Adopt it with an empty
/// `impl` block.
pub trait TerminatingIterativeAlgorithm<Result>: IterativeAlgorithm<Result> {
    /// Execute the algorithm until it completed (or the termination signal
    /// was received) and return the solution if one was found.
    fn run_to_completion(&mut self) -> Option<Result> {
        while !self.is_completed() && !signal_handling::received_ctrl_c() {
            self.execute_step();
        }
        self.best_known_solution()
    }
}
