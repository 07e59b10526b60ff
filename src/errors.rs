use crate::graph::{Cost, Node};
use std::error::Error;
use thiserror::Error;

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Rejections raised while constructing a problem instance, before any
/// search begins.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InstanceError {
    #[error("a tour needs at least two cities, got {0}")]
    TooFewCities(usize),

    #[error("negative cost {cost} on edge {from} -> {to}")]
    NegativeCost { from: Node, to: Node, cost: Cost },

    #[error("cost on edge {from} -> {to} is not a number")]
    NotANumber { from: Node, to: Node },
}

/// Fatal conditions of a single exact solve. The solve is aborted but the
/// incumbent found so far is still reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("frontier capacity of {0} states exhausted")]
    ResourceExhausted(usize),
}

/// Failures of the approximation pipeline. All of them are local to the
/// heuristic; callers are expected to fall back to the exact or baseline
/// solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeuristicError {
    #[error("instance is disconnected: spanning tree stopped at {found} of {required} edges")]
    Disconnected { found: usize, required: usize },

    #[error("no perfect matching among the odd-degree spanning-tree vertices")]
    InfeasibleMatching,

    #[error("no starting edge admits a full Eulerian traversal")]
    NoEulerianTraversal,
}

/// Violations of the tour well-formedness invariant (a cyclic permutation
/// of all city indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("city {0} outside of the instance")]
    UnknownCity(Node),

    #[error("city {0} visited more than once")]
    RevisitedCity(Node),
}
