use crate::errors::HeuristicError;
use crate::graph::{Instance, Tour};

pub mod euler;
pub mod matching;
pub mod mst;
pub mod nearest_neighbor;
pub mod random_restart;

pub use euler::*;
pub use matching::*;
pub use mst::*;
pub use nearest_neighbor::*;
pub use random_restart::*;

/// # The MST approximation pipeline
///
/// 1. Builds a minimum spanning tree over the reachable edges
/// 2. Pairs up the tree's odd-degree vertices so every vertex of the
///    combined multigraph has even degree
/// 3. Walks an Eulerian circuit over the multigraph and shortcuts repeated
///    cities down to a Hamiltonian tour
///
/// Any stage may fail on instances with unreachable pairs; the error says
/// which one, and the caller is expected to fall back to the exact or
/// baseline solvers.
pub fn christofides(instance: &Instance) -> Result<Tour, HeuristicError> {
    let mut multigraph = minimum_spanning_tree(instance)?;

    let matching = match_odd_degree_vertices(instance, &multigraph)
        .ok_or(HeuristicError::InfeasibleMatching)?;
    multigraph.extend(matching);

    eulerian_tour(instance, &multigraph)
}
