use crate::errors::HeuristicError;
use crate::graph::{Edge, Instance, Node, NumNodes, Tour};

/// Turns an even-degree multigraph (spanning tree plus matching) into a
/// Hamiltonian tour: walk the edges greedily from every candidate starting
/// edge, keep the walks that traverse every edge, shortcut each to a tour
/// and return the cheapest legal one.
///
/// The greedy walk may strand itself, so every edge gets a turn as the
/// starting point; only if none of them yields a full traversal does the
/// builder give up with [`HeuristicError::NoEulerianTraversal`].
pub fn eulerian_tour(instance: &Instance, multigraph: &[Edge]) -> Result<Tour, HeuristicError> {
    let mut best: Option<Tour> = None;

    for start in 0..multigraph.len() {
        let Some(walk) = walk_all_edges(multigraph, start) else {
            continue;
        };

        let route = shortcut(instance.number_of_cities(), &walk);
        let tour = Tour::from_route(instance, route);
        if tour.is_legal() && best.as_ref().is_none_or(|b| tour.cost() < b.cost()) {
            best = Some(tour);
        }
    }

    best.ok_or(HeuristicError::NoEulerianTraversal)
}

/// Greedy edge walk from `edges[start]`: keep extending by any unvisited
/// edge incident to the walk's last city, in either orientation, until all
/// edges are covered or the walk is stuck. Only a full traversal counts.
fn walk_all_edges(edges: &[Edge], start: usize) -> Option<Vec<Node>> {
    let mut visited = vec![false; edges.len()];
    visited[start] = true;
    let mut walk = vec![edges[start].u, edges[start].v];
    let mut last = edges[start].v;
    let mut remaining = edges.len() - 1;

    'extend: while remaining > 0 {
        for (i, edge) in edges.iter().enumerate() {
            if visited[i] || !edge.touches(last) {
                continue;
            }
            visited[i] = true;
            last = edge.other_endpoint(last);
            walk.push(last);
            remaining -= 1;
            continue 'extend;
        }
        return None;
    }

    Some(walk)
}

/// Shortcutting: keep only the first occurrence of every city. The walk
/// covers a spanning edge set, so the result visits all cities.
fn shortcut(n: NumNodes, walk: &[Node]) -> Vec<Node> {
    let mut seen = vec![false; n as usize];
    walk.iter()
        .copied()
        .filter(|&city| !std::mem::replace(&mut seen[city as usize], true))
        .collect()
}
