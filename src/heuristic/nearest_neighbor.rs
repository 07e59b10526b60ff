use crate::graph::{Cost, Instance, Node, Tour};

/// Greedy construction: starting from each city in turn, repeatedly chain
/// to the cheapest reachable unvisited city. Returns the best legal tour
/// over all start cities, if any.
pub fn nearest_neighbor(instance: &Instance) -> Option<Tour> {
    let mut best: Option<Tour> = None;

    for start in 0..instance.number_of_cities() {
        let Some(route) = chain_from(instance, start) else {
            continue;
        };

        let tour = Tour::from_route(instance, route);
        if tour.is_legal() && best.as_ref().is_none_or(|b| tour.cost() < b.cost()) {
            best = Some(tour);
        }
    }

    best
}

/// The nearest-neighbor chain from `start`, or None if it gets stuck on
/// unreachable remainders.
fn chain_from(instance: &Instance, start: Node) -> Option<Vec<Node>> {
    let n = instance.len();
    let mut visited = vec![false; n];
    visited[start as usize] = true;
    let mut route = Vec::with_capacity(n);
    route.push(start);

    for _ in 1..n {
        let here = route[route.len() - 1];

        let next = (0..instance.number_of_cities())
            .filter(|&c| !visited[c as usize] && instance.cost(here, c).is_finite())
            .min_by(|&a, &b| instance.cost(here, a).total_cmp(&instance.cost(here, b)))?;

        visited[next as usize] = true;
        route.push(next);
    }

    Some(route)
}
