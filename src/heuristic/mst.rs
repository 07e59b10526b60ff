use crate::errors::HeuristicError;
use crate::graph::{Edge, Instance, Node, cmp_by_cost};
use std::{cmp::Ordering, collections::BinaryHeap};

/// Heap adapter flipping [`cmp_by_cost`] so `BinaryHeap` extracts the
/// globally cheapest candidate first.
struct Candidate(Edge);

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_by_cost(&other.0, &self.0)
    }
}

/// Prim-style minimum spanning tree over the reachable edges, grown from
/// city 0. Candidate edges from tree to non-tree vertices are extracted
/// cheapest-first; stale candidates whose destination joined the tree in
/// the meantime are discarded on extraction.
///
/// Fewer than `n - 1` collected edges mean the instance is disconnected
/// under its reachability constraints, reported as
/// [`HeuristicError::Disconnected`].
pub fn minimum_spanning_tree(instance: &Instance) -> Result<Vec<Edge>, HeuristicError> {
    let n = instance.len();
    let mut in_tree = vec![false; n];
    let mut queue = BinaryHeap::new();
    let mut edges = Vec::with_capacity(n - 1);

    in_tree[0] = true;
    enqueue_candidates(instance, 0, &in_tree, &mut queue);

    while let Some(Candidate(edge)) = queue.pop() {
        if std::mem::replace(&mut in_tree[edge.v as usize], true) {
            continue;
        }

        edges.push(edge);
        if edges.len() == n - 1 {
            break;
        }
        enqueue_candidates(instance, edge.v, &in_tree, &mut queue);
    }

    if edges.len() < n - 1 {
        return Err(HeuristicError::Disconnected {
            found: edges.len(),
            required: n - 1,
        });
    }

    Ok(edges)
}

fn enqueue_candidates(
    instance: &Instance,
    from: Node,
    in_tree: &[bool],
    queue: &mut BinaryHeap<Candidate>,
) {
    for to in 0..instance.number_of_cities() {
        if in_tree[to as usize] {
            continue;
        }
        let cost = instance.cost(from, to);
        if cost.is_finite() {
            queue.push(Candidate(Edge::new(from, to, cost)));
        }
    }
}
