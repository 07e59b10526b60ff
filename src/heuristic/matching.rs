use crate::graph::{Edge, Instance, Node, NumNodes};
use fxhash::FxHashSet;

/// Vertices touched by an odd number of the given edges.
pub fn odd_degree_vertices(n: NumNodes, edges: &[Edge]) -> Vec<Node> {
    let mut degree = vec![0u32; n as usize];
    for edge in edges {
        degree[edge.u as usize] += 1;
        degree[edge.v as usize] += 1;
    }

    (0..n).filter(|&c| degree[c as usize] % 2 == 1).collect()
}

/// Pairs up the odd-degree vertices of `tree` so that the combined
/// multigraph has even degree everywhere. A pair is admissible iff it is
/// reachable and does not duplicate a tree edge. Returns None when no
/// perfect matching exists under these constraints, which the caller must
/// treat as "heuristic unavailable", not as a fatal error.
pub fn match_odd_degree_vertices(instance: &Instance, tree: &[Edge]) -> Option<Vec<Edge>> {
    let odd = odd_degree_vertices(instance.number_of_cities(), tree);
    // every edge set has an even number of odd-degree vertices
    debug_assert_eq!(odd.len() % 2, 0);

    let tree_pairs: FxHashSet<(Node, Node)> = tree
        .iter()
        .flat_map(|e| [(e.u, e.v), (e.v, e.u)])
        .collect();

    let mut matched = vec![false; odd.len()];
    let mut pairs = Vec::with_capacity(odd.len() / 2);
    pair_remaining(instance, &odd, &tree_pairs, &mut matched, &mut pairs).then_some(pairs)
}

/// Backtracking search: the first unmatched vertex tries every other
/// unmatched partner in turn; on failure of the recursive call the pair is
/// undone and the next partner tried. Exhausting all partners reports
/// failure to the caller.
fn pair_remaining(
    instance: &Instance,
    odd: &[Node],
    tree_pairs: &FxHashSet<(Node, Node)>,
    matched: &mut [bool],
    pairs: &mut Vec<Edge>,
) -> bool {
    let Some(first) = matched.iter().position(|&m| !m) else {
        return true;
    };
    let u = odd[first];
    matched[first] = true;

    for partner in first + 1..odd.len() {
        if matched[partner] {
            continue;
        }
        let v = odd[partner];
        if tree_pairs.contains(&(u, v)) {
            continue;
        }
        let cost = instance.cost(u, v);
        if !cost.is_finite() {
            continue;
        }

        matched[partner] = true;
        pairs.push(Edge::new(u, v, cost));

        if pair_remaining(instance, odd, tree_pairs, matched, pairs) {
            return true;
        }

        pairs.pop();
        matched[partner] = false;
    }

    matched[first] = false;
    false
}
