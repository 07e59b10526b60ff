use crate::graph::{Cost, CostMatrix, Node};
use smallvec::SmallVec;

/// Partial route of a search node. `route[0]` is always city 0.
pub type Route = SmallVec<[Node; 16]>;

/// Scaling applied to a node's bound when deriving its frontier priority.
/// Dividing by a quantity that grows with the route depth favors nodes
/// closer to a complete tour among nodes of similar bound.
///
/// [`DepthScaling::LegacyXor`] reproduces a historical rule that combined
/// bound and depth with a bitwise exclusive-or instead of a square. Whether
/// that was ever intended is unclear, so both rules stay selectable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepthScaling {
    /// `bound / (depth XOR 2)`. At depth 2 the divisor is zero; such nodes
    /// are ranked last instead of letting a NaN poison the heap order.
    LegacyXor,
    /// `bound / depth^2`
    #[default]
    DepthSquared,
}

impl DepthScaling {
    pub fn priority_of(self, bound: Cost, depth: usize) -> Cost {
        let divisor = match self {
            DepthScaling::LegacyXor => (depth ^ 2) as Cost,
            DepthScaling::DepthSquared => (depth * depth) as Cost,
        };
        if divisor <= 0.0 {
            Cost::INFINITY
        } else {
            bound / divisor
        }
    }
}

/// One partial tour of the best-first search. Owns its reduced cost matrix
/// exclusively: a child always works on a copy, and a parent's matrix is
/// never touched after a copy was taken.
///
/// `bound` is a lower bound on the cost of any completion of the route and
/// never decreases from parent to child.
#[derive(Clone, Debug)]
pub struct SearchNode {
    route: Route,
    matrix: CostMatrix,
    bound: Cost,
    priority: Cost,
}

impl SearchNode {
    /// The root node: route `[0]`, fully reduced matrix, bound equal to the
    /// reduction increment.
    pub fn root(mut matrix: CostMatrix, scaling: DepthScaling) -> Self {
        let bound = matrix.reduce();
        let mut route = Route::new();
        route.push(0);
        let priority = scaling.priority_of(bound, route.len());

        Self {
            route,
            matrix,
            bound,
            priority,
        }
    }

    /// Derives the child that extends the route by `to`: copies the matrix,
    /// excludes the edges invalidated by the transition, re-reduces, and
    /// accumulates the reduction increment into the bound.
    pub fn child(&self, to: Node, scaling: DepthScaling) -> Self {
        debug_assert!(!self.contains(to));

        let mut matrix = self.matrix.clone();
        matrix.visit_from_to(self.last_city(), to);
        let bound = self.bound + matrix.reduce();

        let mut route = self.route.clone();
        route.push(to);
        let priority = scaling.priority_of(bound, route.len());

        Self {
            route,
            matrix,
            bound,
            priority,
        }
    }

    pub fn route(&self) -> &[Node] {
        &self.route
    }

    pub fn depth(&self) -> usize {
        self.route.len()
    }

    pub fn last_city(&self) -> Node {
        self.route[self.route.len() - 1]
    }

    pub fn contains(&self, city: Node) -> bool {
        self.route.contains(&city)
    }

    pub fn bound(&self) -> Cost {
        self.bound
    }

    pub fn priority(&self) -> Cost {
        self.priority
    }

    /// Cost of closing the tour from the last city back to city 0, as seen
    /// by this node's matrix. Infinite iff the closing edge is excluded or
    /// was never there.
    pub fn closing_cost(&self) -> Cost {
        self.matrix.cost(self.last_city(), 0)
    }
}
