use super::*;
use std::fmt;

/// Dense row-major cost matrix. The diagonal is pinned to infinity (no
/// self-loop). Each search node owns its matrix exclusively; children work
/// on a clone, never on the parent's buffer.
#[derive(Clone, PartialEq)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<Cost>,
}

impl CostMatrix {
    /// Snapshots the full matrix of an oracle. The diagonal is never
    /// queried and set to infinity.
    pub fn from_oracle(oracle: &impl CostOracle) -> Self {
        let n = oracle.number_of_cities() as usize;
        let mut costs = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                costs.push(if i == j {
                    Cost::INFINITY
                } else {
                    oracle.cost(i as Node, j as Node)
                });
            }
        }
        Self { n, costs }
    }

    /// Builds a matrix from explicit rows. Rows must form a square matrix;
    /// diagonal entries are overridden with infinity.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Self {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), n, "matrix must be square");
            for (j, cost) in row.into_iter().enumerate() {
                costs.push(if i == j { Cost::INFINITY } else { cost });
            }
        }
        Self { n, costs }
    }

    pub fn number_of_cities(&self) -> NumNodes {
        self.n as NumNodes
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn cost(&self, from: Node, to: Node) -> Cost {
        self.costs[from as usize * self.n + to as usize]
    }

    fn row_mut(&mut self, i: usize) -> &mut [Cost] {
        &mut self.costs[i * self.n..(i + 1) * self.n]
    }

    /// Row/column-minimum reduction. Subtracts each row's minimum finite
    /// entry from the row's finite entries, then the same over columns, and
    /// returns the sum of the subtracted minima. Rows and columns without a
    /// finite entry are left untouched and contribute nothing. Afterwards
    /// every not-fully-infinite row and column contains a zero.
    ///
    /// The returned increment is an admissible addition to a partial-tour
    /// bound: every completion must leave and enter each city exactly once.
    pub fn reduce(&mut self) -> Cost {
        let mut increment = 0.0;

        for i in 0..self.n {
            let row = self.row_mut(i);
            let min = row.iter().copied().fold(Cost::INFINITY, Cost::min);
            if !min.is_finite() || min == 0.0 {
                continue;
            }
            increment += min;
            for cost in row.iter_mut().filter(|c| c.is_finite()) {
                *cost -= min;
            }
        }

        for j in 0..self.n {
            let min = (0..self.n)
                .map(|i| self.costs[i * self.n + j])
                .fold(Cost::INFINITY, Cost::min);
            if !min.is_finite() || min == 0.0 {
                continue;
            }
            increment += min;
            for i in 0..self.n {
                let cost = &mut self.costs[i * self.n + j];
                if cost.is_finite() {
                    *cost -= min;
                }
            }
        }

        increment
    }

    /// Excludes all edges made illegal by taking the transition
    /// `from -> to`: `from` can no longer leave elsewhere, `to` can no
    /// longer be entered from elsewhere, and the immediate back-edge
    /// `to -> from` would close a two-city sub-cycle. Apply before
    /// re-reducing when deriving a child node.
    pub fn visit_from_to(&mut self, from: Node, to: Node) {
        for i in 0..self.n {
            self.costs[from as usize * self.n + i] = Cost::INFINITY;
            self.costs[i * self.n + to as usize] = Cost::INFINITY;
        }
        self.costs[to as usize * self.n + from as usize] = Cost::INFINITY;
    }
}

impl fmt::Debug for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CostMatrix({}x{})", self.n, self.n)?;
        for i in 0..self.n {
            for j in 0..self.n {
                write!(f, "{:>10.3} ", self.costs[i * self.n + j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
