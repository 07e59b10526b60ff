use super::*;
use crate::errors::InstanceError;

/// A fixed problem instance: the full cost matrix snapshotted from an
/// oracle and validated once, before any solver runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    matrix: CostMatrix,
}

impl Instance {
    pub fn from_oracle(oracle: &impl CostOracle) -> Result<Self, InstanceError> {
        Self::validated(CostMatrix::from_oracle(oracle))
    }

    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, InstanceError> {
        Self::validated(CostMatrix::from_rows(rows))
    }

    fn validated(matrix: CostMatrix) -> Result<Self, InstanceError> {
        if matrix.len() < 2 {
            return Err(InstanceError::TooFewCities(matrix.len()));
        }

        for from in 0..matrix.number_of_cities() {
            for to in 0..matrix.number_of_cities() {
                let cost = matrix.cost(from, to);
                if cost.is_nan() {
                    return Err(InstanceError::NotANumber { from, to });
                }
                if cost < 0.0 {
                    return Err(InstanceError::NegativeCost { from, to, cost });
                }
            }
        }

        Ok(Self { matrix })
    }

    pub fn number_of_cities(&self) -> NumNodes {
        self.matrix.number_of_cities()
    }

    /// Number of cities as usize
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn cost(&self, from: Node, to: Node) -> Cost {
        self.matrix.cost(from, to)
    }

    /// The pristine cost matrix; solvers clone it for their own bookkeeping.
    pub fn cost_matrix(&self) -> &CostMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_infinite_entries() {
        let instance = Instance::from_rows(vec![
            vec![0.0, 1.0, Cost::INFINITY],
            vec![1.0, 0.0, 2.0],
            vec![Cost::INFINITY, 2.0, 0.0],
        ])
        .unwrap();
        assert_eq!(instance.number_of_cities(), 3);
        assert_eq!(instance.cost(0, 2), Cost::INFINITY);
        assert_eq!(instance.cost(0, 0), Cost::INFINITY);
    }

    #[test]
    fn rejects_tiny_instances() {
        assert_eq!(
            Instance::from_rows(vec![vec![0.0]]),
            Err(InstanceError::TooFewCities(1))
        );
    }

    #[test]
    fn rejects_negative_and_nan_costs() {
        assert_eq!(
            Instance::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(InstanceError::NegativeCost {
                from: 0,
                to: 1,
                cost: -1.0
            })
        );
        assert_eq!(
            Instance::from_rows(vec![vec![0.0, Cost::NAN], vec![1.0, 0.0]]),
            Err(InstanceError::NotANumber { from: 0, to: 1 })
        );
    }
}
