use super::*;
use crate::errors::{InvariantCheck, TourError};
use itertools::Itertools;
use std::io::Write;

/// A closed tour: a cyclic ordered sequence of all city indices, each
/// exactly once. The cost includes the closing edge back to the first
/// city; it is finite iff every edge of the tour exists.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    route: Vec<Node>,
    cost: Cost,
}

impl Tour {
    /// Computes the tour cost of `route` against the instance's pristine
    /// matrix, including the closing edge.
    pub fn from_route(instance: &Instance, route: Vec<Node>) -> Self {
        debug_assert_eq!(route.len(), instance.len());

        let closing = instance.cost(route[route.len() - 1], route[0]);
        let cost = route
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| instance.cost(a, b))
            .sum::<Cost>()
            + closing;

        Self { route, cost }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn route(&self) -> &[Node] {
        &self.route
    }

    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// A tour is legal iff every edge, including the closing one, has
    /// finite cost. Costs are non-negative, so the sum is finite exactly
    /// then.
    pub fn is_legal(&self) -> bool {
        self.cost.is_finite()
    }

    /// Writes the tour cost followed by the visit order using 1-based city
    /// indices.
    ///
    /// ```
    /// use tss::graph::{Instance, Tour};
    ///
    /// let instance = Instance::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
    /// let tour = Tour::from_route(&instance, vec![0, 1]);
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// tour.write(&mut buffer).unwrap();
    /// assert_eq!(buffer, b"3\n1\n2\n");
    /// ```
    pub fn write<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writeln!(&mut writer, "{}", self.cost)?;
        for &city in &self.route {
            writeln!(&mut writer, "{}", city + 1)?;
        }
        Ok(())
    }
}

impl InvariantCheck<TourError> for Tour {
    /// Checks that the route is a permutation of `0..n`.
    fn is_correct(&self) -> Result<(), TourError> {
        let mut seen = vec![false; self.route.len()];
        for &city in &self.route {
            let slot = seen
                .get_mut(city as usize)
                .ok_or(TourError::UnknownCity(city))?;
            if std::mem::replace(slot, true) {
                return Err(TourError::RevisitedCity(city));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square() -> Instance {
        let oracle = EuclideanOracle::new(vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ]);
        Instance::from_oracle(&oracle).unwrap()
    }

    #[test]
    fn cost_includes_the_closing_edge() {
        let tour = Tour::from_route(&square(), vec![0, 1, 2, 3]);
        assert_eq!(tour.cost(), 4.0);
        assert!(tour.is_legal());
    }

    #[test]
    fn missing_edge_makes_the_tour_illegal() {
        let instance = Instance::from_rows(vec![
            vec![0.0, 1.0, Cost::INFINITY],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();

        // only 0 -> 2 is missing; a tour routed through it is illegal
        assert!(Tour::from_route(&instance, vec![0, 1, 2]).is_legal());
        assert!(!Tour::from_route(&instance, vec![1, 0, 2]).is_legal());
    }

    #[test]
    fn invariant_check_flags_broken_routes() {
        let instance = square();
        assert!(
            Tour::from_route(&instance, vec![0, 1, 2, 3])
                .is_correct()
                .is_ok()
        );

        let twice = Tour {
            route: vec![0, 1, 1, 3],
            cost: 0.0,
        };
        assert_eq!(twice.is_correct(), Err(TourError::RevisitedCity(1)));

        let outside = Tour {
            route: vec![0, 1, 2, 7],
            cost: 0.0,
        };
        assert_eq!(outside.is_correct(), Err(TourError::UnknownCity(7)));
    }
}
