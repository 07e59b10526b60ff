use crate::graph::{City, Cost, EuclideanOracle, Instance, NumNodes, Tour};
use itertools::Itertools;
use rand::Rng;

/// Endless stream of random instances: cities in the unit square with a
/// slight elevation (so costs are asymmetric), and every fourth-ish
/// instance loses a growing fraction of its edges to exercise the
/// unreachable-pair paths.
pub fn random_instance_stream(
    rng: &mut impl Rng,
    n: NumNodes,
) -> impl Iterator<Item = Instance> + '_ {
    (0..).map(move |i: u32| {
        let mut cities = Vec::with_capacity(n as usize);
        for _ in 0..n {
            cities.push(City::with_elevation(
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..0.3),
            ));
        }
        let oracle = EuclideanOracle::new(cities);

        let removal = f64::from(i % 4) * 0.05;
        let mut rows = Vec::with_capacity(n as usize);
        for from in 0..n {
            let mut row = Vec::with_capacity(n as usize);
            for to in 0..n {
                let removed = removal > 0.0 && rng.gen_range(0.0..1.0) < removal;
                row.push(if from == to || removed {
                    Cost::INFINITY
                } else {
                    oracle.cost(from, to)
                });
            }
            rows.push(row);
        }

        Instance::from_rows(rows).expect("generated instances are valid")
    })
}

/// Exhaustive optimum by enumerating every tour with city 0 pinned first.
/// None iff the instance has no legal tour. Only sensible for small n.
pub fn brute_force_optimum(instance: &Instance) -> Option<Tour> {
    let n = instance.number_of_cities();

    (1..n)
        .permutations(n as usize - 1)
        .map(|tail| {
            let mut route = Vec::with_capacity(n as usize);
            route.push(0);
            route.extend(tail);
            Tour::from_route(instance, route)
        })
        .filter(Tour::is_legal)
        .min_by(|a, b| a.cost().total_cmp(&b.cost()))
}
