use crate::graph::{Instance, Node, Tour};
use rand::{Rng, seq::SliceRandom};

/// Draws `attempts` uniform random tours and keeps the cheapest legal one.
/// The random source is injected by the caller, so identical seeds yield
/// identical tours.
pub fn random_restarts(instance: &Instance, rng: &mut impl Rng, attempts: usize) -> Option<Tour> {
    let mut perm: Vec<Node> = (0..instance.number_of_cities()).collect();
    let mut best: Option<Tour> = None;

    for _ in 0..attempts {
        // keep city 0 in front; a tour is a cycle, so this loses nothing
        perm[1..].shuffle(rng);

        let tour = Tour::from_route(instance, perm.clone());
        if tour.is_legal() && best.as_ref().is_none_or(|b| tour.cost() < b.cost()) {
            best = Some(tour);
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvariantCheck;
    use crate::graph::Cost;
    use crate::testing::random_instance_stream;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn same_seed_same_tour() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let instance = random_instance_stream(&mut rng, 8).next().unwrap();

        let a = random_restarts(&instance, &mut Pcg64Mcg::seed_from_u64(1), 32);
        let b = random_restarts(&instance, &mut Pcg64Mcg::seed_from_u64(1), 32);
        assert_eq!(a, b);
    }

    #[test]
    fn tours_are_legal_permutations() {
        let mut rng = Pcg64Mcg::seed_from_u64(6);
        for instance in random_instance_stream(&mut rng, 7).take(8) {
            let mut restart_rng = Pcg64Mcg::seed_from_u64(2);
            if let Some(tour) = random_restarts(&instance, &mut restart_rng, 64) {
                assert!(tour.is_legal());
                tour.is_correct().unwrap();
            }
        }
    }

    #[test]
    fn unreachable_pairs_yield_no_tour() {
        let inf = Cost::INFINITY;
        let instance = Instance::from_rows(vec![
            vec![0.0, inf, inf],
            vec![inf, 0.0, inf],
            vec![inf, inf, 0.0],
        ])
        .unwrap();

        let mut rng = Pcg64Mcg::seed_from_u64(3);
        assert_eq!(random_restarts(&instance, &mut rng, 100), None);
    }
}
