use super::{
    frontier::Frontier,
    node::{DepthScaling, SearchNode},
};
use crate::{
    algorithm::{IterativeAlgorithm, TerminatingIterativeAlgorithm},
    errors::SolveError,
    graph::{Cost, Instance, Tour},
    heuristic::{nearest_neighbor, random_restarts},
};
use log::{debug, info};
use rand::Rng;
use std::time::{Duration, Instant};

/// Counters describing one exact solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes constructed, including the root.
    pub states_created: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub states_chopped: u64,
    /// Legal complete tours encountered at leaves.
    pub solutions_found: u64,
    /// Strict incumbent improvements.
    pub improvements: u64,
    /// High-water mark of simultaneously stored frontier nodes.
    pub max_stored: usize,
}

/// Why a solve stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The frontier ran empty. The incumbent, if any, is a global optimum;
    /// no incumbent means no legal tour exists.
    Exhausted,
    /// The wall-clock budget elapsed; the incumbent is the best found so
    /// far.
    TimedOut,
    /// The frontier hit its capacity limit; the search was aborted and the
    /// incumbent is the best found so far.
    ResourceExhausted,
}

/// Outcome of [`BranchAndBound::solve`].
#[derive(Clone, Debug)]
pub struct SolveReport {
    pub tour: Option<Tour>,
    pub elapsed: Duration,
    pub solution_count: u64,
    pub status: SolveStatus,
    pub stats: SearchStats,
}

impl SolveReport {
    pub fn tour_cost(&self) -> Cost {
        self.tour.as_ref().map_or(Cost::INFINITY, Tour::cost)
    }
}

/// Best-first branch-and-bound over partial tours.
///
/// The engine pops the frontier node with the smallest priority, finalizes
/// it if its route is complete, prunes it if its bound cannot beat the
/// incumbent, and expands it otherwise. Bounds are sound and non-decreasing
/// along any root-to-leaf path, so a run to exhaustion yields a global
/// optimum; under a deadline the incumbent is the best tour found so far.
pub struct BranchAndBound<'a> {
    instance: &'a Instance,
    frontier: Frontier,
    incumbent: Option<Tour>,
    scaling: DepthScaling,
    stats: SearchStats,
    error: Option<SolveError>,
    iterations: usize,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self::with_frontier(instance, Frontier::new())
    }

    /// Like [`BranchAndBound::new`] with a hard limit on simultaneously
    /// stored frontier nodes. Exceeding the limit aborts the solve with
    /// [`SolveStatus::ResourceExhausted`].
    pub fn with_frontier_limit(instance: &'a Instance, limit: usize) -> Self {
        Self::with_frontier(instance, Frontier::with_capacity_limit(limit))
    }

    fn with_frontier(instance: &'a Instance, mut frontier: Frontier) -> Self {
        let scaling = DepthScaling::default();
        let root = SearchNode::root(instance.cost_matrix().clone(), scaling);
        debug!("root bound: {}", root.bound());

        let error = frontier.push(root).err();

        Self {
            instance,
            frontier,
            incumbent: None,
            scaling,
            stats: SearchStats {
                states_created: 1,
                ..SearchStats::default()
            },
            error,
            iterations: 0,
        }
    }

    /// Selects the depth scaling of the priority function.
    ///
    /// # Warning
    /// May only be called before the first execution of the algorithm.
    pub fn set_depth_scaling(&mut self, scaling: DepthScaling) {
        assert_eq!(self.iterations, 0);
        self.scaling = scaling;
    }

    /// Installs `tour` as the incumbent if it improves on the current one.
    pub fn set_initial_incumbent(&mut self, tour: Tour) {
        self.install(tour);
    }

    /// Seeds the incumbent from the baseline solvers: a bounded number of
    /// random restarts followed by the nearest-neighbor construction. The
    /// random source is supplied by the caller so solves stay
    /// reproducible.
    pub fn seed_with_baselines(&mut self, rng: &mut impl Rng, restart_attempts: usize) {
        if let Some(tour) = random_restarts(self.instance, rng, restart_attempts) {
            self.install(tour);
        }
        if let Some(tour) = nearest_neighbor(self.instance) {
            self.install(tour);
        }
        info!("seed incumbent cost: {}", self.incumbent_cost());
    }

    pub fn incumbent(&self) -> Option<&Tour> {
        self.incumbent.as_ref()
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            max_stored: self.frontier.max_stored(),
            ..self.stats
        }
    }

    pub fn error(&self) -> Option<SolveError> {
        self.error
    }

    /// Runs the search until exhaustion, or until the optional wall-clock
    /// budget elapses, and reports the outcome. The budget is checked once
    /// per iteration; a solve returns at most one iteration's worth of work
    /// past it.
    pub fn solve(&mut self, budget: Option<Duration>) -> SolveReport {
        let start = Instant::now();

        match budget {
            Some(limit) => self.run_until_timeout(limit),
            None => {
                self.run_to_completion();
            }
        }

        let status = if self.error.is_some() {
            SolveStatus::ResourceExhausted
        } else if self.frontier.is_empty() {
            SolveStatus::Exhausted
        } else {
            SolveStatus::TimedOut
        };

        let stats = self.stats();
        info!(
            "status: {status:?}, states created: {}, chopped: {}, max stored: {}, improvements: {}",
            stats.states_created, stats.states_chopped, stats.max_stored, stats.improvements
        );

        SolveReport {
            tour: self.incumbent.clone(),
            elapsed: start.elapsed(),
            solution_count: self.stats.solutions_found,
            status,
            stats,
        }
    }

    fn incumbent_cost(&self) -> Cost {
        self.incumbent.as_ref().map_or(Cost::INFINITY, Tour::cost)
    }

    fn install(&mut self, tour: Tour) -> bool {
        if !tour.is_legal() || tour.cost() >= self.incumbent_cost() {
            return false;
        }

        debug!("incumbent improved to {}", tour.cost());
        self.stats.improvements += 1;
        self.incumbent = Some(tour);
        true
    }

    /// Processes a node whose route contains every city. The node is a leaf
    /// either way; only the closing edge decides whether it yields a tour.
    fn finalize(&mut self, node: SearchNode) {
        if !node.closing_cost().is_finite() {
            return;
        }

        // the node's matrix only vouches for the closing edge; the tour
        // cost is taken from the pristine instance
        let tour = Tour::from_route(self.instance, node.route().to_vec());
        if !tour.is_legal() {
            return;
        }

        self.stats.solutions_found += 1;
        self.install(tour);
    }

    fn expand(&mut self, node: SearchNode) {
        for candidate in 1..self.instance.number_of_cities() {
            if node.contains(candidate) {
                continue;
            }

            let child = node.child(candidate, self.scaling);
            self.stats.states_created += 1;

            // prune before insertion: this child can never improve on the
            // incumbent, and neither can any of its descendants
            if child.bound() > self.incumbent_cost() {
                self.stats.states_chopped += 1;
                continue;
            }

            if let Err(error) = self.frontier.push(child) {
                self.error = Some(error);
                return;
            }
        }
    }
}

impl IterativeAlgorithm<Tour> for BranchAndBound<'_> {
    fn execute_step(&mut self) {
        debug_assert!(!self.is_completed());
        self.iterations += 1;

        let Some(node) = self.frontier.pop() else {
            return;
        };

        if node.depth() == self.instance.len() {
            self.finalize(node);
        } else if node.bound() > self.incumbent_cost() {
            self.stats.states_chopped += 1;
        } else {
            self.expand(node);
        }
    }

    fn is_completed(&self) -> bool {
        self.frontier.is_empty() || self.error.is_some()
    }

    fn best_known_solution(&mut self) -> Option<Tour> {
        self.incumbent.clone()
    }
}

impl TerminatingIterativeAlgorithm<Tour> for BranchAndBound<'_> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        graph::{City, EuclideanOracle, Node},
        testing::{brute_force_optimum, random_instance_stream},
    };
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn unit_square() -> Instance {
        let oracle = EuclideanOracle::new(vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ]);
        Instance::from_oracle(&oracle).unwrap()
    }

    #[test]
    fn unit_square_perimeter() {
        let instance = unit_square();
        let mut solver = BranchAndBound::new(&instance);
        let report = solver.solve(Some(Duration::from_secs(10)));

        assert_eq!(report.status, SolveStatus::Exhausted);
        let tour = report.tour.expect("square has a tour");
        assert!((tour.cost() - 4.0).abs() < 1e-9);

        // cyclic order around the square, either direction
        let route = tour.route();
        let pos = |c: Node| route.iter().position(|&x| x == c).unwrap();
        let step = (pos(1) as i64 - pos(0) as i64).rem_euclid(4);
        assert!(step == 1 || step == 3);
        assert_eq!((pos(2) as i64 - pos(1) as i64).rem_euclid(4), step);
    }

    #[test]
    fn matches_brute_force_on_small_instances() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x5eed);
        for (i, instance) in random_instance_stream(&mut rng, 7).take(30).enumerate() {
            let optimum = brute_force_optimum(&instance);

            let mut solver = BranchAndBound::new(&instance);
            let report = solver.solve(None);
            assert_eq!(report.status, SolveStatus::Exhausted, "instance {i}");

            match optimum {
                Some(best) => {
                    let tour = report.tour.unwrap();
                    assert!(
                        (tour.cost() - best.cost()).abs() < 1e-9,
                        "instance {i}: got {}, optimum {}",
                        tour.cost(),
                        best.cost()
                    );
                }
                None => assert!(report.tour.is_none(), "instance {i}"),
            }
        }
    }

    /// Cheapest legal completion of `prefix` to a full tour, by brute
    /// force over the remaining cities.
    fn best_completion(instance: &Instance, prefix: &[Node]) -> Option<Cost> {
        use itertools::Itertools;

        (0..instance.number_of_cities())
            .filter(|c| !prefix.contains(c))
            .permutations(instance.len() - prefix.len())
            .map(|tail| {
                let mut route = prefix.to_vec();
                route.extend(tail);
                Tour::from_route(instance, route).cost()
            })
            .filter(|cost| cost.is_finite())
            .min_by(Cost::total_cmp)
    }

    #[test]
    fn bound_never_exceeds_any_completion() {
        let mut rng = Pcg64Mcg::seed_from_u64(0xb0b);
        for instance in random_instance_stream(&mut rng, 6).take(12) {
            let root = SearchNode::root(instance.cost_matrix().clone(), DepthScaling::default());

            // the root and every depth-2/3 node must stay below the best
            // completion through their prefix
            let mut nodes = vec![root];
            while let Some(node) = nodes.pop() {
                if let Some(best) = best_completion(&instance, node.route()) {
                    assert!(
                        node.bound() <= best + 1e-9,
                        "bound {} undercut by completion {best} at route {:?}",
                        node.bound(),
                        node.route()
                    );
                }

                if node.depth() >= 3 {
                    continue;
                }
                for candidate in 1..instance.number_of_cities() {
                    if !node.contains(candidate) {
                        nodes.push(node.child(candidate, DepthScaling::default()));
                    }
                }
            }
        }
    }

    #[test]
    fn child_bounds_are_monotone() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        for instance in random_instance_stream(&mut rng, 6).take(10) {
            let root = SearchNode::root(instance.cost_matrix().clone(), DepthScaling::default());
            let mut frontier = vec![root];

            while let Some(node) = frontier.pop() {
                if node.depth() == instance.len() {
                    continue;
                }
                for candidate in 1..instance.number_of_cities() {
                    if node.contains(candidate) {
                        continue;
                    }
                    let child = node.child(candidate, DepthScaling::default());
                    assert!(child.bound() >= node.bound() - 1e-9);
                    if node.depth() < 4 {
                        frontier.push(child);
                    }
                }
            }
        }
    }

    #[test]
    fn incumbent_cost_is_non_increasing_over_a_solve() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let instance = random_instance_stream(&mut rng, 7).next().unwrap();

        let mut solver = BranchAndBound::new(&instance);
        solver.seed_with_baselines(&mut rng, 8);

        let mut last = solver.incumbent_cost();
        while !solver.is_completed() {
            solver.execute_step();
            let now = solver.incumbent_cost();
            assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn unreachable_city_means_no_legal_tour() {
        // city 3 cannot be entered from anywhere
        let inf = Cost::INFINITY;
        let instance = Instance::from_rows(vec![
            vec![0.0, 1.0, 2.0, inf, 2.0],
            vec![1.0, 0.0, 1.0, inf, 3.0],
            vec![2.0, 1.0, 0.0, inf, 1.0],
            vec![1.0, 2.0, 1.0, 0.0, 1.0],
            vec![2.0, 3.0, 1.0, inf, 0.0],
        ])
        .unwrap();

        let mut solver = BranchAndBound::new(&instance);
        let report = solver.solve(None);

        assert_eq!(report.status, SolveStatus::Exhausted);
        assert!(report.tour.is_none());
        assert_eq!(report.solution_count, 0);
    }

    #[test]
    fn tiny_frontier_reports_resource_exhaustion() {
        let mut rng = Pcg64Mcg::seed_from_u64(99);
        let instance = random_instance_stream(&mut rng, 8).next().unwrap();

        let mut solver = BranchAndBound::with_frontier_limit(&instance, 3);
        solver.seed_with_baselines(&mut rng, 16);
        let seeded = solver.incumbent().cloned().expect("baselines find a tour");

        let report = solver.solve(None);
        assert_eq!(report.status, SolveStatus::ResourceExhausted);
        assert_eq!(solver.error(), Some(SolveError::ResourceExhausted(3)));
        // the abort still reports a best-effort tour
        assert!(report.tour_cost() <= seeded.cost());
    }

    #[test]
    fn legacy_priority_finds_the_same_optimum() {
        let mut rng = Pcg64Mcg::seed_from_u64(0xfeed);
        let instance = random_instance_stream(&mut rng, 6).next().unwrap();
        let optimum = brute_force_optimum(&instance);

        let mut solver = BranchAndBound::new(&instance);
        solver.set_depth_scaling(DepthScaling::LegacyXor);
        let report = solver.solve(None);

        match optimum {
            Some(best) => {
                assert!((report.tour_cost() - best.cost()).abs() < 1e-9);
            }
            None => assert!(report.tour.is_none()),
        }
    }
}
