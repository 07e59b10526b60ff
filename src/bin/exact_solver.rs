use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::{fs::File, path::PathBuf, time::Duration};
use structopt::StructOpt;
use tss::{
    exact::{BranchAndBound, DepthScaling},
    graph::{Instance, Tour},
    io::{read_instance, read_instance_file},
    log::build_logger,
    utils::signal_handling,
};

#[derive(StructOpt)]
struct Opts {
    /// Instance file; stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// Tour output file; stdout if omitted
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Wall-clock budget in seconds; exhaustive search if omitted
    #[structopt(short = "T", long)]
    timeout: Option<f64>,

    /// Seed for the random-restart incumbent
    #[structopt(short, long, default_value = "123")]
    seed: u64,

    /// Random restarts used to seed the incumbent
    #[structopt(long, default_value = "64")]
    restarts: usize,

    /// Abort once the frontier holds this many states
    #[structopt(long)]
    frontier_limit: Option<usize>,

    /// Rank frontier nodes with the historical bound/(depth XOR 2) rule
    #[structopt(long)]
    legacy_priority: bool,
}

fn load_instance(path: &Option<PathBuf>) -> anyhow::Result<Instance> {
    if let Some(path) = path {
        Ok(read_instance_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(read_instance(stdin)?)
    }
}

fn write_solution(tour: &Tour, path: &Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = path {
        let file = File::create(path)?;
        tour.write(std::io::BufWriter::new(file))?;
    } else {
        tour.write(std::io::stdout())?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    build_logger();
    signal_handling::initialize();
    let opts = Opts::from_args();

    let instance = load_instance(&opts.instance)?;
    info!("{} cities", instance.number_of_cities());

    let mut solver = match opts.frontier_limit {
        Some(limit) => BranchAndBound::with_frontier_limit(&instance, limit),
        None => BranchAndBound::new(&instance),
    };
    if opts.legacy_priority {
        solver.set_depth_scaling(DepthScaling::LegacyXor);
    }

    let mut rng = Pcg64Mcg::seed_from_u64(opts.seed);
    solver.seed_with_baselines(&mut rng, opts.restarts);

    let report = solver.solve(opts.timeout.map(Duration::from_secs_f64));
    info!(
        "{:?} after {:.3}s with {} solutions",
        report.status,
        report.elapsed.as_secs_f64(),
        report.solution_count
    );

    match &report.tour {
        Some(tour) => write_solution(tour, &opts.output)?,
        None => info!("no legal tour exists"),
    }

    Ok(())
}
