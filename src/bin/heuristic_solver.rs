use log::{info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::{fs::File, path::PathBuf};
use structopt::StructOpt;
use tss::{
    graph::{Instance, Tour},
    heuristic::{christofides, nearest_neighbor, random_restarts},
    io::{read_instance, read_instance_file},
    log::build_logger,
};

#[derive(StructOpt)]
struct Opts {
    /// Instance file; stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// Tour output file; stdout if omitted
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random-restart fallback
    #[structopt(short, long, default_value = "123")]
    seed: u64,

    /// Random restarts tried when the pipeline and greedy both fail
    #[structopt(long, default_value = "256")]
    restarts: usize,
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
    let opts = Opts::from_args();

    let instance = load_instance(&opts.instance)?;
    info!("{} cities", instance.number_of_cities());

    let tour = match christofides(&instance) {
        Ok(tour) => Some(tour),
        Err(error) => {
            // the pipeline is allowed to fail; fall back to the baselines
            warn!("{error}, falling back");
            let mut rng = Pcg64Mcg::seed_from_u64(opts.seed);
            [
                nearest_neighbor(&instance),
                random_restarts(&instance, &mut rng, opts.restarts),
            ]
            .into_iter()
            .flatten()
            .min_by(|a, b| a.cost().total_cmp(&b.cost()))
        }
    };

    match &tour {
        Some(tour) => {
            info!("tour cost: {}", tour.cost());
            write_solution(tour, &opts.output)?;
        }
        None => info!("no tour found"),
    }

    Ok(())
}
