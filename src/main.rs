use anyhow::Result;
use clap::{Parser, ValueEnum};
use controller_placement::config::{
    CentralityWeights, ConvergenceMode, PlacementConfig, RefinementSchedule, DEFAULT_MAX_ITERATIONS,
};
use controller_placement::experiment::{self, Algorithm};
use controller_placement::graph::GraphMetrics;
use controller_placement::storage;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Degree-first initial center, farthest-point seeding
    Advanced,
    /// Weighted centrality initial center, k-means++ seeding
    Enhanced,
    /// High-degree independent dominating set baseline
    Hdids,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Convergence {
    Unordered,
    Positional,
}

#[derive(Parser, Debug)]
#[clap(
    name = "controller-placement",
    about = "Place SDN controllers on a weighted network topology"
)]
struct Cli {
    /// Path to topology JSON file
    #[clap(long)]
    topology: String,

    /// Output directory for results
    #[clap(long, default_value = "placement_results")]
    output_dir: String,

    /// Placement algorithm
    #[clap(long, value_enum, default_value = "advanced")]
    algorithm: Mode,

    /// Evaluate a single controller count instead of sweeping
    #[clap(long)]
    k: Option<usize>,

    /// Largest controller count of the sweep
    #[clap(long, default_value = "10")]
    kmax: usize,

    /// Repetitions per k for the stochastic algorithm
    #[clap(long, default_value = "1")]
    runs: usize,

    /// Random seed
    #[clap(long, default_value = "42")]
    seed: u64,

    /// Degree weight of the composite initial score
    #[clap(long, default_value = "0.4")]
    w_degree: f64,

    /// Betweenness weight of the composite initial score
    #[clap(long, default_value = "0.3")]
    w_betweenness: f64,

    /// Closeness weight of the composite initial score
    #[clap(long, default_value = "0.3")]
    w_closeness: f64,

    /// Refinement iteration cap
    #[clap(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Controller set comparison used for convergence
    #[clap(long, value_enum, default_value = "unordered")]
    convergence: Convergence,

    /// Run a refinement cycle after every seeded controller
    #[clap(long)]
    refine_each_seed: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn algorithm(&self) -> Algorithm {
        let config = match self.algorithm {
            Mode::Hdids => return Algorithm::Hdids,
            Mode::Advanced => PlacementConfig::advanced(),
            Mode::Enhanced => PlacementConfig::enhanced(CentralityWeights::new(
                self.w_degree,
                self.w_betweenness,
                self.w_closeness,
            )),
        };

        let convergence = match self.convergence {
            Convergence::Unordered => ConvergenceMode::Unordered,
            Convergence::Positional => ConvergenceMode::Positional,
        };
        let schedule = if self.refine_each_seed {
            RefinementSchedule::AfterEachSeed
        } else {
            RefinementSchedule::AfterSeeding
        };

        Algorithm::Engine(
            config
                .with_convergence(convergence)
                .with_schedule(schedule)
                .with_max_iterations(self.max_iterations)
                .with_seed(self.seed),
        )
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let algorithm = args.algorithm();
    if let Algorithm::Engine(config) = &algorithm {
        config.validate()?;
    }

    // 1. Load topology
    let topology = storage::load_topology(&args.topology)?;

    // 2. Shortest paths and centrality, shared by every run
    let needs_centrality = matches!(&algorithm, Algorithm::Engine(c) if c.needs_centrality());
    let metrics = GraphMetrics::collect(&topology, needs_centrality)?;

    // 3. Place controllers
    let points = match args.k {
        Some(k) => vec![experiment::run_point(&metrics, &algorithm, k, args.runs, args.seed)?],
        None => experiment::sweep(&metrics, &algorithm, args.kmax, args.runs, args.seed)?,
    };

    for point in &points {
        if let Some(report) = point.runs.first() {
            log::info!(
                "k={} controllers={:?} loads={:?}",
                point.k,
                report.controllers,
                report.controller_loads
            );
        }
    }

    // 4. Save results
    storage::save_results(algorithm.name(), &points, &topology, &args.output_dir)?;

    log::info!("Placement complete. Results saved to {}", args.output_dir);

    Ok(())
}
