//! Sweeps over controller counts, with repeated runs for stochastic modes

use crate::config::PlacementConfig;
use crate::error::Result;
use crate::graph::GraphMetrics;
use crate::placement::hdids::hdids;
use crate::placement::{evaluate, Engine, PlacementReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Placement strategy evaluated by a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    /// The clustering engine with the given configuration
    Engine(PlacementConfig),
    /// High-degree independent dominating set baseline
    Hdids,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Engine(config) if config.is_stochastic() => "enhanced_k_means",
            Algorithm::Engine(_) => "advanced_k_means",
            Algorithm::Hdids => "hdids",
        }
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self, Algorithm::Engine(config) if config.is_stochastic())
    }
}

/// Mean and spread of one quantity over repeated runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        Self {
            mean: values.mean(),
            std_dev: if values.len() > 1 {
                values.population_std_dev()
            } else {
                0.0
            },
            min: values.min(),
            max: values.max(),
        }
    }
}

/// All runs for one controller count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub k: usize,
    pub average_latency: Summary,
    pub max_latency: Summary,
    pub max_load: Summary,
    pub runs: Vec<PlacementReport>,
}

/// Seed for one run, derived from the sweep seed, k and run index.
///
/// Every run gets its own independent stream, so results do not depend on
/// the order in which rayon schedules the sweep points.
pub fn run_seed(base: u64, k: usize, run: usize) -> u64 {
    let mut x = base ^ (k as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (run as u64).rotate_left(32);
    // splitmix64 finalizer
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Run `algorithm` once (deterministic) or `runs` times (stochastic) for a single k
pub fn run_point(
    metrics: &GraphMetrics,
    algorithm: &Algorithm,
    k: usize,
    runs: usize,
    seed: u64,
) -> Result<SweepPoint> {
    let repeats = if algorithm.is_stochastic() { runs.max(1) } else { 1 };

    let reports = (0..repeats)
        .map(|run| {
            let placement = match algorithm {
                Algorithm::Engine(config) => {
                    let mut rng = StdRng::seed_from_u64(run_seed(seed, k, run));
                    Engine::new(config.clone()).place_with_rng(metrics, k, &mut rng)?
                }
                Algorithm::Hdids => hdids(metrics, k)?,
            };
            Ok(evaluate(metrics, &placement))
        })
        .collect::<Result<Vec<_>>>()?;

    let column = |f: fn(&PlacementReport) -> f64| -> Vec<f64> { reports.iter().map(f).collect() };
    let point = SweepPoint {
        k,
        average_latency: Summary::of(&column(|r| r.average_latency)),
        max_latency: Summary::of(&column(|r| r.max_latency)),
        max_load: Summary::of(&column(|r| r.max_load as f64)),
        runs: reports,
    };

    log::info!(
        "{} k={}: avg latency {:.4} (sd {:.4}), max latency {:.4}",
        algorithm.name(),
        k,
        point.average_latency.mean,
        point.average_latency.std_dev,
        point.max_latency.mean
    );
    Ok(point)
}

/// Evaluate every k in `1..=kmax` (clamped to the node count) in parallel
pub fn sweep(
    metrics: &GraphMetrics,
    algorithm: &Algorithm,
    kmax: usize,
    runs: usize,
    seed: u64,
) -> Result<Vec<SweepPoint>> {
    let kmax = kmax.min(metrics.node_count());
    log::info!("Sweeping {} for k = 1..={}", algorithm.name(), kmax);

    (1..=kmax)
        .into_par_iter()
        .map(|k| run_point(metrics, algorithm, k, runs, seed))
        .collect()
}
