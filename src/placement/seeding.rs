//! Selection of further seed controllers

use crate::config::NextCenterPolicy;
use crate::graph::GraphMetrics;
use crate::placement::EligibleSet;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Non-controller nodes that pass the degree threshold, or every
/// non-controller node when none do.
fn candidates(metrics: &GraphMetrics, eligible: &EligibleSet, controllers: &[usize]) -> Vec<usize> {
    let free: Vec<usize> = (0..metrics.node_count())
        .filter(|n| !controllers.contains(n))
        .collect();
    let pool: Vec<usize> = free.iter().copied().filter(|&n| eligible.contains(n)).collect();
    if pool.is_empty() && !free.is_empty() {
        log::debug!("No eligible node left; relaxing the degree constraint");
        return free;
    }
    pool
}

/// Deterministic farthest-point rule.
///
/// Maximizes the distance to the nearest existing controller; ties prefer the
/// higher degree and then the earlier node. `None` once every node is a controller.
pub fn farthest_point(
    metrics: &GraphMetrics,
    eligible: &EligibleSet,
    controllers: &[usize],
) -> Option<usize> {
    let mut best: Option<(usize, f64, usize)> = None;

    for node in candidates(metrics, eligible, controllers) {
        let gap = metrics.distances.nearest(node, controllers);
        let degree = metrics.degrees[node];
        let better = match best {
            None => true,
            Some((_, best_gap, best_degree)) => {
                gap > best_gap || (gap == best_gap && degree > best_degree)
            }
        };
        if better {
            best = Some((node, gap, degree));
        }
    }

    best.map(|(node, _, _)| node)
}

/// Stochastic k-means++ rule.
///
/// Samples a candidate with probability proportional to its squared distance
/// to the nearest controller, or uniformly when all of those distances are zero.
pub fn kmeans_plus_plus<R: Rng + ?Sized>(
    metrics: &GraphMetrics,
    eligible: &EligibleSet,
    controllers: &[usize],
    rng: &mut R,
) -> Option<usize> {
    let pool = candidates(metrics, eligible, controllers);
    if pool.is_empty() {
        return None;
    }

    let weights: Vec<f64> = pool
        .iter()
        .map(|&n| {
            let d = metrics.distances.nearest(n, controllers);
            d * d
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        if let Ok(dist) = WeightedIndex::new(&weights) {
            return Some(pool[dist.sample(rng)]);
        }
    }

    log::debug!("All candidate weights are zero; sampling uniformly");
    pool.choose(rng).copied()
}

/// Dispatch to the configured next-center rule
pub fn select_next_center<R: Rng + ?Sized>(
    policy: NextCenterPolicy,
    metrics: &GraphMetrics,
    eligible: &EligibleSet,
    controllers: &[usize],
    rng: &mut R,
) -> Option<usize> {
    let next = match policy {
        NextCenterPolicy::FarthestPoint => farthest_point(metrics, eligible, controllers),
        NextCenterPolicy::KMeansPlusPlus => kmeans_plus_plus(metrics, eligible, controllers, rng),
    };
    if let Some(node) = next {
        log::debug!(
            "Seed controller #{}: {}",
            controllers.len() + 1,
            metrics.node_id(node)
        );
    }
    next
}
