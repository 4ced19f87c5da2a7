//! Selection of the first controller

use crate::config::{CentralityWeights, InitialCenterPolicy};
use crate::error::{PlacementError, Result};
use crate::graph::GraphMetrics;
use crate::placement::EligibleSet;
use itertools::{Itertools, MinMaxResult};

/// Pick the first controller according to `policy`.
///
/// Both policies only consider eligible nodes and fail when there are none.
pub fn select_initial_center(
    policy: &InitialCenterPolicy,
    metrics: &GraphMetrics,
    eligible: &EligibleSet,
) -> Result<usize> {
    eligible.require_non_empty()?;

    let center = match policy {
        InitialCenterPolicy::DegreeFirst => degree_first(metrics, eligible),
        InitialCenterPolicy::WeightedComposite(weights) => {
            weighted_composite(weights, metrics, eligible)?
        }
    };

    log::debug!("Initial controller: {}", metrics.node_id(center));
    Ok(center)
}

/// Highest degree, then smallest total distance, then enumeration order
fn degree_first(metrics: &GraphMetrics, eligible: &EligibleSet) -> usize {
    let mut best: Option<(usize, usize, f64)> = None;

    for node in eligible.iter() {
        let degree = metrics.degrees[node];
        let total = metrics.distances.total_distance(node);
        let better = match best {
            None => true,
            Some((_, best_degree, best_total)) => {
                degree > best_degree || (degree == best_degree && total < best_total)
            }
        };
        if better {
            best = Some((node, degree, total));
        }
    }

    // eligible set was checked non-empty by the caller
    best.map_or(0, |(node, _, _)| node)
}

/// Min-max scale `values[node]` over the eligible nodes, 0 when the range is zero
fn normalizer<'a>(values: &'a [f64], eligible: &EligibleSet) -> impl Fn(usize) -> f64 + 'a {
    let (min, max) = match eligible.iter().map(|n| values[n]).minmax() {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    let range = max - min;
    move |node| {
        if range > 0.0 {
            (values[node] - min) / range
        } else {
            0.0
        }
    }
}

/// Highest weighted centrality score, then smallest total distance, then enumeration order
#[allow(clippy::cast_precision_loss)]
fn weighted_composite(
    weights: &CentralityWeights,
    metrics: &GraphMetrics,
    eligible: &EligibleSet,
) -> Result<usize> {
    weights.validate()?;
    let centrality = metrics
        .centrality
        .as_ref()
        .ok_or(PlacementError::MissingCentrality)?;

    let degrees: Vec<f64> = metrics.degrees.iter().map(|&d| d as f64).collect();
    let degree_norm = normalizer(&degrees, eligible);
    let betweenness_norm = normalizer(&centrality.betweenness, eligible);
    let closeness_norm = normalizer(&centrality.closeness, eligible);

    let mut best: Option<(usize, f64, f64)> = None;
    for node in eligible.iter() {
        let score = weights.degree * degree_norm(node)
            + weights.betweenness * betweenness_norm(node)
            + weights.closeness * closeness_norm(node);
        let total = metrics.distances.total_distance(node);

        log::trace!("Composite score of {}: {:.4}", metrics.node_id(node), score);

        let better = match best {
            None => true,
            Some((_, best_score, best_total)) => {
                score > best_score || (score == best_score && total < best_total)
            }
        };
        if better {
            best = Some((node, score, total));
        }
    }

    best.map(|(node, _, _)| node)
        .ok_or(PlacementError::NoEligibleNodes { rho: eligible.rho() })
}
