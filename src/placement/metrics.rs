//! Latency and load statistics of a placement

use crate::graph::{DistanceMatrix, GraphMetrics};
use crate::placement::Placement;
use serde::{Deserialize, Serialize};

/// Summary of how well a placement serves the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Number of controllers actually placed
    pub k: usize,

    /// Controller identifiers in selection order
    pub controllers: Vec<String>,

    /// Mean delay from each non-controller node to its nearest controller
    pub average_latency: f64,

    /// Worst delay from any node to its nearest controller
    pub max_latency: f64,

    /// Cluster size per controller, same order as `controllers`
    pub controller_loads: Vec<usize>,

    /// Largest cluster size
    pub max_load: usize,

    /// Sum of distances from every node to its assigned controller
    pub total_cost: f64,

    pub iterations: usize,
    pub converged: bool,
}

/// Average and worst nearest-controller delay over non-controller nodes.
///
/// Both are zero when every node is a controller and infinite when there are
/// no controllers at all.
#[allow(clippy::cast_precision_loss)]
pub fn response_times(distances: &DistanceMatrix, controllers: &[usize]) -> (f64, f64) {
    if controllers.is_empty() {
        return (f64::INFINITY, f64::INFINITY);
    }

    let delays: Vec<f64> = (0..distances.len())
        .filter(|n| !controllers.contains(n))
        .map(|n| distances.nearest(n, controllers))
        .collect();

    if delays.is_empty() {
        return (0.0, 0.0);
    }

    let average = delays.iter().sum::<f64>() / delays.len() as f64;
    let worst = delays.iter().copied().fold(0.0, f64::max);
    (average, worst)
}

/// Evaluate a placement against the metrics it was computed from
pub fn evaluate(metrics: &GraphMetrics, placement: &Placement) -> PlacementReport {
    let distances = &metrics.distances;
    let controllers = placement.controller_indices();
    let (average_latency, max_latency) = response_times(distances, controllers);

    let controller_loads: Vec<usize> = placement.assignment().iter().map(Vec::len).collect();
    let total_cost = controllers
        .iter()
        .zip(placement.assignment())
        .map(|(&c, members)| distances.distance_to_all(c, members))
        .sum();

    PlacementReport {
        k: placement.k(),
        controllers: placement.controllers.clone(),
        average_latency,
        max_latency,
        max_load: controller_loads.iter().copied().max().unwrap_or(0),
        controller_loads,
        total_cost,
        iterations: placement.iterations,
        converged: placement.converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::{metrics, path, star};
    use crate::placement::Engine;

    #[test]
    fn star_hub_serves_every_leaf_in_one_hop() {
        let m = metrics(&star(5));
        let placement = Engine::default().place(&m, 1).unwrap();
        let report = evaluate(&m, &placement);

        assert_eq!(report.average_latency, 1.0);
        assert_eq!(report.max_latency, 1.0);
        assert_eq!(report.controller_loads, vec![6]);
        assert_eq!(report.max_load, 6);
        assert_eq!(report.total_cost, 5.0);
    }

    #[test]
    fn response_times_exclude_controllers() {
        let m = metrics(&path(&[1.0, 2.0, 3.0]));

        assert_eq!(response_times(&m.distances, &[1]), (8.0 / 3.0, 5.0));
        assert_eq!(response_times(&m.distances, &[0, 1, 2, 3]), (0.0, 0.0));
        assert_eq!(response_times(&m.distances, &[]), (f64::INFINITY, f64::INFINITY));
    }
}
