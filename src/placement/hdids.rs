//! High-Degree Independent Dominating Set baseline
//!
//! Greedily picks the highest-degree node that is neither a controller nor
//! adjacent to one. The result is an independent set that stops growing once
//! every node is dominated, so it may hold fewer than `k` controllers.

use crate::error::Result;
use crate::graph::GraphMetrics;
use crate::placement::engine::validate_k;
use crate::placement::refine::assign;
use crate::placement::Placement;

/// Select up to `k` controllers with the HDIDS heuristic and cluster around them
pub fn hdids(metrics: &GraphMetrics, k: usize) -> Result<Placement> {
    let n = metrics.node_count();
    validate_k(k, n)?;

    let mut dominated = vec![false; n];
    let mut controllers: Vec<usize> = Vec::with_capacity(k);

    while controllers.len() < k {
        let mut best: Option<(usize, usize, f64)> = None;
        for node in (0..n).filter(|&node| !dominated[node]) {
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

        let Some((selected, _, _)) = best else {
            log::info!(
                "Every node is dominated after {} of {} controllers",
                controllers.len(),
                k
            );
            break;
        };

        dominated[selected] = true;
        for &neighbor in &metrics.adjacency[selected] {
            dominated[neighbor] = true;
        }
        controllers.push(selected);
    }

    let assignment = assign(&metrics.distances, &controllers);
    Ok(Placement::from_indices(metrics, controllers, assignment, 0, true))
}
