//! Placement engine: validation, seeding and refinement in sequence

use crate::config::{PlacementConfig, RefinementSchedule};
use crate::error::{PlacementError, Result};
use crate::graph::{GraphMetrics, GraphOracle};
use crate::placement::initial::select_initial_center;
use crate::placement::refine::{assign, refine};
use crate::placement::seeding::select_next_center;
use crate::placement::{eligible_nodes, Placement};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Clustering engine parameterized by a [`PlacementConfig`]
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: PlacementConfig,
}

/// Reject controller counts outside `1..=node_count`
pub fn validate_k(k: usize, node_count: usize) -> Result<()> {
    if k == 0 || k > node_count {
        return Err(PlacementError::InvalidClusterCount { k, node_count });
    }
    Ok(())
}

impl Engine {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Collect metrics from `oracle` and place `k` controllers
    pub fn place_on<G: GraphOracle + ?Sized>(&self, oracle: &G, k: usize) -> Result<Placement> {
        let metrics = GraphMetrics::collect(oracle, self.config.needs_centrality())?;
        self.place(&metrics, k)
    }

    /// Place `k` controllers with a random source seeded from the configuration
    pub fn place(&self, metrics: &GraphMetrics, k: usize) -> Result<Placement> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.place_with_rng(metrics, k, &mut rng)
    }

    /// Place `k` controllers, drawing any randomness from `rng`.
    ///
    /// Reusing one `rng` across calls continues a single stream of draws.
    pub fn place_with_rng<R: Rng + ?Sized>(
        &self,
        metrics: &GraphMetrics,
        k: usize,
        rng: &mut R,
    ) -> Result<Placement> {
        let config = &self.config;
        config.validate()?;
        validate_k(k, metrics.node_count())?;
        if config.needs_centrality() && metrics.centrality.is_none() {
            return Err(PlacementError::MissingCentrality);
        }

        log::info!(
            "Placing {} controllers on {} nodes ({:?}, {:?})",
            k,
            metrics.node_count(),
            config.initial,
            config.next
        );

        let eligible = eligible_nodes(&metrics.degrees);
        let mut controllers = vec![select_initial_center(&config.initial, metrics, &eligible)?];
        let mut iterations = 0;
        let mut converged = true;

        while controllers.len() < k {
            let Some(next) = select_next_center(config.next, metrics, &eligible, &controllers, rng)
            else {
                log::warn!(
                    "Seeding stopped early with {} of {} controllers",
                    controllers.len(),
                    k
                );
                break;
            };
            controllers.push(next);

            if config.schedule == RefinementSchedule::AfterEachSeed {
                let local = refine(
                    metrics,
                    &eligible,
                    controllers,
                    config.convergence,
                    config.max_iterations,
                );
                iterations += local.iterations;
                converged &= local.converged;
                controllers = local.controllers;
            }
        }

        let (controllers, assignment) = match config.schedule {
            RefinementSchedule::AfterSeeding => {
                let result = refine(
                    metrics,
                    &eligible,
                    controllers,
                    config.convergence,
                    config.max_iterations,
                );
                iterations += result.iterations;
                converged &= result.converged;
                (result.controllers, result.assignment)
            }
            RefinementSchedule::AfterEachSeed => {
                let assignment = assign(&metrics.distances, &controllers);
                (controllers, assignment)
            }
        };

        let placement = Placement::from_indices(metrics, controllers, assignment, iterations, converged);
        log::info!(
            "Placed controllers {:?} after {} refinement iterations",
            placement.controllers,
            iterations
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CentralityWeights, ConvergenceMode};
    use crate::graph::fixtures::{cycle, metrics, path, star};

    #[test]
    fn star_with_one_controller_uses_the_hub() {
        let m = metrics(&star(5));
        let placement = Engine::default().place(&m, 1).unwrap();

        assert_eq!(placement.controllers, vec!["h"]);
        assert_eq!(placement.clusters[0].size(), 6);
        assert!(placement.converged);
    }

    #[test]
    fn four_cycle_places_opposite_controllers() {
        let m = metrics(&cycle(&["a", "b", "c", "d"]));
        let placement = Engine::default().place(&m, 2).unwrap();

        let mut controllers = placement.controllers.clone();
        controllers.sort();
        assert_eq!(controllers, vec!["a", "c"]);
        assert_eq!(
            placement.clusters.iter().map(|c| c.size()).sum::<usize>(),
            4
        );
    }

    #[test]
    fn k_out_of_range_is_a_configuration_error() {
        let m = metrics(&star(2));
        let engine = Engine::default();

        assert_eq!(
            engine.place(&m, 0),
            Err(PlacementError::InvalidClusterCount { k: 0, node_count: 3 })
        );
        assert!(engine.place(&m, 4).is_err());
    }

    #[test]
    fn k_equal_to_node_count_gives_singletons() {
        let m = metrics(&path(&[1.0, 2.0, 3.0, 4.0]));
        let placement = Engine::default().place(&m, 5).unwrap();

        assert_eq!(placement.k(), 5);
        for cluster in &placement.clusters {
            assert_eq!(cluster.members, vec![cluster.controller.clone()]);
        }
    }

    #[test]
    fn enhanced_mode_is_reproducible_for_a_seed() {
        let m = metrics(&cycle(&["a", "b", "c", "d", "e", "f", "g", "h", "i"]));
        let engine = Engine::new(PlacementConfig::enhanced(CentralityWeights::default()).with_seed(9));

        assert_eq!(engine.place(&m, 3).unwrap(), engine.place(&m, 3).unwrap());
    }

    #[test]
    fn enhanced_mode_needs_centrality_metrics() {
        let topology = star(4);
        let m = GraphMetrics::collect(&topology, false).unwrap();
        let engine = Engine::new(PlacementConfig::enhanced(CentralityWeights::default()));

        assert_eq!(engine.place(&m, 2), Err(PlacementError::MissingCentrality));
        assert!(engine.place_on(&topology, 2).is_ok());
    }

    #[test]
    fn refining_after_each_seed_still_yields_k_controllers() {
        let m = metrics(&path(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
        let config = PlacementConfig::advanced()
            .with_schedule(RefinementSchedule::AfterEachSeed)
            .with_convergence(ConvergenceMode::Positional);
        let placement = Engine::new(config).place(&m, 3).unwrap();

        assert_eq!(placement.k(), 3);
        assert_eq!(
            placement.clusters.iter().map(|c| c.size()).sum::<usize>(),
            9
        );
    }
}
