//! Assign/Update refinement loop
//!
//! Assign maps every node to its nearest controller; Update moves each
//! controller to the member of its cluster with the smallest summed distance
//! to the rest of the cluster. The loop stops at a fixed point or at the
//! iteration cap, whichever comes first.

use crate::config::ConvergenceMode;
use crate::graph::{DistanceMatrix, GraphMetrics};
use crate::placement::{Assignment, EligibleSet};
use std::collections::HashSet;

/// Outcome of one refinement run
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub controllers: Vec<usize>,
    pub assignment: Assignment,
    pub iterations: usize,
    pub converged: bool,
}

/// Nearest-controller partition of all nodes.
///
/// Distance ties go to the earliest controller in `controllers`, except that a
/// controller always lands in its own cluster.
pub fn assign(distances: &DistanceMatrix, controllers: &[usize]) -> Assignment {
    let mut clusters: Assignment = vec![Vec::new(); controllers.len()];
    if controllers.is_empty() {
        return clusters;
    }

    for node in 0..distances.len() {
        let slot = match controllers.iter().position(|&c| c == node) {
            Some(own) => own,
            None => {
                let mut best = 0;
                for (slot, &c) in controllers.iter().enumerate().skip(1) {
                    if distances.get(node, c) < distances.get(node, controllers[best]) {
                        best = slot;
                    }
                }
                best
            }
        };
        clusters[slot].push(node);
    }

    clusters
}

/// New controller for every cluster.
///
/// Picks the eligible member with the smallest summed distance to all members,
/// falling back to all members when none is eligible. Empty clusters keep
/// their previous controller.
pub fn update(
    distances: &DistanceMatrix,
    eligible: &EligibleSet,
    controllers: &[usize],
    assignment: &Assignment,
) -> Vec<usize> {
    controllers
        .iter()
        .zip(assignment)
        .map(|(&previous, members)| {
            if members.is_empty() {
                return previous;
            }
            let mut best = None;
            for candidate in eligible.filter_or_all(members) {
                let cost = distances.distance_to_all(candidate, members);
                match best {
                    Some((_, best_cost)) if cost >= best_cost => {}
                    _ => best = Some((candidate, cost)),
                }
            }
            best.map_or(previous, |(node, _)| node)
        })
        .collect()
}

/// Whether two consecutive controller sets count as the same
pub fn converged(mode: ConvergenceMode, previous: &[usize], next: &[usize]) -> bool {
    match mode {
        ConvergenceMode::Positional => previous == next,
        ConvergenceMode::Unordered => {
            previous.len() == next.len()
                && previous.iter().collect::<HashSet<_>>() == next.iter().collect::<HashSet<_>>()
        }
    }
}

/// Alternate Assign and Update until the controller set stops changing or
/// `max_iterations` cycles have run.
pub fn refine(
    metrics: &GraphMetrics,
    eligible: &EligibleSet,
    initial: Vec<usize>,
    mode: ConvergenceMode,
    max_iterations: usize,
) -> Refinement {
    let distances = &metrics.distances;
    let mut controllers = initial;

    for iteration in 1..=max_iterations {
        let assignment = assign(distances, &controllers);
        let next = update(distances, eligible, &controllers, &assignment);

        if converged(mode, &controllers, &next) {
            log::debug!("Refinement converged after {} iterations", iteration);
            return Refinement {
                controllers,
                assignment,
                iterations: iteration,
                converged: true,
            };
        }

        log::trace!("Iteration {}: controllers {:?} -> {:?}", iteration, controllers, next);
        controllers = next;
    }

    log::warn!(
        "Refinement stopped at the iteration cap ({}) without converging",
        max_iterations
    );
    let assignment = assign(distances, &controllers);
    Refinement {
        controllers,
        assignment,
        iterations: max_iterations,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::{cycle, metrics, path, star};
    use crate::placement::eligible_nodes;

    #[test]
    fn assign_breaks_ties_by_controller_order() {
        let m = metrics(&cycle(&["a", "b", "c", "d"]));
        let clusters = assign(&m.distances, &[0, 2]);

        // b and d are 1 away from both a and c
        assert_eq!(clusters, vec![vec![0, 1, 3], vec![2]]);

        let swapped = assign(&m.distances, &[2, 0]);
        assert_eq!(swapped, vec![vec![1, 2, 3], vec![0]]);
    }

    #[test]
    fn controllers_stay_in_their_own_cluster_on_zero_distance() {
        let mut builder = crate::graph::TopologyBuilder::new();
        builder.add_edge("a", "b", 0.0).unwrap();
        builder.add_edge("b", "c", 1.0).unwrap();
        let m = metrics(&builder.build());

        let clusters = assign(&m.distances, &[0, 1]);
        assert_eq!(clusters, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn update_moves_to_the_cluster_median() {
        let m = metrics(&path(&[1.0, 1.0, 1.0, 1.0]));
        let eligible = eligible_nodes(&m.degrees);

        let next = update(&m.distances, &eligible, &[0], &vec![vec![0, 1, 2, 3, 4]]);
        assert_eq!(next, vec![2]);
    }

    #[test]
    fn update_falls_back_to_ineligible_members_and_keeps_empty_clusters() {
        let m = metrics(&star(5));
        let eligible = eligible_nodes(&m.degrees);

        // leaves only: nobody eligible, first minimal member wins
        let next = update(&m.distances, &eligible, &[1, 0], &vec![vec![1, 2], vec![]]);
        assert_eq!(next, vec![1, 0]);
    }

    #[test]
    fn convergence_modes_differ_on_reordering() {
        assert!(converged(ConvergenceMode::Unordered, &[1, 2], &[2, 1]));
        assert!(!converged(ConvergenceMode::Positional, &[1, 2], &[2, 1]));
        assert!(converged(ConvergenceMode::Positional, &[1, 2], &[1, 2]));
        assert!(!converged(ConvergenceMode::Unordered, &[1, 2], &[1, 3]));
    }

    #[test]
    fn refine_reaches_a_fixed_point() {
        let m = metrics(&path(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
        let eligible = eligible_nodes(&m.degrees);

        let result = refine(&m, &eligible, vec![1, 2], ConvergenceMode::Unordered, 100);
        assert!(result.converged);

        let again = assign(&m.distances, &result.controllers);
        let next = update(&m.distances, &eligible, &result.controllers, &again);
        assert!(converged(ConvergenceMode::Unordered, &result.controllers, &next));
        assert_eq!(again, result.assignment);
    }

    #[test]
    fn iteration_cap_returns_a_best_effort_result() {
        let m = metrics(&path(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
        let eligible = eligible_nodes(&m.degrees);

        let result = refine(&m, &eligible, vec![1, 2], ConvergenceMode::Unordered, 1);
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.assignment.iter().map(Vec::len).sum::<usize>(), 7);
    }
}
