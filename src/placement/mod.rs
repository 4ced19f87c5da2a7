//! Controller placement: seeding, partitioning and refinement

pub mod eligibility;
pub mod engine;
pub mod hdids;
pub mod initial;
pub mod metrics;
pub mod refine;
pub mod seeding;

use crate::graph::GraphMetrics;
use serde::{Deserialize, Serialize};

pub use eligibility::{eligible_nodes, EligibleSet};
pub use engine::Engine;
pub use metrics::{evaluate, PlacementReport};

/// Node indices per cluster, aligned position-by-position with the controller list
pub type Assignment = Vec<Vec<usize>>;

/// A controller and the nodes whose nearest controller it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Controller node identifier
    pub controller: String,

    /// Member identifiers in node enumeration order, controller included
    pub members: Vec<String>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.members.iter().any(|m| m == node)
    }
}

/// Result of a placement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Controller identifiers in selection order
    pub controllers: Vec<String>,

    /// One cluster per controller, same order
    pub clusters: Vec<Cluster>,

    /// Assign/Update iterations spent in refinement
    pub iterations: usize,

    /// False when the iteration cap stopped refinement early
    pub converged: bool,

    #[serde(skip)]
    pub(crate) controller_indices: Vec<usize>,

    #[serde(skip)]
    pub(crate) assignment: Assignment,
}

impl Placement {
    /// Resolve index-level results into node identifiers
    pub(crate) fn from_indices(
        metrics: &GraphMetrics,
        controllers: Vec<usize>,
        assignment: Assignment,
        iterations: usize,
        converged: bool,
    ) -> Self {
        let clusters = controllers
            .iter()
            .zip(&assignment)
            .map(|(&controller, members)| Cluster {
                controller: metrics.node_id(controller).to_string(),
                members: members
                    .iter()
                    .map(|&m| metrics.node_id(m).to_string())
                    .collect(),
            })
            .collect();

        Self {
            controllers: controllers
                .iter()
                .map(|&c| metrics.node_id(c).to_string())
                .collect(),
            clusters,
            iterations,
            converged,
            controller_indices: controllers,
            assignment,
        }
    }

    /// Number of controllers placed
    pub fn k(&self) -> usize {
        self.controllers.len()
    }

    /// Cluster headed by the given controller
    pub fn cluster_of(&self, controller: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.controller == controller)
    }

    /// Controller serving the given node
    pub fn controller_for(&self, node: &str) -> Option<&str> {
        self.clusters
            .iter()
            .find(|c| c.contains(node))
            .map(|c| c.controller.as_str())
    }

    /// Controller node indices in selection order
    pub fn controller_indices(&self) -> &[usize] {
        &self.controller_indices
    }

    /// Member indices per cluster
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}
