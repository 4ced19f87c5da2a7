//! Controller placement on weighted network topologies
//!
//! Selects `k` controller nodes so that every switch has low shortest-path
//! delay to its nearest controller, using degree-constrained K-Means style
//! clustering over graph distances.

pub mod config;
pub mod error;
pub mod experiment;
pub mod graph;
pub mod placement;
pub mod storage;

pub use config::{
    CentralityWeights, ConvergenceMode, InitialCenterPolicy, NextCenterPolicy, PlacementConfig,
    RefinementSchedule,
};
pub use error::PlacementError;
pub use graph::{GraphMetrics, GraphOracle, Topology, TopologyBuilder};
pub use placement::{Cluster, Engine, Placement};
