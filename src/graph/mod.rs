//! Topology representation and graph-analysis collaborators

pub mod builder;
pub mod centrality;
pub mod distance;
pub mod oracle;
pub mod topology;

pub use builder::TopologyBuilder;
pub use distance::{all_pairs_shortest_distance, DistanceMatrix};
pub use oracle::{Centrality, GraphMetrics, GraphOracle};
pub use topology::{NodeInfo, Topology};

#[cfg(test)]
pub(crate) mod fixtures;
