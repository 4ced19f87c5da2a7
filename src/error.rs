//! Error types for controller placement

use thiserror::Error;

/// Errors raised while building a topology or computing a placement
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    /// Requested controller count is outside `1..=node_count`
    #[error("cannot place {k} controllers on a graph with {node_count} nodes")]
    InvalidClusterCount { k: usize, node_count: usize },

    /// Centrality weights that cannot rank nodes
    #[error("invalid centrality weights: {0}")]
    InvalidWeights(String),

    /// Engine settings outside their valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No node reaches the average-degree threshold where one is required
    #[error("no node has degree >= {rho}")]
    NoEligibleNodes { rho: usize },

    /// A node pair has no finite path between them
    #[error("graph is disconnected: no path from {from} to {to}")]
    DisconnectedGraph { from: String, to: String },

    /// Edge weight is negative, NaN or infinite
    #[error("edge {from} - {to} has invalid weight {weight}")]
    InvalidEdgeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// Reference to a node identifier the topology does not contain
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// The composite initial policy needs centrality maps that were not collected
    #[error("centrality maps are required by the weighted initial policy")]
    MissingCentrality,
}

pub type Result<T> = std::result::Result<T, PlacementError>;
