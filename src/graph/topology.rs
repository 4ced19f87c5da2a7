//! Undirected weighted network topology

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Per-node attributes carried alongside the graph structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Opaque node identifier
    pub id: String,

    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Optional geographic latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Optional geographic longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl NodeInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Label for display, falling back to the identifier
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Network topology: nodes are switches, edge weights are propagation delays.
///
/// Node indices follow insertion order, and that order is the fixed
/// enumeration every tie-break in the placement engine falls back to.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub(crate) graph: UnGraph<NodeInfo, f64>,
}

impl Topology {
    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of (undirected) edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Attributes of the node at `index`
    pub fn node(&self, index: usize) -> &NodeInfo {
        &self.graph[NodeIndex::new(index)]
    }

    /// Iterate node attributes in enumeration order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.graph.node_weights()
    }

    /// Index of the node with the given identifier
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx].id == id)
            .map(NodeIndex::index)
    }

    /// Indices adjacent to `index`, ascending
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(index))
            .map(NodeIndex::index)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Number of incident edges
    pub fn degree(&self, index: usize) -> usize {
        self.graph.edges(NodeIndex::new(index)).count()
    }

    /// Weight of the edge between two nodes, if any
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map(|e| self.graph[e])
    }

    /// Iterate edges as `(a, b, weight)` index triples
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Underlying petgraph representation
    pub fn as_petgraph(&self) -> &UnGraph<NodeInfo, f64> {
        &self.graph
    }
}
