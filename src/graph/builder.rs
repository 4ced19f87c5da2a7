//! Topology construction module

use crate::error::{PlacementError, Result};
use crate::graph::topology::{NodeInfo, Topology};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Builder for incrementally constructing a Topology
pub struct TopologyBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, NodeIndex>,

    /// Graph under construction
    graph: UnGraph<NodeInfo, f64>,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            graph: UnGraph::with_capacity(capacity, capacity * 2),
        }
    }

    /// Insert a node with attributes, or replace the attributes of an existing one
    pub fn add_node(&mut self, info: NodeInfo) -> usize {
        if let Some(&idx) = self.id_to_index.get(&info.id) {
            self.graph[idx] = info;
            return idx.index();
        }

        let id = info.id.clone();
        let idx = self.graph.add_node(info);
        self.id_to_index.insert(id, idx);
        idx.index()
    }

    /// Get or create a node for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> usize {
        match self.id_to_index.get(id) {
            Some(idx) => idx.index(),
            None => self.add_node(NodeInfo::new(id)),
        }
    }

    /// Add an undirected edge with a propagation delay weight.
    ///
    /// Self-loops are dropped. Adding an edge that already exists replaces its weight.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(PlacementError::InvalidEdgeWeight {
                from: src_id.to_string(),
                to: dst_id.to_string(),
                weight,
            });
        }

        let src = NodeIndex::new(self.get_or_create_node(src_id));
        let dst = NodeIndex::new(self.get_or_create_node(dst_id));

        if src == dst {
            log::warn!("Ignoring self-loop on node {}", src_id);
            return Ok(());
        }

        self.graph.update_edge(src, dst, weight);
        Ok(())
    }

    /// Add an edge between two nodes that must already exist
    pub fn connect(&mut self, src_id: &str, dst_id: &str, weight: f64) -> Result<()> {
        for id in [src_id, dst_id] {
            if !self.id_to_index.contains_key(id) {
                return Err(PlacementError::UnknownNode(id.to_string()));
            }
        }
        self.add_edge(src_id, dst_id, weight)
    }

    /// Build the topology
    pub fn build(self) -> Topology {
        log::debug!(
            "Built topology with {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        Topology { graph: self.graph }
    }
}
