//! Small topologies shared by unit tests

use crate::graph::{GraphMetrics, Topology, TopologyBuilder};

/// Unit-weight cycle over the given node ids, closing back to the first
pub fn cycle(ids: &[&str]) -> Topology {
    let mut builder = TopologyBuilder::new();
    for (i, id) in ids.iter().enumerate() {
        builder.add_edge(id, ids[(i + 1) % ids.len()], 1.0).unwrap();
    }
    builder.build()
}

/// Hub `h` joined to `leaves` nodes `l0..` with unit weights
pub fn star(leaves: usize) -> Topology {
    let mut builder = TopologyBuilder::new();
    for i in 0..leaves {
        builder.add_edge("h", &format!("l{}", i), 1.0).unwrap();
    }
    builder.build()
}

/// Path `p0 - p1 - ...` with the given edge weights
pub fn path(weights: &[f64]) -> Topology {
    let mut builder = TopologyBuilder::new();
    builder.get_or_create_node("p0");
    for (i, &w) in weights.iter().enumerate() {
        builder
            .add_edge(&format!("p{}", i), &format!("p{}", i + 1), w)
            .unwrap();
    }
    builder.build()
}

/// Metrics including centrality
pub fn metrics(topology: &Topology) -> GraphMetrics {
    GraphMetrics::collect(topology, true).unwrap()
}
