//! Graph-analysis collaborator consumed by the placement engine

use crate::error::Result;
use crate::graph::{centrality, distance, DistanceMatrix, Topology};

/// Source of the per-graph quantities the placement engine reads.
///
/// The engine never walks the graph itself; it only sees what an oracle
/// reports, indexed by the oracle's fixed node enumeration.
pub trait GraphOracle {
    fn node_count(&self) -> usize;

    /// Identifier of the node at `index`
    fn node_id(&self, index: usize) -> String;

    /// Adjacent node indices, ascending
    fn neighbors(&self, index: usize) -> Vec<usize>;

    fn all_pairs_shortest_distance(&self) -> Result<DistanceMatrix>;

    fn degree(&self) -> Vec<usize>;

    fn betweenness_centrality(&self) -> Vec<f64>;

    fn closeness_centrality(&self, distances: &DistanceMatrix) -> Vec<f64>;
}

impl GraphOracle for Topology {
    fn node_count(&self) -> usize {
        Topology::node_count(self)
    }

    fn node_id(&self, index: usize) -> String {
        self.node(index).id.clone()
    }

    fn neighbors(&self, index: usize) -> Vec<usize> {
        Topology::neighbors(self, index)
    }

    fn all_pairs_shortest_distance(&self) -> Result<DistanceMatrix> {
        distance::all_pairs_shortest_distance(self)
    }

    fn degree(&self) -> Vec<usize> {
        centrality::degree_centrality(self)
    }

    fn betweenness_centrality(&self) -> Vec<f64> {
        centrality::betweenness_centrality(self)
    }

    fn closeness_centrality(&self, distances: &DistanceMatrix) -> Vec<f64> {
        centrality::closeness_centrality(distances)
    }
}

/// Betweenness and closeness by node index
#[derive(Debug, Clone, PartialEq)]
pub struct Centrality {
    pub betweenness: Vec<f64>,
    pub closeness: Vec<f64>,
}

/// Read-only snapshot of everything a clustering run needs from the graph.
///
/// Built once per graph and shared across runs (and threads) unchanged.
#[derive(Debug, Clone)]
pub struct GraphMetrics {
    pub node_ids: Vec<String>,
    pub adjacency: Vec<Vec<usize>>,
    pub distances: DistanceMatrix,
    pub degrees: Vec<usize>,
    pub centrality: Option<Centrality>,
}

impl GraphMetrics {
    /// Query the oracle once. Centrality is only computed when requested.
    pub fn collect<G: GraphOracle + ?Sized>(oracle: &G, with_centrality: bool) -> Result<Self> {
        let n = oracle.node_count();
        log::info!("Collecting graph metrics for {} nodes", n);

        let distances = oracle.all_pairs_shortest_distance()?;
        let degrees = oracle.degree();
        let centrality = if with_centrality {
            log::debug!("Computing betweenness and closeness centrality");
            Some(Centrality {
                betweenness: oracle.betweenness_centrality(),
                closeness: oracle.closeness_centrality(&distances),
            })
        } else {
            None
        };

        Ok(Self {
            node_ids: (0..n).map(|i| oracle.node_id(i)).collect(),
            adjacency: (0..n).map(|i| oracle.neighbors(i)).collect(),
            distances,
            degrees,
            centrality,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn node_id(&self, index: usize) -> &str {
        &self.node_ids[index]
    }
}
