//! All-pairs shortest-path distances

use crate::error::{PlacementError, Result};
use crate::graph::Topology;
use ndarray::{Array2, ArrayView1};
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

/// Square matrix of shortest-path distances keyed by node index pairs.
///
/// Immutable once built; every entry is finite and the diagonal is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Array2<f64>,
}

impl DistanceMatrix {
    /// Wrap a precomputed square matrix.
    ///
    /// Rejects non-square input and infinite or NaN entries.
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(PlacementError::InvalidWeights(format!(
                "distance matrix must be square, got {}x{}",
                rows, cols
            )));
        }
        if let Some(((source, target), _)) = data.indexed_iter().find(|(_, d)| !d.is_finite()) {
            return Err(PlacementError::DisconnectedGraph {
                from: source.to_string(),
                to: target.to_string(),
            });
        }
        Ok(Self { data })
    }

    /// Number of nodes covered by the matrix
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Distance between two nodes
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.data[[a, b]]
    }

    /// Distances from `node` to every node
    pub fn row(&self, node: usize) -> ArrayView1<'_, f64> {
        self.data.row(node)
    }

    /// Sum of distances from `node` to every node in the graph
    pub fn total_distance(&self, node: usize) -> f64 {
        self.data.row(node).sum()
    }

    /// Sum of distances from `node` to each of `members`
    pub fn distance_to_all(&self, node: usize, members: &[usize]) -> f64 {
        members.iter().map(|&m| self.data[[node, m]]).sum()
    }

    /// Minimum distance from `node` to any of `centers` (infinity when empty)
    pub fn nearest(&self, node: usize, centers: &[usize]) -> f64 {
        centers
            .iter()
            .map(|&c| self.data[[node, c]])
            .fold(f64::INFINITY, f64::min)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

/// Compute all-pairs shortest-path distances with one Dijkstra run per source.
///
/// Fails with `DisconnectedGraph` on the first unreachable pair.
pub fn all_pairs_shortest_distance(topology: &Topology) -> Result<DistanceMatrix> {
    let graph = topology.as_petgraph();
    let n = graph.node_count();
    log::debug!("Computing all-pairs shortest paths for {} nodes", n);

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|source| {
            let reached = dijkstra(graph, NodeIndex::new(source), None, |e| *e.weight());
            (0..n)
                .map(|target| {
                    reached.get(&NodeIndex::new(target)).copied().ok_or_else(|| {
                        PlacementError::DisconnectedGraph {
                            from: topology.node(source).id.clone(),
                            to: topology.node(target).id.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<_>>()?;

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let data = Array2::from_shape_vec((n, n), flat)
        .map_err(|e| PlacementError::InvalidWeights(e.to_string()))?;

    Ok(DistanceMatrix { data })
}
