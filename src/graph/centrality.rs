//! Degree, betweenness and closeness centrality on weighted topologies
//!
//! Betweenness uses Brandes' accumulation over Dijkstra shortest-path DAGs, so
//! edge weights (propagation delays) decide which paths count as shortest.
//! Scores are normalized by `(n - 1)(n - 2)`, the convention for undirected
//! graphs where every unordered pair is visited from both ends.
//!
//! Closeness is `(n - 1) / Σ d(v, u)`, scaled by the reachable fraction so a
//! node that reaches few others cannot look central.

use crate::graph::{DistanceMatrix, Topology};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Number of incident edges per node
pub fn degree_centrality(topology: &Topology) -> Vec<usize> {
    (0..topology.node_count())
        .map(|node| topology.degree(node))
        .collect()
}

/// Heap entry ordered so the smallest distance pops first
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    node: usize,
    pred: Option<usize>,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Shortest-path DAG from one source.
///
/// Returns settled order, path counts and predecessor lists.
fn shortest_path_dag(topology: &Topology, source: usize) -> (Vec<usize>, Vec<f64>, Vec<Vec<usize>>) {
    let graph = topology.as_petgraph();
    let n = graph.node_count();

    let mut sigma = vec![0.0_f64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut seen = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut order = Vec::with_capacity(n);

    sigma[source] = 1.0;
    seen[source] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        dist: 0.0,
        node: source,
        pred: None,
    });

    while let Some(Frontier { dist, node, pred }) = heap.pop() {
        if settled[node] {
            continue;
        }
        if let Some(p) = pred {
            sigma[node] += sigma[p];
        }
        settled[node] = true;
        order.push(node);

        for edge in graph.edges(NodeIndex::new(node)) {
            let next = if edge.source().index() == node {
                edge.target().index()
            } else {
                edge.source().index()
            };
            let candidate = dist + *edge.weight();

            if settled[next] {
                continue;
            }
            if candidate < seen[next] {
                seen[next] = candidate;
                heap.push(Frontier {
                    dist: candidate,
                    node: next,
                    pred: Some(node),
                });
                sigma[next] = 0.0;
                predecessors[next] = vec![node];
            } else if candidate == seen[next] {
                sigma[next] += sigma[node];
                predecessors[next].push(node);
            }
        }
    }

    (order, sigma, predecessors)
}

/// Normalized weighted betweenness centrality (Brandes)
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(topology: &Topology) -> Vec<f64> {
    let n = topology.node_count();
    if n < 3 {
        return vec![0.0; n];
    }

    let mut betweenness = (0..n)
        .into_par_iter()
        .map(|source| {
            let (order, sigma, predecessors) = shortest_path_dag(topology, source);
            let mut delta = vec![0.0_f64; n];
            let mut partial = vec![0.0_f64; n];

            // Farthest nodes first
            for &w in order.iter().rev() {
                for &v in &predecessors[w] {
                    delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
                }
                if w != source {
                    partial[w] += delta[w];
                }
            }
            partial
        })
        .reduce(
            || vec![0.0_f64; n],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(partial) {
                    *a += p;
                }
                acc
            },
        );

    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for b in &mut betweenness {
        *b *= scale;
    }
    betweenness
}

/// Closeness centrality from a precomputed distance matrix
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(distances: &DistanceMatrix) -> Vec<f64> {
    let n = distances.len();
    (0..n)
        .map(|node| {
            let row = distances.row(node);
            let reachable = row.iter().filter(|d| d.is_finite()).count();
            let total: f64 = row.iter().filter(|d| d.is_finite()).sum();
            if total > 0.0 && n > 1 {
                let others = (reachable - 1) as f64;
                (others / total) * (others / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect()
}
