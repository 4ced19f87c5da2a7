//! Topology loading and results persistence

use crate::experiment::SweepPoint;
use crate::graph::{NodeInfo, Topology, TopologyBuilder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Edge record of a topology file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    /// Propagation delay
    pub weight: f64,
}

/// On-disk topology: node records plus weighted edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyFile {
    #[serde(default)]
    pub nodes: Vec<NodeInfo>,
    pub edges: Vec<EdgeRecord>,
}

impl TopologyFile {
    /// Build a topology. Nodes listed explicitly come first, in file order;
    /// nodes only mentioned by edges follow in order of first mention.
    pub fn into_topology(self) -> Result<Topology> {
        let mut builder = TopologyBuilder::with_capacity(self.nodes.len());
        for node in self.nodes {
            builder.add_node(node);
        }
        for edge in &self.edges {
            builder
                .add_edge(&edge.source, &edge.target, edge.weight)
                .with_context(|| format!("Invalid edge {} - {}", edge.source, edge.target))?;
        }
        Ok(builder.build())
    }
}

/// Parse a topology from JSON text
pub fn parse_topology(json: &str) -> Result<Topology> {
    let file: TopologyFile = serde_json::from_str(json).context("Malformed topology JSON")?;
    file.into_topology()
}

/// Load a topology JSON file
pub fn load_topology(path: &str) -> Result<Topology> {
    log::info!("Reading topology file: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path))?;
    let topology = parse_topology(&text)?;

    log::info!(
        "Loaded topology with {} nodes and {} edges",
        topology.node_count(),
        topology.edge_count()
    );
    Ok(topology)
}

/// Save sweep results to the specified directory
pub fn save_results(
    algorithm: &str,
    points: &[SweepPoint],
    topology: &Topology,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} sweep points to {}", points.len(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(algorithm, points, topology, output_dir)?;
    save_placements(algorithm, points, output_dir)?;

    log::info!("Results saved successfully");
    Ok(())
}

/// Per-k latency and load summary
fn save_summary(
    algorithm: &str,
    points: &[SweepPoint],
    topology: &Topology,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join(format!("{}_summary.json", algorithm));
    let mut file = File::create(&path)?;

    let summary = json!({
        "algorithm": algorithm,
        "graph_stats": {
            "node_count": topology.node_count(),
            "edge_count": topology.edge_count(),
        },
        "points": points.iter().map(|p| {
            json!({
                "k": p.k,
                "runs": p.runs.len(),
                "average_latency": p.average_latency,
                "max_latency": p.max_latency,
                "max_load": p.max_load,
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// Every individual run with controllers and loads
fn save_placements(algorithm: &str, points: &[SweepPoint], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join(format!("{}_placements.json", algorithm));
    let mut file = File::create(&path)?;
    file.write_all(to_string_pretty(points)?.as_bytes())?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_and_edges() {
        let topology = parse_topology(
            r#"{
                "nodes": [{"id": "waw", "label": "Warsaw", "latitude": 52.2, "longitude": 21.0}],
                "edges": [
                    {"source": "waw", "target": "poz", "weight": 1.4},
                    {"source": "poz", "target": "gda", "weight": 1.5}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(topology.node_count(), 3);
        assert_eq!(topology.node(0).display_name(), "Warsaw");
        assert_eq!(topology.index_of("gda"), Some(2));
        assert_eq!(topology.edge_weight(1, 2), Some(1.5));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let result = parse_topology(r#"{"edges": [{"source": "a", "target": "b", "weight": -2}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(load_topology("/nonexistent/topology.json").is_err());
    }
}
