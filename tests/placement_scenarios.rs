//! End-to-end placement scenarios on small hand-built topologies

use controller_placement::experiment::{sweep, Algorithm};
use controller_placement::placement::{evaluate, hdids::hdids};
use controller_placement::storage::parse_topology;
use controller_placement::{
    CentralityWeights, Engine, GraphMetrics, PlacementConfig, PlacementError, Topology,
    TopologyBuilder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build(edges: &[(&str, &str, f64)]) -> Topology {
    let mut builder = TopologyBuilder::new();
    for &(a, b, w) in edges {
        builder.add_edge(a, b, w).unwrap();
    }
    builder.build()
}

/// Two dense groups joined by a long link
fn two_regions() -> Topology {
    build(&[
        ("w1", "w2", 1.0),
        ("w1", "w3", 1.0),
        ("w2", "w3", 1.0),
        ("w3", "w4", 1.0),
        ("w2", "w4", 1.0),
        ("w4", "e1", 10.0),
        ("e1", "e2", 1.0),
        ("e1", "e3", 1.0),
        ("e2", "e3", 1.0),
        ("e3", "e4", 1.0),
        ("e2", "e4", 1.0),
    ])
}

#[test]
fn four_cycle_with_two_controllers() {
    let topology = build(&[
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "D", 1.0),
        ("D", "A", 1.0),
    ]);
    let placement = Engine::default().place_on(&topology, 2).unwrap();

    assert_eq!(placement.controllers, vec!["A", "C"]);
    // B and D tie between A and C and go to the first controller
    assert_eq!(placement.cluster_of("A").unwrap().members, vec!["A", "B", "D"]);
    assert_eq!(placement.cluster_of("C").unwrap().members, vec!["C"]);
}

#[test]
fn star_hub_is_the_single_controller() {
    let topology = build(&[
        ("hub", "a", 2.0),
        ("hub", "b", 2.0),
        ("hub", "c", 2.0),
        ("hub", "d", 2.0),
        ("hub", "e", 2.0),
    ]);

    for config in [
        PlacementConfig::advanced(),
        PlacementConfig::enhanced(CentralityWeights::default()),
    ] {
        let placement = Engine::new(config).place_on(&topology, 1).unwrap();
        assert_eq!(placement.controllers, vec!["hub"]);
        assert_eq!(placement.clusters.len(), 1);
        assert_eq!(placement.clusters[0].size(), 6);
    }
}

#[test]
fn separated_regions_each_get_a_controller() {
    let topology = two_regions();
    let placement = Engine::default().place_on(&topology, 2).unwrap();

    let west = placement.controller_for("w1").unwrap();
    let east = placement.controller_for("e4").unwrap();
    assert!(west.starts_with('w'));
    assert!(east.starts_with('e'));
    for cluster in &placement.clusters {
        let region = &cluster.controller[..1];
        assert!(cluster.members.iter().all(|m| m.starts_with(region)));
    }
}

#[test]
fn enhanced_runs_with_the_same_seed_agree() {
    let topology = two_regions();
    let metrics = GraphMetrics::collect(&topology, true).unwrap();
    let engine = Engine::new(PlacementConfig::enhanced(CentralityWeights::new(0.5, 0.5, 0.0)));

    let a = engine
        .place_with_rng(&metrics, 3, &mut StdRng::seed_from_u64(2024))
        .unwrap();
    let b = engine
        .place_with_rng(&metrics, 3, &mut StdRng::seed_from_u64(2024))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn shared_rng_continues_one_stream() {
    let topology = two_regions();
    let metrics = GraphMetrics::collect(&topology, true).unwrap();
    let engine = Engine::new(PlacementConfig::enhanced(CentralityWeights::default()));

    let mut rng = StdRng::seed_from_u64(5);
    for k in 1..=4 {
        let placement = engine.place_with_rng(&metrics, k, &mut rng).unwrap();
        assert_eq!(placement.k(), k);
    }
}

#[test]
fn disconnected_topology_fails_fast() {
    let topology = build(&[("a", "b", 1.0), ("c", "d", 1.0)]);
    let err = Engine::default().place_on(&topology, 1).unwrap_err();

    assert!(matches!(err, PlacementError::DisconnectedGraph { .. }));
}

#[test]
fn more_controllers_never_increase_worst_latency_of_the_baseline() {
    let topology = two_regions();
    let metrics = GraphMetrics::collect(&topology, false).unwrap();

    let one = evaluate(&metrics, &hdids(&metrics, 1).unwrap());
    let two = evaluate(&metrics, &hdids(&metrics, 2).unwrap());
    assert!(two.max_latency <= one.max_latency);
}

#[test]
fn sweep_reports_latency_that_reaches_zero_at_full_coverage() {
    let topology = parse_topology(
        r#"{"edges": [
            {"source": "a", "target": "b", "weight": 1.0},
            {"source": "b", "target": "c", "weight": 2.0},
            {"source": "c", "target": "d", "weight": 1.0}
        ]}"#,
    )
    .unwrap();
    let metrics = GraphMetrics::collect(&topology, false).unwrap();
    let points = sweep(&metrics, &Algorithm::Engine(PlacementConfig::advanced()), 4, 1, 0).unwrap();

    assert_eq!(points.len(), 4);
    assert!(points[0].average_latency.mean > 0.0);
    assert_eq!(points[3].average_latency.mean, 0.0);
    assert_eq!(points[3].max_load.mean, 1.0);
}
