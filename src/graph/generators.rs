use crate::graph::{UndirectedGraph, Weight};
use log::{debug, warn};
use rand::prelude::*;
use rand::rngs::StdRng;

/// City names of the reference distance data set
pub const REFERENCE_CITIES: [&str; 9] = [
    "Houston",
    "Boston",
    "Austin",
    "Las Vegas",
    "Los Angeles",
    "Chicago",
    "New York",
    "Nashville",
    "Baltimore",
];

/// Edges of the reference distance data set. Baltimore has no edges.
pub const REFERENCE_EDGES: [(&str, &str, u32); 9] = [
    ("Las Vegas", "Austin", 5),
    ("Los Angeles", "Boston", 5),
    ("Houston", "Chicago", 7),
    ("New York", "Chicago", 15),
    ("Nashville", "Austin", 12),
    ("Boston", "New York", 3),
    ("Houston", "Austin", 4),
    ("Nashville", "Houston", 7),
    ("Boston", "Austin", 4),
];

/// Builds the reference city graph with `u32` distances
pub fn reference_cities() -> UndirectedGraph<String, u32> {
    reference_cities_with(|weight| weight)
}

/// Builds the reference city graph, converting each distance with `weight`
pub fn reference_cities_with<W, F>(weight: F) -> UndirectedGraph<String, W>
where
    W: Weight,
    F: Fn(u32) -> W,
{
    let mut graph = UndirectedGraph::new();
    graph.add_nodes(REFERENCE_CITIES.iter().map(|city| city.to_string()));

    for &(a, b, distance) in REFERENCE_EDGES.iter() {
        if let Err(err) = graph.add_edge(a.to_string(), b.to_string(), weight(distance)) {
            warn!("Skipping reference edge {} - {}: {}", a, b, err);
        }
    }

    graph
}

/// Generates a random undirected graph with nodes `0..n`
///
/// Every unordered pair of distinct nodes is connected with probability `edge_probability`,
/// with a weight drawn uniformly from `0..=max_weight`. The same seed always yields the
/// same graph.
pub fn generate_random_graph(
    n: usize,
    edge_probability: f64,
    max_weight: u32,
    seed: u64,
) -> UndirectedGraph<usize, u32> {
    let mut graph = UndirectedGraph::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let edge_probability = edge_probability.clamp(0.0, 1.0);

    graph.add_nodes(0..n);

    for a in 0..n {
        for b in (a + 1)..n {
            if rng.gen_bool(edge_probability) {
                let weight = rng.gen_range(0..=max_weight);
                if let Err(err) = graph.add_edge(a, b, weight) {
                    warn!("Skipping random edge {} - {}: {}", a, b, err);
                }
            }
        }
    }

    debug!(
        "Generated random graph with {} nodes and {} edges (p = {}, seed = {})",
        graph.node_count(),
        graph.edge_count(),
        edge_probability,
        seed
    );

    graph
}
