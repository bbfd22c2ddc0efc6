use graph_paths::algorithm::dijkstra::Dijkstra;
use graph_paths::algorithm::traits::ShortestPathAlgorithm;
use graph_paths::data_structures::BinaryHeapWrapper;
use graph_paths::graph::generators::{generate_random_graph, reference_cities, reference_cities_with};
use graph_paths::graph::{Graph, GraphSnapshot, UndirectedGraph};
use graph_paths::{shortest_paths, Distance, Error, QueryOutcome, ShortestPath};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

fn label(name: &str) -> String {
    name.to_string()
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn expect_path<N: std::fmt::Debug, W: std::fmt::Debug>(outcome: QueryOutcome<N, W>) -> ShortestPath<N, W> {
    match outcome {
        QueryOutcome::Path(path) => path,
        other => panic!("Expected a path, got {:?}", other),
    }
}

fn expect_distances<N: std::fmt::Debug, W: std::fmt::Debug>(
    outcome: QueryOutcome<N, W>,
) -> BTreeMap<N, Distance<W>> {
    match outcome {
        QueryOutcome::Distances(distances) => distances,
        other => panic!("Expected a distance map, got {:?}", other),
    }
}

// Brute force relaxation used as the reference for random graphs
fn bellman_ford(graph: &UndirectedGraph<usize, u32>, source: usize) -> Vec<Option<u64>> {
    let n = graph.node_count();
    let mut dist = vec![None; n];
    dist[source] = Some(0u64);
    for _ in 0..n {
        let mut changed = false;
        for u in 0..n {
            let Some(du) = dist[u] else { continue };
            for (&v, w) in graph.neighbors(&u).unwrap() {
                let candidate = du + u64::from(w);
                if dist[v].map_or(true, |dv| candidate < dv) {
                    dist[v] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

#[test]
fn test_reference_distances_from_las_vegas() {
    let snapshot = reference_cities().snapshot();
    let distances = expect_distances(shortest_paths(&snapshot, &label("Las Vegas"), None, None).unwrap());

    let expected: BTreeMap<String, Distance<u32>> = [
        ("Houston", Distance::Finite(9)),
        ("Boston", Distance::Finite(9)),
        ("Austin", Distance::Finite(5)),
        ("Las Vegas", Distance::Finite(0)),
        ("Los Angeles", Distance::Finite(14)),
        ("Chicago", Distance::Finite(16)),
        ("New York", Distance::Finite(12)),
        ("Nashville", Distance::Finite(16)),
        ("Baltimore", Distance::Unreachable),
    ]
    .into_iter()
    .map(|(city, distance)| (label(city), distance))
    .collect();

    assert_eq!(distances, expected);
    assert!(distances["Las Vegas"].is_reachable());
    assert!(!distances["Baltimore"].is_reachable());
}

#[test]
fn test_reference_path_nashville_to_new_york() {
    let snapshot = reference_cities().snapshot();
    let path = expect_path(
        shortest_paths(&snapshot, &label("Nashville"), Some(&label("New York")), None).unwrap(),
    );

    assert_eq!(path.distance, 18);
    assert_eq!(path.nodes, labels(&["New York", "Boston", "Austin", "Houston", "Nashville"]));
    assert_eq!(
        path.travel_order().cloned().collect::<Vec<_>>(),
        labels(&["Nashville", "Houston", "Austin", "Boston", "New York"])
    );
    assert_eq!(path.start(), Some(&label("Nashville")));
    assert_eq!(path.end(), Some(&label("New York")));
    assert_eq!(
        path.to_string(),
        "New York <- Boston <- Austin <- Houston <- Nashville (18)"
    );
}

#[test]
fn test_reference_path_with_exclusion() {
    let graph = reference_cities();
    let snapshot = graph.snapshot();
    let path = expect_path(
        shortest_paths(
            &snapshot,
            &label("Nashville"),
            Some(&label("Boston")),
            Some(&label("Austin")),
        )
        .unwrap(),
    );

    assert_eq!(path.distance, 32);
    assert_eq!(path.nodes, labels(&["Boston", "New York", "Chicago", "Houston", "Nashville"]));
    assert!(!path.contains(&label("Austin")));

    // Neither the snapshot nor the store lost the excluded node
    assert!(snapshot.contains_node(&label("Austin")));
    assert_eq!(graph.edge_weight(&label("Boston"), &label("Austin")), Ok(4));
    assert_eq!(snapshot, graph.snapshot());
}

#[test]
fn test_excluded_node_is_absent_from_distances() {
    let snapshot = reference_cities().snapshot();
    let distances = expect_distances(
        shortest_paths(&snapshot, &label("Las Vegas"), None, Some(&label("Houston"))).unwrap(),
    );

    assert!(!distances.contains_key("Houston"));
    assert_eq!(distances.len(), 8);
    // Nashville is now only reachable through Austin
    assert_eq!(distances["Nashville"], Distance::Finite(17));
    assert_eq!(distances["Chicago"], Distance::Finite(27));
}

#[test]
fn test_start_equals_end() {
    let snapshot = reference_cities().snapshot();
    let path = expect_path(
        shortest_paths(&snapshot, &label("Boston"), Some(&label("Boston")), None).unwrap(),
    );

    assert_eq!(path.distance, 0);
    assert_eq!(path.nodes, labels(&["Boston"]));
    assert!(!path.is_empty());
    assert!(path.contains(&label("Boston")));
}

#[test]
fn test_unreachable_end() {
    let snapshot = reference_cities().snapshot();
    let outcome = shortest_paths(&snapshot, &label("Las Vegas"), Some(&label("Baltimore")), None).unwrap();
    assert_eq!(outcome, QueryOutcome::Unreachable);

    // Removing the only bridge makes a reachable node unreachable
    let outcome = shortest_paths(
        &snapshot,
        &label("Las Vegas"),
        Some(&label("Houston")),
        Some(&label("Austin")),
    )
    .unwrap();
    assert_eq!(outcome, QueryOutcome::Unreachable);
}

#[test]
fn test_query_errors() {
    let snapshot = reference_cities().snapshot();

    assert_eq!(
        shortest_paths(&snapshot, &label("Paris"), None, None),
        Err(Error::SourceNotFound(label("Paris")))
    );
    assert_eq!(
        shortest_paths(&snapshot, &label("Boston"), Some(&label("Paris")), None),
        Err(Error::NodeNotFound(label("Paris")))
    );
    assert_eq!(
        shortest_paths(&snapshot, &label("Boston"), None, Some(&label("Paris"))),
        Err(Error::NodeNotFound(label("Paris")))
    );
    assert_eq!(
        shortest_paths(&snapshot, &label("Boston"), None, Some(&label("Boston"))),
        Err(Error::InvalidExclusion(label("Boston")))
    );
    assert_eq!(
        shortest_paths(&snapshot, &label("Boston"), Some(&label("Austin")), Some(&label("Austin"))),
        Err(Error::InvalidExclusion(label("Austin")))
    );
}

#[test]
fn test_negative_weight_is_rejected() {
    let mut adjacency: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
    adjacency.insert("A", BTreeMap::from([("B", 2)]));
    adjacency.insert("B", BTreeMap::from([("A", 2), ("C", -1)]));
    adjacency.insert("C", BTreeMap::from([("B", -1)]));
    let snapshot = GraphSnapshot::from_adjacency(adjacency);

    assert_eq!(
        shortest_paths(&snapshot, &"A", None, None),
        Err(Error::NegativeWeight("B".to_string(), "C".to_string(), "-1".to_string()))
    );

    // Excluding the node carrying the negative edges leaves a valid graph
    let distances = expect_distances(shortest_paths(&snapshot, &"A", None, Some(&"C")).unwrap());
    assert_eq!(distances[&"B"], Distance::Finite(2));
}

#[test]
fn test_distance_overflow_is_reported() {
    let mut graph: UndirectedGraph<&str, u32> = UndirectedGraph::new();
    graph.add_nodes(["A", "B", "C"]);
    graph.add_edge("A", "B", u32::MAX).unwrap();

    // The largest weight on its own is still a valid distance
    let path = expect_path(shortest_paths(&graph.snapshot(), &"A", Some(&"B"), None).unwrap());
    assert_eq!(path.distance, u32::MAX);

    graph.add_edge("B", "C", 1).unwrap();
    assert_eq!(
        shortest_paths(&graph.snapshot(), &"A", Some(&"C"), None),
        Err(Error::DistanceOverflow("B".to_string(), "C".to_string()))
    );
    assert_eq!(
        shortest_paths(&graph.snapshot(), &"A", None, None),
        Err(Error::DistanceOverflow("B".to_string(), "C".to_string()))
    );

    // A representable route to C makes the overflowing one irrelevant
    graph.add_edge("A", "C", 3).unwrap();
    let distances = expect_distances(shortest_paths(&graph.snapshot(), &"A", None, None).unwrap());
    assert_eq!(distances[&"B"], Distance::Finite(u32::MAX));
    assert_eq!(distances[&"C"], Distance::Finite(3));
}

#[test]
fn test_float_distance_overflow_is_reported() {
    let mut graph: UndirectedGraph<&str, OrderedFloat<f64>> = UndirectedGraph::new();
    graph.add_nodes(["A", "B", "C"]);
    graph.add_edge("A", "B", OrderedFloat(f64::MAX)).unwrap();
    graph.add_edge("B", "C", OrderedFloat(f64::MAX)).unwrap();

    assert_eq!(
        shortest_paths(&graph.snapshot(), &"A", Some(&"C"), None),
        Err(Error::DistanceOverflow("B".to_string(), "C".to_string()))
    );
}

#[test]
fn test_nan_weight_in_snapshot_is_rejected() {
    let mut adjacency: BTreeMap<&str, BTreeMap<&str, OrderedFloat<f64>>> = BTreeMap::new();
    adjacency.insert("A", BTreeMap::from([("B", OrderedFloat(f64::NAN))]));
    adjacency.insert("B", BTreeMap::from([("A", OrderedFloat(f64::NAN))]));
    let snapshot = GraphSnapshot::from_adjacency(adjacency);

    assert_eq!(
        shortest_paths(&snapshot, &"A", None, None),
        Err(Error::InvalidWeight("A".to_string(), "B".to_string(), "NaN".to_string()))
    );
}

#[test]
fn test_equal_paths_break_ties_by_label() {
    let mut graph: UndirectedGraph<&str, u32> = UndirectedGraph::new();
    graph.add_nodes(["A", "B", "C", "D"]);
    graph.add_edge("A", "C", 1).unwrap();
    graph.add_edge("A", "B", 1).unwrap();
    graph.add_edge("C", "D", 1).unwrap();
    graph.add_edge("B", "D", 1).unwrap();

    for _ in 0..5 {
        let path = expect_path(shortest_paths(&graph.snapshot(), &"A", Some(&"D"), None).unwrap());
        assert_eq!(path.distance, 2);
        assert_eq!(path.nodes, vec!["D", "B", "A"]);
    }
}

#[test]
fn test_improved_distance_supersedes_stale_entry() {
    let mut graph: UndirectedGraph<&str, u32> = UndirectedGraph::new();
    graph.add_nodes(["A", "B", "C"]);
    graph.add_edge("A", "B", 10).unwrap();
    graph.add_edge("A", "C", 1).unwrap();
    graph.add_edge("C", "B", 1).unwrap();

    let path = expect_path(shortest_paths(&graph.snapshot(), &"A", Some(&"B"), None).unwrap());
    assert_eq!(path.distance, 2);
    assert_eq!(path.nodes, vec!["B", "C", "A"]);
}

#[test]
fn test_float_weights() {
    let snapshot = reference_cities_with(|w| OrderedFloat(f64::from(w) * 1.5)).snapshot();
    let path = expect_path(
        shortest_paths(&snapshot, &label("Nashville"), Some(&label("New York")), None).unwrap(),
    );
    assert_eq!(path.distance, OrderedFloat(27.0));
}

#[test]
fn test_trait_get_path_on_store() {
    let graph = reference_cities();
    let dijkstra = Dijkstra::new();
    let tree = dijkstra.compute_shortest_paths(&graph, &label("Los Angeles")).unwrap();

    assert_eq!(tree.source, label("Los Angeles"));
    assert_eq!(tree.reachable_count(), 8);
    assert_eq!(tree.distance_to(&label("Baltimore")), Some(Distance::Unreachable));
    assert_eq!(tree.distance_to(&label("Paris")), None);
    assert!(!tree.predecessors.contains_key("Los Angeles"));

    let path = <Dijkstra as ShortestPathAlgorithm<String, u32, UndirectedGraph<String, u32>>>::get_path(
        &dijkstra,
        &tree,
        &label("Chicago"),
    )
    .unwrap()
    .expect("Chicago should be reachable");
    assert_eq!(path.distance, 20);
    assert_eq!(path.nodes, labels(&["Chicago", "Houston", "Austin", "Boston", "Los Angeles"]));

    let unreachable = <Dijkstra as ShortestPathAlgorithm<String, u32, UndirectedGraph<String, u32>>>::get_path(
        &dijkstra,
        &tree,
        &label("Baltimore"),
    )
    .unwrap();
    assert!(unreachable.is_none());
    assert_eq!(
        <Dijkstra as ShortestPathAlgorithm<String, u32, UndirectedGraph<String, u32>>>::name(&dijkstra),
        "Dijkstra"
    );
}

#[test]
fn test_broken_predecessor_chain_is_reported() {
    let graph = reference_cities();
    let mut tree = Dijkstra::new()
        .compute_shortest_paths(&graph, &label("Las Vegas"))
        .unwrap();

    // Boston <-> Austin cycle instead of reaching Las Vegas
    tree.predecessors.insert(label("Austin"), label("Boston"));
    assert!(matches!(
        tree.path_to(&label("New York")),
        Err(Error::AlgorithmError(_))
    ));

    tree.predecessors.remove("Austin");
    assert!(matches!(
        tree.path_to(&label("New York")),
        Err(Error::AlgorithmError(_))
    ));
}

#[test]
fn test_random_graphs_match_bellman_ford() {
    for seed in 0..10u64 {
        let graph = generate_random_graph(40, 0.08, 50, seed);
        let snapshot = graph.snapshot();

        for source in [0usize, 13, 39] {
            let distances = expect_distances(shortest_paths(&snapshot, &source, None, None).unwrap());
            let reference = bellman_ford(&graph, source);

            for node in 0..40usize {
                let expected = match reference[node] {
                    Some(d) => Distance::Finite(d as u32),
                    None => Distance::Unreachable,
                };
                assert_eq!(
                    distances[&node], expected,
                    "seed {} source {} node {}",
                    seed, source, node
                );
            }
        }
    }
}

#[test]
fn test_triangle_inequality_on_random_graphs() {
    for seed in 0..4u64 {
        let graph = generate_random_graph(25, 0.15, 30, seed);
        let snapshot = graph.snapshot();

        let all: Vec<BTreeMap<usize, Distance<u32>>> = (0..25usize)
            .map(|source| expect_distances(shortest_paths(&snapshot, &source, None, None).unwrap()))
            .collect();

        for s in 0..25usize {
            for m in 0..25usize {
                for e in 0..25usize {
                    if let (Some(sm), Some(me)) = (all[s][&m].finite(), all[m][&e].finite()) {
                        let se = all[s][&e]
                            .finite()
                            .expect("a path through m exists, so e is reachable");
                        assert!(se <= sm + me, "d({},{}) > d({},{}) + d({},{})", s, e, s, m, m, e);
                    }
                }
            }
        }
    }
}

#[test]
fn test_paths_use_existing_edges_and_skip_excluded_node() {
    for seed in 0..6u64 {
        let graph = generate_random_graph(30, 0.12, 20, seed);
        let snapshot = graph.snapshot();
        let excluded = 15usize;

        let mut without = graph.clone();
        without.remove_node(&excluded).unwrap();
        let reference = expect_distances(shortest_paths(&without.snapshot(), &0, None, None).unwrap());

        let filtered = expect_distances(shortest_paths(&snapshot, &0, None, Some(&excluded)).unwrap());
        assert_eq!(filtered, reference, "seed {}", seed);

        for target in 1..30usize {
            if target == excluded {
                continue;
            }
            match shortest_paths(&snapshot, &0, Some(&target), Some(&excluded)).unwrap() {
                QueryOutcome::Path(path) => {
                    assert!(!path.contains(&excluded));
                    assert_eq!(path.end(), Some(&target));
                    assert_eq!(path.start(), Some(&0));
                    let total: u32 = path
                        .nodes
                        .windows(2)
                        .map(|pair| graph.edge_weight(&pair[0], &pair[1]).expect("Path should only use existing edges"))
                        .sum();
                    assert_eq!(total, path.distance);
                    assert_eq!(reference[&target], Distance::Finite(path.distance));
                }
                QueryOutcome::Unreachable => {
                    assert_eq!(reference[&target], Distance::Unreachable);
                }
                QueryOutcome::Distances(_) => panic!("A target was given"),
            }
        }
    }
}

#[test]
fn test_priority_queue_orders_by_distance_then_label() {
    let mut queue = BinaryHeapWrapper::new();
    queue.push("Chicago", 4u32);
    queue.push("Boston", 4);
    queue.push("Austin", 9);
    queue.push("Denver", 1);

    assert_eq!(queue.len(), 4);
    assert_eq!(queue.peek(), Some((&"Denver", 1)));
    assert_eq!(queue.pop(), Some(("Denver", 1)));
    assert_eq!(queue.pop(), Some(("Boston", 4)));
    assert_eq!(queue.pop(), Some(("Chicago", 4)));
    assert_eq!(queue.pop(), Some(("Austin", 9)));
    assert!(queue.is_empty());
}
