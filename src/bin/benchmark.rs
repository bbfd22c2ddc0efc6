use std::time::{Duration, Instant};
use graph_paths::graph::generators::generate_random_graph;
use graph_paths::graph::GraphSnapshot;
use graph_paths::{shortest_paths, QueryOutcome};

// Function to time repeated queries on a snapshot
fn benchmark_queries(
    name: &str,
    snapshot: &GraphSnapshot<usize, u32>,
    end: Option<usize>,
    exclude: Option<usize>,
    iterations: u32,
) -> Duration {
    let start = Instant::now();
    let mut last = None;
    for _ in 0..iterations {
        match shortest_paths(snapshot, &0, end.as_ref(), exclude.as_ref()) {
            Ok(outcome) => last = Some(outcome),
            Err(err) => {
                println!("  - {} failed: {}", name, err);
                return start.elapsed();
            }
        }
    }
    let duration = start.elapsed() / iterations.max(1);

    match last {
        Some(QueryOutcome::Distances(distances)) => {
            let reachable = distances.values().filter(|d| d.is_reachable()).count();
            println!("  - {}: {} reachable nodes in {:?}", name, reachable, duration);
        }
        Some(QueryOutcome::Path(path)) => {
            println!("  - {}: distance {} over {} nodes in {:?}", name, path.distance, path.len(), duration);
        }
        Some(QueryOutcome::Unreachable) => {
            println!("  - {}: target unreachable in {:?}", name, duration);
        }
        None => {}
    }

    duration
}

fn main() {
    // Define graph sizes to test; the store targets small graphs
    let graph_sizes = vec![50, 100, 250, 500, 1_000];

    // Expected number of edges per node
    let average_degree = 4.0;
    let iterations = 20;

    println!("=====================================================");
    println!("Benchmark: Dijkstra on random undirected graphs");
    println!("Average degree: {}", average_degree);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &graph_sizes {
        let probability = average_degree / (size as f64 - 1.0);
        let graph = generate_random_graph(size, probability, 100, size as u64);
        println!("\nGraph with {} nodes and {} edges", graph.node_count(), graph.edge_count());

        let snapshot_start = Instant::now();
        let snapshot = graph.snapshot();
        let snapshot_time = snapshot_start.elapsed();
        println!("  - snapshot taken in {:?}", snapshot_time);

        let target = size - 1;
        let excluded = size / 2;
        let all_time = benchmark_queries("all distances", &snapshot, None, None, iterations);
        let target_time = benchmark_queries("single target", &snapshot, Some(target), None, iterations);
        let exclude_time = benchmark_queries("target with exclusion", &snapshot, Some(target), Some(excluded), iterations);

        results.push((size, snapshot_time, all_time, target_time, exclude_time));
    }

    // Print summary table
    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15} | {:<15} | {:<15}",
             "Nodes", "Snapshot (us)", "All (us)", "Target (us)", "Excluded (us)");
    println!("-----------------------------------------------------");

    for (size, snapshot_time, all_time, target_time, exclude_time) in &results {
        println!("{:<10} | {:<15} | {:<15} | {:<15} | {:<15}",
                 size,
                 snapshot_time.as_micros(),
                 all_time.as_micros(),
                 target_time.as_micros(),
                 exclude_time.as_micros());
    }
}
