//! Graph Paths - weighted undirected graphs with Dijkstra shortest-path queries
//!
//! The crate has two halves. [`UndirectedGraph`] is the graph store: it owns a set of
//! labeled nodes and a symmetric weighted adjacency mapping. [`GraphSnapshot`] is a deep,
//! read-only copy of that mapping which the shortest-path engine consumes, so a query can
//! never observe or cause a mutation of the store.
//!
//! ```
//! use graph_paths::{shortest_paths, QueryOutcome, UndirectedGraph};
//!
//! let mut graph: UndirectedGraph<&str, u32> = UndirectedGraph::new();
//! graph.add_nodes(["London", "Paris", "Brussels"]);
//! graph.add_edge("London", "Paris", 5).unwrap();
//! graph.add_edge("Paris", "Brussels", 3).unwrap();
//!
//! let outcome = shortest_paths(&graph.snapshot(), &"London", Some(&"Brussels"), None).unwrap();
//! match outcome {
//!     QueryOutcome::Path(path) => assert_eq!(path.distance, 8),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod web;

pub use algorithm::{
    dijkstra::{shortest_paths, Dijkstra},
    Distance, QueryOutcome, ShortestPath, ShortestPathAlgorithm, ShortestPathTree,
};
/// Re-export main types for convenient use
pub use graph::{GraphSnapshot, UndirectedGraph};

/// Error types for the library
///
/// Labels and weights are rendered with `Display` so the error type does not depend on the
/// node or weight type of the graph that produced it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: between {0} and {1}")]
    EdgeNotFound(String, String),

    #[error("Node {0} cannot be excluded: it is the start or end of the query")]
    InvalidExclusion(String),

    #[error("Negative edge weight {2} between {0} and {1}")]
    NegativeWeight(String, String, String),

    #[error("Edge weight {2} between {0} and {1} is not a number")]
    InvalidWeight(String, String, String),

    #[error("Distance overflow relaxing edge {0} - {1}")]
    DistanceOverflow(String, String),

    #[error("Source node not found in graph: {0}")]
    SourceNotFound(String),

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
