pub mod traits;
pub mod dijkstra;

pub use traits::{Distance, QueryOutcome, ShortestPath, ShortestPathAlgorithm, ShortestPathTree};
