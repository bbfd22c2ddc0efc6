use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use crate::graph::{Graph, Node, Weight};
use crate::{Error, Result};

/// Shortest distance from the source of a query to some node
///
/// `Unreachable` orders after every finite distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<W> {
    /// The node is reachable at this cumulative weight
    Finite(W),
    /// No path connects the node to the source
    Unreachable,
}

impl<W: Copy> Distance<W> {
    /// Returns the distance if the node is reachable
    pub fn finite(&self) -> Option<W> {
        match self {
            Distance::Finite(weight) => Some(*weight),
            Distance::Unreachable => None,
        }
    }

    /// Returns true unless the node is unreachable
    pub fn is_reachable(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(weight) => write!(f, "{}", weight),
            Distance::Unreachable => write!(f, "Unreachable"),
        }
    }
}

/// A reconstructed shortest path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath<N, W> {
    /// Total weight of the path
    pub distance: W,

    /// Nodes of the path from the end node back to the start node
    pub nodes: Vec<N>,
}

impl<N, W> ShortestPath<N, W> {
    /// Nodes of the path in travel order, start node first
    pub fn travel_order(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter().rev()
    }

    /// Node the path starts at
    pub fn start(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Node the path ends at
    pub fn end(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// Number of nodes on the path
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the path has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the path passes through `node`
    pub fn contains(&self, node: &N) -> bool
    where
        N: PartialEq,
    {
        self.nodes.contains(node)
    }
}

/// Renders `end <- ... <- start (distance)`
impl<N: fmt::Display, W: fmt::Display> fmt::Display for ShortestPath<N, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " <- ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, " ({})", self.distance)
    }
}

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathTree<N, W>
where
    N: Node,
    W: Weight,
{
    /// Distance from the source to every node of the searched graph
    pub distances: BTreeMap<N, Distance<W>>,

    /// Node through which each reached node (other than the source) was last improved
    pub predecessors: HashMap<N, N>,

    /// Source node
    pub source: N,
}

impl<N, W> ShortestPathTree<N, W>
where
    N: Node,
    W: Weight,
{
    /// Distance to `node`, or `None` if the node was not part of the searched graph
    pub fn distance_to(&self, node: &N) -> Option<Distance<W>> {
        self.distances.get(node).copied()
    }

    /// Number of nodes reachable from the source, the source included
    pub fn reachable_count(&self) -> usize {
        self.distances.values().filter(|d| d.is_reachable()).count()
    }

    /// Walks the predecessor chain back from `target` to the source
    ///
    /// Returns `Ok(None)` when the target is unreachable. The predecessor map is acyclic
    /// by construction; a node seen twice, or a chain that stops before the source, is
    /// reported as an error rather than looped over.
    pub fn path_to(&self, target: &N) -> Result<Option<ShortestPath<N, W>>> {
        let distance = match self.distances.get(target) {
            None => return Err(Error::NodeNotFound(target.to_string())),
            Some(Distance::Unreachable) => return Ok(None),
            Some(Distance::Finite(distance)) => *distance,
        };

        let mut nodes = vec![target.clone()];
        let mut visited = HashSet::new();
        visited.insert(target);
        let mut current = target;

        while *current != self.source {
            let previous = self.predecessors.get(current).ok_or_else(|| {
                Error::AlgorithmError(format!(
                    "No predecessor recorded for {} on the path to {}",
                    current, target
                ))
            })?;
            if !visited.insert(previous) {
                return Err(Error::AlgorithmError(format!(
                    "Cycle detected in path reconstruction at {}",
                    previous
                )));
            }
            nodes.push(previous.clone());
            current = previous;
        }

        Ok(Some(ShortestPath { distance, nodes }))
    }
}

/// Answer to a single shortest path query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<N, W> {
    /// No end node was given: distances to every node of the searched graph
    Distances(BTreeMap<N, Distance<W>>),
    /// The end node is reachable
    Path(ShortestPath<N, W>),
    /// The end node is not reachable from the start node
    Unreachable,
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<N, W, G>
where
    N: Node,
    W: Weight,
    G: Graph<N, W>,
{
    /// Compute shortest paths from a source node to all other nodes
    fn compute_shortest_paths(&self, graph: &G, source: &N) -> Result<ShortestPathTree<N, W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from the source to `target`, listed from `target` back to the source
    fn get_path(&self, result: &ShortestPathTree<N, W>, target: &N) -> Result<Option<ShortestPath<N, W>>> {
        result.path_to(target)
    }
}
