use std::collections::BTreeMap;
use std::fmt;
use log::{debug, warn};

use crate::graph::traits::{Graph, Node, Weight};
use crate::graph::{check_weight, count_edges, detach_node, Adjacency, GraphSnapshot};
use crate::{Error, Result};

/// An undirected weighted graph stored as a symmetric adjacency mapping
///
/// Every edge `a - b` is kept as two mirrored entries, `adjacency[a][b]` and
/// `adjacency[b][a]`, always holding the same weight. The keys of the mapping are the node
/// set: a node without edges is present with an empty neighbor map.
///
/// The store does no internal locking. Queries run on a [`GraphSnapshot`], which is an
/// independent copy, so mutating the store after taking a snapshot never affects a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedGraph<N, W>
where
    N: Node,
    W: Weight,
{
    adjacency: Adjacency<N, W>,
}

impl<N, W> Default for UndirectedGraph<N, W>
where
    N: Node,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, W> UndirectedGraph<N, W>
where
    N: Node,
    W: Weight,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        UndirectedGraph {
            adjacency: BTreeMap::new(),
        }
    }

    /// Adds every label as an isolated node
    ///
    /// A label that is already present is reset: its edges are removed in both directions.
    /// Use [`UndirectedGraph::ensure_node`] to add a label without touching existing edges.
    pub fn add_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Adds a single node, resetting it to an isolated node if it already exists
    pub fn add_node(&mut self, node: N) {
        if let Some(previous) = detach_node(&mut self.adjacency, &node) {
            if !previous.is_empty() {
                warn!(
                    "Re-adding node {} discarded its {} existing edge(s)",
                    node,
                    previous.len()
                );
            }
        }
        debug!("Adding node {}", node);
        self.adjacency.insert(node, BTreeMap::new());
    }

    /// Adds the node only if it is absent. Returns true if it was inserted.
    pub fn ensure_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.add_node(node);
        true
    }

    /// Creates (or overwrites) the undirected edge `a - b`
    ///
    /// Both nodes must already exist and the weight must be a non-negative number. Nothing is
    /// modified when an error is returned.
    pub fn add_edge(&mut self, a: N, b: N, weight: W) -> Result<()> {
        self.require_node(&a)?;
        self.require_node(&b)?;
        check_weight(&a, &b, weight)?;

        debug!("Adding edge {} - {} with weight {}", a, b, weight);
        if let Some(neighbors) = self.adjacency.get_mut(&a) {
            neighbors.insert(b.clone(), weight);
        }
        if let Some(neighbors) = self.adjacency.get_mut(&b) {
            neighbors.insert(a, weight);
        }
        Ok(())
    }

    /// Removes the edge `a - b` and returns its weight
    pub fn remove_edge(&mut self, a: &N, b: &N) -> Result<W> {
        let weight = self.edge_weight(a, b)?;
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.remove(b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.remove(a);
        }
        debug!("Removed edge {} - {}", a, b);
        Ok(weight)
    }

    /// Removes a node, its adjacency entry and every reference to it from other nodes
    ///
    /// Every remaining entry is scanned, which is O(nodes x degree).
    pub fn remove_node(&mut self, node: &N) -> Result<()> {
        match detach_node(&mut self.adjacency, node) {
            Some(neighbors) => {
                debug!("Removed node {} and {} edge(s)", node, neighbors.len());
                Ok(())
            }
            None => Err(Error::NodeNotFound(node.to_string())),
        }
    }

    /// Returns the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges in the graph
    pub fn edge_count(&self) -> usize {
        count_edges(&self.adjacency)
    }

    /// Returns the node labels in label order
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adjacency.keys()
    }

    /// Returns true if the node exists in the graph
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns true if there's an edge between the two nodes
    pub fn has_edge(&self, a: &N, b: &N) -> bool {
        self.adjacency
            .get(a)
            .map_or(false, |neighbors| neighbors.contains_key(b))
    }

    /// Returns the neighbors of a node with their edge weights, in label order
    pub fn neighbors(&self, node: &N) -> Result<impl Iterator<Item = (&N, W)> + '_> {
        let neighbors = self
            .adjacency
            .get(node)
            .ok_or_else(|| Error::NodeNotFound(node.to_string()))?;
        Ok(neighbors.iter().map(|(neighbor, weight)| (neighbor, *weight)))
    }

    /// Returns the weight of the edge `a - b`
    pub fn edge_weight(&self, a: &N, b: &N) -> Result<W> {
        self.require_node(a)?;
        self.require_node(b)?;
        self.adjacency
            .get(a)
            .and_then(|neighbors| neighbors.get(b))
            .copied()
            .ok_or_else(|| Error::EdgeNotFound(a.to_string(), b.to_string()))
    }

    /// Returns an independent, read-only copy of the adjacency mapping
    pub fn snapshot(&self) -> GraphSnapshot<N, W> {
        GraphSnapshot::from_adjacency(self.adjacency.clone())
    }

    fn require_node(&self, node: &N) -> Result<()> {
        if self.adjacency.contains_key(node) {
            Ok(())
        } else {
            Err(Error::NodeNotFound(node.to_string()))
        }
    }
}

impl<N, W> Graph<N, W> for UndirectedGraph<N, W>
where
    N: Node,
    W: Weight,
{
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        count_edges(&self.adjacency)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &N> + '_> {
        Box::new(self.adjacency.keys())
    }

    fn neighbors(&self, node: &N) -> Box<dyn Iterator<Item = (&N, W)> + '_> {
        match self.adjacency.get(node) {
            Some(neighbors) => Box::new(neighbors.iter().map(|(neighbor, weight)| (neighbor, *weight))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    fn get_edge_weight(&self, a: &N, b: &N) -> Option<W> {
        self.adjacency.get(a).and_then(|neighbors| neighbors.get(b)).copied()
    }
}

impl<N, W> fmt::Display for UndirectedGraph<N, W>
where
    N: Node,
    W: Weight,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (node, neighbors)) in self.adjacency.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {{", node)?;
            for (j, (neighbor, weight)) in neighbors.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", neighbor, weight)?;
            }
            write!(f, "}}")?;
        }
        write!(f, "}}")
    }
}
