use std::collections::BTreeMap;
use log::debug;
use serde::Serialize;

use crate::graph::traits::{Graph, Node, Weight};
use crate::graph::{count_edges, detach_node, Adjacency};
use crate::{Error, Result};

/// A read-only view of a graph's adjacency mapping
///
/// A snapshot owns its data: nothing done to the store it was taken from is visible
/// through it, and nothing done with it can reach back into the store. The shortest-path
/// engine only ever receives snapshots.
///
/// Serializes as the plain `node -> (neighbor -> weight)` mapping, which is the shape
/// visualization clients consume. Isolated nodes appear with an empty neighbor map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GraphSnapshot<N, W>
where
    N: Node,
    W: Weight,
{
    adjacency: Adjacency<N, W>,
}

impl<N, W> GraphSnapshot<N, W>
where
    N: Node,
    W: Weight,
{
    /// Wraps an adjacency mapping supplied by the caller
    ///
    /// The mapping is taken as-is. It is expected to be symmetric; weights are checked by
    /// the engine before every search.
    pub fn from_adjacency(adjacency: Adjacency<N, W>) -> Self {
        GraphSnapshot { adjacency }
    }

    /// The adjacency mapping this snapshot holds
    pub fn adjacency(&self) -> &Adjacency<N, W> {
        &self.adjacency
    }

    /// Consumes the snapshot and returns its adjacency mapping
    pub fn into_adjacency(self) -> Adjacency<N, W> {
        self.adjacency
    }

    /// Returns a new snapshot with `node` and every edge touching it removed
    ///
    /// `self` is left untouched.
    pub fn without_node(&self, node: &N) -> Result<Self> {
        if !self.adjacency.contains_key(node) {
            return Err(Error::NodeNotFound(node.to_string()));
        }

        let mut adjacency = self.adjacency.clone();
        detach_node(&mut adjacency, node);
        debug!(
            "Excluded node {} from snapshot ({} nodes remain)",
            node,
            adjacency.len()
        );
        Ok(GraphSnapshot { adjacency })
    }
}

impl<N, W> Graph<N, W> for GraphSnapshot<N, W>
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
        if let Some(neighbors) = self.adjacency.get(node) {
            Box::new(neighbors.iter().map(|(neighbor, weight)| (neighbor, *weight)))
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    fn get_edge_weight(&self, a: &N, b: &N) -> Option<W> {
        self.adjacency.get(a).and_then(|neighbors| neighbors.get(b)).copied()
    }
}

impl<N, W> From<BTreeMap<N, BTreeMap<N, W>>> for GraphSnapshot<N, W>
where
    N: Node,
    W: Weight,
{
    fn from(adjacency: BTreeMap<N, BTreeMap<N, W>>) -> Self {
        GraphSnapshot::from_adjacency(adjacency)
    }
}
