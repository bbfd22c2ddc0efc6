pub mod traits;
pub mod undirected;
pub mod snapshot;
pub mod generators;

pub use traits::{Graph, Node, Weight};
pub use undirected::UndirectedGraph;
pub use snapshot::GraphSnapshot;

use std::collections::BTreeMap;

use crate::{Error, Result};

/// Adjacency mapping: node -> (neighbor -> weight)
pub type Adjacency<N, W> = BTreeMap<N, BTreeMap<N, W>>;

/// Removes `node` from the mapping together with every reference to it held by the
/// remaining nodes. Returns the removed node's own neighbor map.
pub(crate) fn detach_node<N, W>(adjacency: &mut Adjacency<N, W>, node: &N) -> Option<BTreeMap<N, W>>
where
    N: Node,
{
    let removed = adjacency.remove(node)?;
    for neighbors in adjacency.values_mut() {
        neighbors.remove(node);
    }
    Some(removed)
}

/// Number of undirected edges in a symmetric mapping; a self-loop counts once.
pub(crate) fn count_edges<N, W>(adjacency: &Adjacency<N, W>) -> usize
where
    N: Node,
{
    adjacency
        .iter()
        .map(|(node, neighbors)| neighbors.keys().filter(|neighbor| *neighbor >= node).count())
        .sum()
}

/// Checks that `weight` may be stored on the edge `a - b`
pub(crate) fn check_weight<N, W>(a: &N, b: &N, weight: W) -> Result<()>
where
    N: Node,
    W: Weight,
{
    if !weight.is_number() {
        return Err(Error::InvalidWeight(a.to_string(), b.to_string(), weight.to_string()));
    }
    if weight < W::zero() {
        return Err(Error::NegativeWeight(a.to_string(), b.to_string(), weight.to_string()));
    }
    Ok(())
}
