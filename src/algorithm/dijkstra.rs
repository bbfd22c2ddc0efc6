use std::collections::{BTreeMap, HashMap};
use log::{debug, trace};

use crate::algorithm::{Distance, QueryOutcome, ShortestPathAlgorithm, ShortestPathTree};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::{Graph, GraphSnapshot, Node, Weight};
use crate::{Error, Result};

/// Classic Dijkstra's algorithm implementation
///
/// Uses lazy deletion: an improved distance is pushed as a new queue entry and the
/// outdated entry is skipped when it surfaces, so the queue never needs a decrease-key.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Runs a single query against a snapshot
    ///
    /// With `exclude`, the search runs on a copy of the snapshot without that node. With
    /// `end`, the outcome is the path to it (or `Unreachable`); without, it is the full
    /// distance map.
    pub fn query<N, W>(
        &self,
        graph: &GraphSnapshot<N, W>,
        start: &N,
        end: Option<&N>,
        exclude: Option<&N>,
    ) -> Result<QueryOutcome<N, W>>
    where
        N: Node,
        W: Weight,
    {
        let filtered;
        let graph = match exclude {
            Some(excluded) => {
                if excluded == start || Some(excluded) == end {
                    return Err(Error::InvalidExclusion(excluded.to_string()));
                }
                filtered = graph.without_node(excluded)?;
                &filtered
            }
            None => graph,
        };

        if !graph.contains_node(start) {
            return Err(Error::SourceNotFound(start.to_string()));
        }
        if let Some(end) = end {
            if !graph.contains_node(end) {
                return Err(Error::NodeNotFound(end.to_string()));
            }
        }

        let tree = self.compute_shortest_paths(graph, start)?;

        let end = match end {
            Some(end) => end,
            None => return Ok(QueryOutcome::Distances(tree.distances)),
        };

        match tree.path_to(end)? {
            Some(path) => {
                debug!("Shortest path {} -> {}: {}", start, end, path);
                Ok(QueryOutcome::Path(path))
            }
            None => {
                debug!("{} is unreachable from {}", end, start);
                Ok(QueryOutcome::Unreachable)
            }
        }
    }
}

/// Computes shortest paths from `start` on a snapshot
///
/// See [`Dijkstra::query`].
pub fn shortest_paths<N, W>(
    graph: &GraphSnapshot<N, W>,
    start: &N,
    end: Option<&N>,
    exclude: Option<&N>,
) -> Result<QueryOutcome<N, W>>
where
    N: Node,
    W: Weight,
{
    Dijkstra::new().query(graph, start, end, exclude)
}

impl<N, W, G> ShortestPathAlgorithm<N, W, G> for Dijkstra
where
    N: Node,
    W: Weight,
    G: Graph<N, W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: &N) -> Result<ShortestPathTree<N, W>> {
        if !graph.contains_node(source) {
            return Err(Error::SourceNotFound(source.to_string()));
        }
        graph.validate_non_negative()?;

        // A node missing from `best` has never been reached
        let mut best: HashMap<N, W> = HashMap::with_capacity(graph.node_count());
        let mut predecessors: HashMap<N, N> = HashMap::new();
        // Nodes a relaxation could not represent, with the node relaxed from
        let mut overflowed: HashMap<N, N> = HashMap::new();

        best.insert(source.clone(), W::zero());

        let mut queue = BinaryHeapWrapper::new();
        queue.push(source.clone(), W::zero());

        let mut settled = 0usize;
        let mut stale = 0usize;

        while let Some((u, dist_u)) = queue.pop() {
            // If we've already found a shorter path to u, skip
            if let Some(current_dist) = best.get(&u) {
                if dist_u > *current_dist {
                    trace!("Skipping stale entry ({}, {})", dist_u, u);
                    stale += 1;
                    continue;
                }
            }
            trace!("Settling {} at {}", u, dist_u);
            settled += 1;

            for (v, weight) in graph.neighbors(&u) {
                let new_dist = match dist_u.checked_sum(weight) {
                    Some(sum) => sum,
                    None => {
                        trace!("Distance overflow relaxing {} -> {}", u, v);
                        overflowed.entry(v.clone()).or_insert_with(|| u.clone());
                        continue;
                    }
                };

                let should_update = match best.get(v) {
                    None => true,
                    Some(current_dist) => new_dist < *current_dist,
                };

                if should_update {
                    trace!("Relaxing {} -> {} to {}", u, v, new_dist);
                    best.insert(v.clone(), new_dist);
                    predecessors.insert(v.clone(), u.clone());
                    queue.push(v.clone(), new_dist);
                }
            }
        }

        // An overflow only matters for a node no representable path reached
        for node in graph.nodes() {
            if best.contains_key(node) {
                continue;
            }
            if let Some(from) = overflowed.get(node) {
                return Err(Error::DistanceOverflow(from.to_string(), node.to_string()));
            }
        }

        let mut distances: BTreeMap<N, Distance<W>> = graph
            .nodes()
            .map(|node| (node.clone(), Distance::Unreachable))
            .collect();
        for (node, dist) in best {
            distances.insert(node, Distance::Finite(dist));
        }

        debug!(
            "Dijkstra from {}: settled {} of {} nodes, skipped {} stale entries",
            source,
            settled,
            distances.len(),
            stale
        );

        Ok(ShortestPathTree {
            distances,
            predecessors,
            source: source.clone(),
        })
    }
}
