use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::algorithm::{Distance, QueryOutcome};
use crate::graph::{GraphSnapshot, UndirectedGraph};

/// Graph store held by each web session
pub type WebGraphStore = UndirectedGraph<String, OrderedFloat<f64>>;

/// Represents a node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
    #[serde(default)]
    pub degree: usize,
}

/// Represents an edge in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Represents a complete graph for web visualization
///
/// Node ids are positions in label order. Each undirected edge appears once, with the
/// smaller id as `source`; nodes without edges are still listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

impl WebGraph {
    pub fn from_snapshot(snapshot: &GraphSnapshot<String, OrderedFloat<f64>>) -> Self {
        let adjacency = snapshot.adjacency();
        let ids: HashMap<&String, usize> = adjacency
            .keys()
            .enumerate()
            .map(|(id, label)| (label, id))
            .collect();

        let nodes = adjacency
            .iter()
            .enumerate()
            .map(|(id, (label, neighbors))| WebNode {
                id,
                label: label.clone(),
                degree: neighbors.len(),
            })
            .collect();

        let mut links = Vec::new();
        for (source, neighbors) in adjacency.values().enumerate() {
            for (neighbor, weight) in neighbors {
                if let Some(&target) = ids.get(neighbor) {
                    if target >= source {
                        links.push(WebEdge {
                            source,
                            target,
                            weight: weight.into_inner(),
                        });
                    }
                }
            }
        }

        WebGraph { nodes, links }
    }
}

/// Body of a graph creation request
#[derive(Debug, Default, Deserialize)]
pub struct CreateGraphRequest {
    /// Named starting graph; only `"cities"` is known
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeRequest>,
}

/// Nodes to add to a graph
#[derive(Debug, Deserialize)]
pub struct AddNodesRequest {
    pub nodes: Vec<String>,
}

/// An undirected edge to add to a graph
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRequest {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Parameters of a shortest path query
#[derive(Debug, Deserialize)]
pub struct ShortestPathRequest {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub exclude: Option<String>,
}

/// Weight of a single edge
#[derive(Debug, Clone, Serialize)]
pub struct EdgeWeightResponse {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Result of a shortest path query
///
/// Exactly one shape is filled in: `distances` (no end node), `distance` with `path`
/// (end node reachable) or `unreachable: true`. In `distances`, unreachable nodes map to
/// `null` and are also listed in `unreachable_nodes`.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathResponse {
    pub execution_id: Uuid,
    pub start: String,
    pub end: Option<String>,
    pub exclude: Option<String>,
    pub execution_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<BTreeMap<String, Option<f64>>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreachable_nodes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Path from the end node back to the start node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    pub unreachable: bool,
}

impl ShortestPathResponse {
    pub fn new(
        request: &ShortestPathRequest,
        outcome: QueryOutcome<String, OrderedFloat<f64>>,
        execution_time_ms: f64,
    ) -> Self {
        let mut response = ShortestPathResponse {
            execution_id: Uuid::new_v4(),
            start: request.start.clone(),
            end: request.end.clone(),
            exclude: request.exclude.clone(),
            execution_time_ms,
            distances: None,
            unreachable_nodes: Vec::new(),
            distance: None,
            path: None,
            unreachable: false,
        };

        match outcome {
            QueryOutcome::Distances(distances) => {
                let mut web_distances = BTreeMap::new();
                for (node, distance) in distances {
                    if let Distance::Unreachable = distance {
                        response.unreachable_nodes.push(node.clone());
                    }
                    web_distances.insert(node, distance.finite().map(|d| d.into_inner()));
                }
                response.distances = Some(web_distances);
            }
            QueryOutcome::Path(path) => {
                response.distance = Some(path.distance.into_inner());
                response.path = Some(path.nodes);
            }
            QueryOutcome::Unreachable => {
                response.unreachable = true;
            }
        }

        response
    }
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session owning one graph store
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraphStore,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebGraphStore) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            graph,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a mutation of the session's graph
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable overview of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub node_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
