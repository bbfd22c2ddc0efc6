use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::shortest_paths;
use crate::graph::generators::reference_cities_with;
use crate::graph::GraphSnapshot;
use crate::web::models::*;
use crate::Error;

/// Error half of every handler's result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_max_sessions(1000)
    }

    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
        }
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "state_poisoned",
                "Session store is unavailable".to_string(),
            )
        })
    }

    /// Runs `f` on the session while holding the session lock
    fn with_session<T>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut sessions = self.lock_sessions()?;
        match sessions.get_mut(&session_id) {
            Some(session) => f(session),
            None => Err(session_not_found()),
        }
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/graphs/:session_id/adjacency", get(get_adjacency))
        .route("/api/graphs/:session_id/nodes", post(add_nodes))
        .route("/api/graphs/:session_id/nodes/:label", delete(remove_node))
        .route("/api/graphs/:session_id/edges", post(add_edge))
        .route("/api/graphs/:session_id/edges/:from/:to", get(get_edge))
        .route("/api/graphs/:session_id/shortest-paths", post(run_shortest_paths))
        .route("/api/sessions", get(list_sessions))
        .route("/api/health", get(health_check))
}

/// Create a new session with its own graph
///
/// The graph is fully built before the session is stored, so a request with an invalid
/// edge leaves no session behind.
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<CreateGraphRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let mut graph = match request.preset.as_deref() {
        None => WebGraphStore::new(),
        Some("cities") => reference_city_store(),
        Some(other) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "invalid_preset",
                format!("Unknown graph preset: {}", other),
            ));
        }
    };

    graph.add_nodes(request.nodes);
    for edge in request.edges {
        graph
            .add_edge(edge.from, edge.to, OrderedFloat(edge.weight))
            .map_err(graph_error)?;
    }

    let session = Session::new(graph);
    let summary = session.summary();

    {
        let mut sessions = state.lock_sessions()?;
        if sessions.len() >= state.max_sessions {
            warn!("Refusing new session: limit of {} reached", state.max_sessions);
            return Err(error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "session_limit_reached",
                format!("At most {} sessions may exist", state.max_sessions),
            ));
        }
        sessions.insert(session.id, session);
    }

    debug!("Created session {}", summary.id);
    Ok(Json(summary))
}

/// Get the visualization document of a session's graph
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    let snapshot = state.with_session(session_id, |session| Ok(session.graph.snapshot()))?;
    Ok(Json(WebGraph::from_snapshot(&snapshot)))
}

/// Get the raw adjacency mapping of a session's graph
pub async fn get_adjacency(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GraphSnapshot<String, OrderedFloat<f64>>>, ApiError> {
    let snapshot = state.with_session(session_id, |session| Ok(session.graph.snapshot()))?;
    Ok(Json(snapshot))
}

/// Add nodes to a session's graph
pub async fn add_nodes(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddNodesRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    state.with_session(session_id, |session| {
        session.graph.add_nodes(request.nodes);
        session.touch();
        Ok(Json(session.summary()))
    })
}

/// Remove a node and its edges from a session's graph
pub async fn remove_node(
    State(state): State<AppState>,
    Path((session_id, label)): Path<(Uuid, String)>,
) -> Result<Json<SessionSummary>, ApiError> {
    state.with_session(session_id, |session| {
        session.graph.remove_node(&label).map_err(graph_error)?;
        session.touch();
        Ok(Json(session.summary()))
    })
}

/// Add or overwrite an edge in a session's graph
pub async fn add_edge(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EdgeRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    state.with_session(session_id, |session| {
        session
            .graph
            .add_edge(request.from, request.to, OrderedFloat(request.weight))
            .map_err(graph_error)?;
        session.touch();
        Ok(Json(session.summary()))
    })
}

/// Get the weight of an edge
pub async fn get_edge(
    State(state): State<AppState>,
    Path((session_id, from, to)): Path<(Uuid, String, String)>,
) -> Result<Json<EdgeWeightResponse>, ApiError> {
    state.with_session(session_id, |session| {
        let weight = session.graph.edge_weight(&from, &to).map_err(graph_error)?;
        Ok(Json(EdgeWeightResponse {
            from: from.clone(),
            to: to.clone(),
            weight: weight.into_inner(),
        }))
    })
}

/// Run a shortest path query on a session's graph
///
/// The session lock is held only while the snapshot is taken; the search runs on the
/// snapshot after the lock is released.
pub async fn run_shortest_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ShortestPathRequest>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let snapshot = state.with_session(session_id, |session| Ok(session.graph.snapshot()))?;

    let start_time = Instant::now();
    let outcome = shortest_paths(
        &snapshot,
        &request.start,
        request.end.as_ref(),
        request.exclude.as_ref(),
    )
    .map_err(graph_error)?;
    let execution_time = start_time.elapsed();

    Ok(Json(ShortestPathResponse::new(
        &request,
        outcome,
        execution_time.as_secs_f64() * 1000.0,
    )))
}

/// List all sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let sessions = state.lock_sessions()?;
    let mut summaries: Vec<SessionSummary> = sessions.values().map(Session::summary).collect();
    summaries.sort_by_key(|summary| summary.created_at);
    Ok(Json(summaries))
}

/// Health check endpoint
pub async fn health_check() -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn reference_city_store() -> WebGraphStore {
    reference_cities_with(|weight| OrderedFloat(f64::from(weight)))
}

fn error_response(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        "session_not_found",
        "Session not found".to_string(),
    )
}

/// Maps a graph or query error to its HTTP status
pub fn graph_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::NodeNotFound(_) => (StatusCode::NOT_FOUND, "node_not_found"),
        Error::EdgeNotFound(_, _) => (StatusCode::NOT_FOUND, "edge_not_found"),
        Error::SourceNotFound(_) => (StatusCode::NOT_FOUND, "source_not_found"),
        Error::InvalidExclusion(_) => (StatusCode::BAD_REQUEST, "invalid_exclusion"),
        Error::NegativeWeight(_, _, _) => (StatusCode::BAD_REQUEST, "negative_weight"),
        Error::InvalidWeight(_, _, _) => (StatusCode::BAD_REQUEST, "invalid_weight"),
        Error::DistanceOverflow(_, _) => (StatusCode::UNPROCESSABLE_ENTITY, "distance_overflow"),
        Error::AlgorithmError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "algorithm_error"),
    };

    let details = match &err {
        Error::NegativeWeight(from, to, weight) | Error::InvalidWeight(from, to, weight) => Some(serde_json::json!({
            "from": from,
            "to": to,
            "weight": weight,
        })),
        _ => None,
    };

    let (status, Json(mut body)) = error_response(status, code, err.to_string());
    body.details = details;
    (status, Json(body))
}

