//! Axum router construction for the API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for the browser client and request tracing on every call.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness and backend name
/// - `POST /api/events` -- create an event
/// - `GET /api/events/{id}` -- single event
/// - `POST /api/events/{id}/vote` -- upsert a vote
/// - `GET /api/events/{id}/heatmap` -- aggregated availability
/// - `GET /api/events/{id}/votes/{user}` -- one participant's slots
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/events", post(handlers::create_event))
        .route("/api/events/{id}", get(handlers::get_event))
        .route("/api/events/{id}/vote", post(handlers::submit_vote))
        .route("/api/events/{id}/heatmap", get(handlers::get_heatmap))
        .route("/api/events/{id}/votes/{user}", get(handlers::get_my_vote))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
