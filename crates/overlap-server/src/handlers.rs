//! REST API endpoint handlers.
//!
//! All handlers delegate to the [`Scheduler`](overlap_core::Scheduler) in
//! the shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness plus active backend |
//! | `POST` | `/api/events` | Create an event |
//! | `GET` | `/api/events/:id` | Get an event with all votes |
//! | `POST` | `/api/events/:id/vote` | Upsert one participant's vote |
//! | `GET` | `/api/events/:id/heatmap` | Aggregated availability |
//! | `GET` | `/api/events/:id/votes/:user` | One participant's slots |

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::NaiveDate;
use overlap_types::lenient;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/events`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    /// First day, `YYYY-MM-DD` or an ISO-8601 timestamp.
    pub start: Option<String>,
    /// Last day (inclusive), same formats as `start`.
    pub end: Option<String>,
}

/// Response of `POST /api/events`.
#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    /// The new event's id.
    pub id: String,
}

/// Body of `POST /api/events/:id/vote`.
#[derive(Debug, Default, Deserialize)]
pub struct VoteRequest {
    /// Participant display name.
    #[serde(default)]
    pub user: Option<String>,
    /// Selected slot keys. Anything but an array of strings counts as none.
    #[serde(default, deserialize_with = "lenient::slots")]
    pub slots: BTreeSet<String>,
}

/// Response of `GET /api/events/:id/votes/:user`.
#[derive(Debug, Serialize)]
pub struct MyVoteResponse {
    /// The participant asked about.
    pub user: String,
    /// Their selected slots, empty if they have not voted.
    pub slots: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report liveness and the active storage backend.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.scheduler.backend_name(),
    }))
}

// ---------------------------------------------------------------------------
// POST /api/events
// ---------------------------------------------------------------------------

/// Create an event from a start and end date.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let start = parse_date_field(req.start.as_deref())?;
    let end = parse_date_field(req.end.as_deref())?;

    let id = state.scheduler.create_event(start, end).await?;
    Ok(Json(CreateEventResponse {
        id: id.into_inner(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/events/:id
// ---------------------------------------------------------------------------

/// Return an event with its full participant list.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.scheduler.get_event(&id).await?;
    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// POST /api/events/:id/vote
// ---------------------------------------------------------------------------

/// Insert or replace the caller's vote.
pub async fn submit_vote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let user = req.user.unwrap_or_default();

    state.scheduler.submit_vote(&id, &user, req.slots).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// GET /api/events/:id/heatmap
// ---------------------------------------------------------------------------

/// Return per-slot counts and intensities for the whole grid.
pub async fn get_heatmap(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let heatmap = state.scheduler.heatmap(&id).await?;
    Ok(Json(heatmap))
}

// ---------------------------------------------------------------------------
// GET /api/events/:id/votes/:user
// ---------------------------------------------------------------------------

/// Return one participant's current selection so a returning voter can
/// pick up where they left off.
pub async fn get_my_vote(
    State(state): State<Arc<AppState>>,
    Path((id, user)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let slots = state.scheduler.my_vote(&id, &user).await?;
    Ok(Json(MyVoteResponse { user, slots }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Blank counts as missing; anything else must parse as a date.
fn parse_date_field(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => lenient::parse_date(s)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid date: {s}"))),
    }
}
