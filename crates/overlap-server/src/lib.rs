//! HTTP API server for Overlap.
//!
//! This crate provides an Axum HTTP server that exposes the scheduler to
//! the web client:
//!
//! - **Event endpoints** for creating and reading events
//! - **Vote endpoint** for upserting one participant's availability
//! - **Aggregate endpoints** for the heatmap and a participant's own vote
//! - **Health check** (`GET /health`) naming the active storage backend
//!
//! # Architecture
//!
//! Handlers are thin: they decode the request, call the
//! [`Scheduler`](overlap_core::Scheduler) held in [`AppState`], and map
//! [`ServiceError`](overlap_core::ServiceError) onto HTTP status codes via
//! [`ApiError`]. No handler knows which storage backend is running.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
