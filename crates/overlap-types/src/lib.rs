//! Shared type definitions for Overlap.
//!
//! This crate is the single source of truth for the records that flow
//! between the store backends, the aggregation engine, and the HTTP API.
//! Types flow downstream to `TypeScript` via `ts-rs` for the web client.
//!
//! # Modules
//!
//! - [`ids`] -- Event identifiers (generation and client-side validation)
//! - [`structs`] -- `Event` and `Vote` records
//! - [`lenient`] -- Tolerant deserializers for legacy or damaged records

pub mod ids;
pub mod lenient;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{EventId, GENERATED_ID_LEN, MAX_ID_LEN};
pub use lenient::parse_date;
pub use structs::{Event, Vote};
