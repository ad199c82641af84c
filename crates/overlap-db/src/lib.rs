//! Data layer for Overlap.
//!
//! One contract, [`EventStore`], with three interchangeable backends. The
//! backend is chosen once at startup and handed to the rest of the system
//! as a [`SharedStore`]; nothing downstream knows which one is active.
//!
//! # Architecture
//!
//! ```text
//! Scheduler (overlap-core)
//!     |
//!     +-- SharedStore = Arc<dyn EventStore>
//!         |-- FileStore        (one JSON document, atomic rename)
//!         |-- DragonflyStore   (key per event, rolling TTL, CAS upsert)
//!         +-- PostgresStore    (events table, row-locked upsert)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`EventStore`] trait
//! - [`file`] -- Single-file JSON backend
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) backend
//! - [`postgres`] -- `PostgreSQL` backend and pool configuration
//! - [`error`] -- Shared error types

pub mod dragonfly;
pub mod error;
pub mod file;
pub mod postgres;
pub mod store;

// Re-export primary types for convenience.
pub use dragonfly::DragonflyStore;
pub use error::StoreError;
pub use file::FileStore;
pub use postgres::{PostgresConfig, PostgresStore};
pub use store::{EventStore, SharedStore};
