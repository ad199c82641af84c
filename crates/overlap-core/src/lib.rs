//! Scheduling service and startup wiring for Overlap.
//!
//! This crate sits between the HTTP layer and the data layer. It validates
//! caller input, owns the event lifecycle (create, vote, read, aggregate),
//! and decides at startup which storage backend the process runs against.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `overlap-config.yaml` into
//!   strongly-typed structs, with environment overrides.
//! - [`backend`] -- Turns a [`StoreConfig`] into a live [`SharedStore`].
//! - [`service`] -- The [`Scheduler`], written once against the abstract
//!   store.
//! - [`error`] -- [`ServiceError`] returned by every scheduler operation.
//!
//! [`StoreConfig`]: config::StoreConfig
//! [`SharedStore`]: overlap_db::SharedStore
//! [`Scheduler`]: service::Scheduler
//! [`ServiceError`]: error::ServiceError

pub mod backend;
pub mod config;
pub mod error;
pub mod service;

pub use backend::connect_store;
pub use config::{ConfigError, OverlapConfig, StoreBackend};
pub use error::ServiceError;
pub use service::Scheduler;
