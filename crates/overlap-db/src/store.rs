//! The event store contract.
//!
//! Every backend implements [`EventStore`]. The rest of the system is
//! written once against this trait and receives a concrete backend as a
//! [`SharedStore`] built at startup, so no call site ever branches on which
//! backend is active.

use std::sync::Arc;

use async_trait::async_trait;
use overlap_types::{Event, EventId, Vote};

use crate::error::StoreError;

/// A store handle shared across request handlers.
pub type SharedStore = Arc<dyn EventStore>;

/// Durable key-value persistence for events plus a vote upsert.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Short backend label for logs and health checks.
    fn backend_name(&self) -> &'static str;

    /// Fetch an event. A missing id is `Ok(None)`, never an error.
    async fn get_event(&self, id: &EventId) -> Result<Option<Event>, StoreError>;

    /// Persist a new event keyed by its id.
    ///
    /// Returns [`StoreError::DuplicateId`] instead of overwriting an
    /// existing record.
    async fn create_event(&self, event: &Event) -> Result<(), StoreError>;

    /// Insert or replace `vote` in the event's participants.
    ///
    /// Returns `Ok(None)` without creating anything when the event does not
    /// exist. Otherwise applies [`Event::upsert_vote`], persists the whole
    /// event, and returns it.
    async fn add_vote(&self, event_id: &EventId, vote: Vote) -> Result<Option<Event>, StoreError>;
}
