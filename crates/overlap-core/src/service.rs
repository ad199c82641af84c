//! The scheduling service.
//!
//! [`Scheduler`] is the only thing the HTTP layer talks to. It is written
//! once against [`SharedStore`] and never learns which backend is active.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use overlap_db::{SharedStore, StoreError};
use overlap_grid::{Heatmap, MAX_RANGE_DAYS};
use overlap_types::{Event, EventId, Vote};

use crate::error::ServiceError;

/// Longest accepted participant name, in characters.
pub const MAX_USER_LEN: usize = 64;

/// How many fresh ids to try before giving up on event creation.
pub const MAX_ID_ATTEMPTS: u32 = 5;

/// Creates events, records votes, and serves aggregated views.
#[derive(Clone)]
pub struct Scheduler {
    store: SharedStore,
}

impl Scheduler {
    /// Wrap a connected store.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Label of the active backend.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Create an event spanning `start..=end` and return its new id.
    ///
    /// Both dates are required, `start` must not be after `end`, and the
    /// range may cover at most [`MAX_RANGE_DAYS`] days.
    pub async fn create_event(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<EventId, ServiceError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(ServiceError::validation("Missing dates"));
        };
        if start > end {
            return Err(ServiceError::validation(
                "Start date must not be after end date",
            ));
        }
        if !overlap_grid::range_within_limit(start, end) {
            return Err(ServiceError::validation(format!(
                "Date range must not exceed {MAX_RANGE_DAYS} days"
            )));
        }

        let mut collided = String::new();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let event = Event::new(EventId::generate(), start, end);
            match self.store.create_event(&event).await {
                Ok(()) => {
                    tracing::info!(
                        event_id = %event.id,
                        start = %start,
                        end = %end,
                        "Event created"
                    );
                    return Ok(event.id);
                }
                Err(StoreError::DuplicateId(id)) => {
                    tracing::warn!(event_id = %id, attempt, "Generated id collided, retrying");
                    collided = id;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::DuplicateId(collided).into())
    }

    /// Fetch an event by its caller-supplied id.
    pub async fn get_event(&self, id: &str) -> Result<Event, ServiceError> {
        let event_id = parse_id(id)?;
        self.store
            .get_event(&event_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_owned()))
    }

    /// Record `user`'s availability, replacing any earlier vote by the same
    /// name. Returns the updated event.
    pub async fn submit_vote<I>(&self, id: &str, user: &str, slots: I) -> Result<Event, ServiceError>
    where
        I: IntoIterator<Item = String>,
    {
        validate_user(user)?;
        let event_id = parse_id(id)?;
        let vote = Vote::new(user, slots);
        let slot_count = vote.slots.len();

        let event = self
            .store
            .add_vote(&event_id, vote)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_owned()))?;

        tracing::info!(
            event_id = %event_id,
            slots = slot_count,
            participants = event.participant_count(),
            "Vote recorded"
        );
        Ok(event)
    }

    /// Server-side aggregation of every vote on the event.
    pub async fn heatmap(&self, id: &str) -> Result<Heatmap, ServiceError> {
        let event = self.get_event(id).await?;
        Ok(Heatmap::build(&event))
    }

    /// The slots `user` has selected, empty if they have not voted.
    pub async fn my_vote(&self, id: &str, user: &str) -> Result<BTreeSet<String>, ServiceError> {
        let event = self.get_event(id).await?;
        Ok(overlap_grid::my_vote(&event.participants, user))
    }
}

/// Ids that could never have been generated are reported as not found.
fn parse_id(raw: &str) -> Result<EventId, ServiceError> {
    EventId::parse(raw).ok_or_else(|| ServiceError::NotFound(raw.to_owned()))
}

fn validate_user(user: &str) -> Result<(), ServiceError> {
    if user.trim().is_empty() {
        return Err(ServiceError::validation("User name required"));
    }
    if user.chars().count() > MAX_USER_LEN {
        return Err(ServiceError::validation(format!(
            "User name must be at most {MAX_USER_LEN} characters"
        )));
    }
    Ok(())
}
