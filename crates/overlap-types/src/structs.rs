//! Event and vote records.
//!
//! These are the persisted shapes shared by every store backend and the
//! HTTP API. Field names serialize in camelCase so records written by older
//! clients (`startDate`, `endDate`, `participants`) load unchanged.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::EventId;
use crate::lenient;

// ---------------------------------------------------------------------------
// Vote
// ---------------------------------------------------------------------------

/// One participant's self-reported availability within an event.
///
/// `user` is the participant's natural key inside the event: exact,
/// case-sensitive, unverified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vote {
    /// Display name chosen by the participant.
    pub user: String,
    /// Slot identifiers (`YYYY-MM-DD-H`) the participant marked as free.
    #[serde(default, deserialize_with = "lenient::slots")]
    pub slots: BTreeSet<String>,
}

impl Vote {
    /// Build a vote from a name and any collection of slot keys.
    pub fn new<S>(user: impl Into<String>, slots: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self {
            user: user.into(),
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A shareable scheduling poll spanning an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Primary key and public reference.
    pub id: EventId,
    /// First offered day (inclusive).
    #[serde(deserialize_with = "lenient::date")]
    pub start_date: NaiveDate,
    /// Last offered day (inclusive).
    #[serde(deserialize_with = "lenient::date")]
    pub end_date: NaiveDate,
    /// Votes in first-vote order, at most one per `user`.
    #[serde(default, deserialize_with = "lenient::votes")]
    pub participants: Vec<Vote>,
}

impl Event {
    /// Create an event with no participants.
    pub const fn new(id: EventId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id,
            start_date,
            end_date,
            participants: Vec::new(),
        }
    }

    /// Insert or replace `vote`, keyed by exact `user` match.
    ///
    /// An existing vote keeps its position in `participants`; a new one is
    /// appended. Returns `true` when an existing vote was replaced.
    pub fn upsert_vote(&mut self, vote: Vote) -> bool {
        if let Some(existing) = self.participants.iter_mut().find(|p| p.user == vote.user) {
            *existing = vote;
            true
        } else {
            self.participants.push(vote);
            false
        }
    }

    /// Number of distinct participants.
    pub const fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
