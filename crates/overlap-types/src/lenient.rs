//! Tolerant deserializers for persisted event records.
//!
//! Records may have been written by older clients: dates as full ISO-8601
//! timestamps, `participants` missing or `null`, `slots` that are not an
//! array. None of that is worth failing a read over, so these helpers
//! coerce absent or misshapen collections to empty ones.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::structs::Vote;

/// Parse a calendar date from `YYYY-MM-DD` or an ISO-8601 timestamp.
///
/// Browsers send a picked day as local midnight converted to UTC, so a
/// timestamp carrying an offset is rounded to the nearest midnight in that
/// offset: `2024-03-04T16:00:00Z` (midnight in UTC+8) yields `2024-03-05`,
/// `2024-03-05T05:00:00Z` (midnight in UTC-5) yields `2024-03-05`. This is
/// exact for organizers between UTC-11 and UTC+12. A timestamp without an
/// offset is already local and keeps its date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt
            .checked_add_signed(TimeDelta::hours(12))
            .map(|rounded| rounded.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Deserialize a date field via [`parse_date`].
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

/// Deserialize `participants`, treating anything but an array as empty.
///
/// Entries that do not decode as a [`Vote`] are dropped. Repeated `user`
/// entries collapse into one, at the first entry's position with the last
/// entry's slots.
pub fn votes<'de, D>(deserializer: D) -> Result<Vec<Vote>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    let mut votes: Vec<Vote> = Vec::with_capacity(items.len());
    for vote in items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Vote>(item).ok())
    {
        match votes.iter_mut().find(|v| v.user == vote.user) {
            Some(existing) => existing.slots = vote.slots,
            None => votes.push(vote),
        }
    }
    Ok(votes)
}

/// Deserialize `slots`, treating anything but an array as empty.
///
/// Non-string entries are skipped.
pub fn slots<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(BTreeSet::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}
