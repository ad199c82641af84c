//! The slot grid: the finite set of addressable (day, hour) cells.
//!
//! A grid is never stored. It is regenerated from an event's date range on
//! every read, so the only persisted trace of a cell is its string key
//! (`YYYY-MM-DD-H`, hour unpadded) inside a participant's vote.

use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;

use chrono::NaiveDate;

/// First offered hour of the day.
pub const FIRST_HOUR: u8 = 9;

/// Last offered hour of the day (inclusive).
pub const LAST_HOUR: u8 = 23;

/// Number of offered hours per day.
pub const HOURS_PER_DAY: usize = 15;

/// The fixed offered hour range.
pub const HOURS: RangeInclusive<u8> = FIRST_HOUR..=LAST_HOUR;

/// Longest date range a grid covers, in days.
pub const MAX_RANGE_DAYS: usize = 366;

/// Errors from parsing a slot key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotParseError {
    /// The key has no `-H` suffix.
    #[error("slot key has no hour component: {0}")]
    MissingHour(String),

    /// The date portion is not a valid `YYYY-MM-DD` date.
    #[error("invalid slot date: {0}")]
    InvalidDate(String),

    /// The hour is not an unpadded integer in the offered range.
    #[error("invalid slot hour: {0}")]
    InvalidHour(String),
}

/// One (day, hour) cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    /// Calendar day.
    pub date: NaiveDate,
    /// Hour of day, within [`HOURS`].
    pub hour: u8,
}

impl SlotId {
    /// Create a slot, returning `None` if `hour` is outside [`HOURS`].
    pub fn new(date: NaiveDate, hour: u8) -> Option<Self> {
        HOURS.contains(&hour).then_some(Self { date, hour })
    }

    /// The persisted string key for this slot.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date.format("%Y-%m-%d"), self.hour)
    }
}

impl FromStr for SlotId {
    type Err = SlotParseError;

    /// Parse a canonical key. Zero-padded hours (`-09`) are rejected because
    /// they would never match a key produced by [`SlotId::key`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date_part, hour_part) = s
            .rsplit_once('-')
            .ok_or_else(|| SlotParseError::MissingHour(s.to_owned()))?;

        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| SlotParseError::InvalidDate(format!("{date_part}: {e}")))?;

        let hour: u8 = hour_part
            .parse()
            .map_err(|e| SlotParseError::InvalidHour(format!("{hour_part}: {e}")))?;
        if hour.to_string() != hour_part {
            return Err(SlotParseError::InvalidHour(hour_part.to_owned()));
        }

        Self::new(date, hour).ok_or_else(|| SlotParseError::InvalidHour(hour_part.to_owned()))
    }
}

/// Every day from `start` to `end` inclusive, in chronological order.
///
/// Empty when `start > end`. Stops after [`MAX_RANGE_DAYS`] days, so a
/// stored record with a runaway range still yields a bounded grid.
pub fn days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take(MAX_RANGE_DAYS)
        .take_while(|d| *d <= end)
        .collect()
}

/// Whether `start..=end` fits within [`MAX_RANGE_DAYS`].
pub fn range_within_limit(start: NaiveDate, end: NaiveDate) -> bool {
    let span = end.signed_duration_since(start).num_days();
    usize::try_from(span).is_ok_and(|span| span < MAX_RANGE_DAYS)
}

/// Build the ordered grid for a date range.
///
/// Days ascend; within each day hours ascend through [`HOURS`]. Pure and
/// deterministic: the same inputs always produce the same sequence.
pub fn build_grid(start: NaiveDate, end: NaiveDate) -> Vec<SlotId> {
    days(start, end)
        .into_iter()
        .flat_map(|date| HOURS.map(move |hour| SlotId { date, hour }))
        .collect()
}
