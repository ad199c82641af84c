//! Availability aggregation: per-slot counts and the render-ready heatmap.
//!
//! Nothing here can fail. Input is an already-decoded participant list;
//! slot keys that do not belong to the event's grid are still counted but
//! the heatmap only ever looks up the grid's own keys, so they simply never
//! render.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use overlap_types::{Event, EventId, Vote};
use serde::Serialize;
use ts_rs::TS;

use crate::grid::{self, HOURS};

/// Lowest fill fraction for a slot with at least one vote, so a single
/// vote never renders like zero.
pub const MIN_INTENSITY: f64 = 0.1;

/// Count how many participants marked each slot key.
///
/// The mapping is not filtered against any grid. Absent keys mean zero.
pub fn count_by_slot(participants: &[Vote]) -> BTreeMap<String, u32> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for vote in participants {
        for slot in &vote.slots {
            let count = counts.entry(slot.clone()).or_insert(0);
            *count = count.saturating_add(1);
        }
    }
    counts
}

/// Slots previously submitted by `user`, or an empty set if they have not
/// voted. Exact, case-sensitive match.
pub fn my_vote(participants: &[Vote], user: &str) -> BTreeSet<String> {
    participants
        .iter()
        .find(|p| p.user == user)
        .map(|p| p.slots.clone())
        .unwrap_or_default()
}

/// Normalized fill fraction for `count` votes out of `max_participants`.
///
/// Zero stays zero; any nonzero count is at least [`MIN_INTENSITY`]; the
/// result never exceeds `1.0`. A `max_participants` of zero is treated as
/// one.
pub fn intensity(count: u32, max_participants: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let denominator = max_participants.max(1);
    (f64::from(count) / f64::from(denominator)).clamp(MIN_INTENSITY, 1.0)
}

/// One rendered cell of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HeatmapCell {
    /// Slot key (`YYYY-MM-DD-H`).
    pub slot: String,
    /// Day of the cell.
    pub date: NaiveDate,
    /// Hour of the cell.
    pub hour: u8,
    /// Participants free in this slot.
    pub count: u32,
    /// Fill fraction in `[0, 1]`.
    pub intensity: f64,
}

/// The group view for one event.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Heatmap {
    /// Event this heatmap was computed for.
    pub event_id: EventId,
    /// Grid columns, in order.
    pub days: Vec<NaiveDate>,
    /// Grid rows, in order.
    pub hours: Vec<u8>,
    /// Number of participants (the intensity denominator).
    pub max_participants: u32,
    /// One cell per grid slot, day-major.
    pub cells: Vec<HeatmapCell>,
    /// Grid slots sharing the highest nonzero count, in grid order.
    pub best: Vec<String>,
}

impl Heatmap {
    /// Compute the heatmap for an event.
    ///
    /// Ranges longer than [`grid::MAX_RANGE_DAYS`] are cut off at that many
    /// days.
    pub fn build(event: &Event) -> Self {
        let counts = count_by_slot(&event.participants);
        let max_participants = u32::try_from(event.participant_count()).unwrap_or(u32::MAX);

        let cells: Vec<HeatmapCell> = grid::build_grid(event.start_date, event.end_date)
            .into_iter()
            .map(|slot| {
                let key = slot.key();
                let count = counts.get(&key).copied().unwrap_or(0);
                HeatmapCell {
                    slot: key,
                    date: slot.date,
                    hour: slot.hour,
                    count,
                    intensity: intensity(count, max_participants),
                }
            })
            .collect();

        let top = cells.iter().map(|c| c.count).max().unwrap_or(0);
        let best = if top == 0 {
            Vec::new()
        } else {
            cells
                .iter()
                .filter(|c| c.count == top)
                .map(|c| c.slot.clone())
                .collect()
        };

        Self {
            event_id: event.id.clone(),
            days: grid::days(event.start_date, event.end_date),
            hours: HOURS.collect(),
            max_participants,
            cells,
            best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn two_voters() -> Vec<Vote> {
        vec![
            Vote::new("A", ["2024-01-01-9"]),
            Vote::new("B", ["2024-01-01-9", "2024-01-01-10"]),
        ]
    }

    fn count(heatmap: &Heatmap, slot: &str) -> u32 {
        heatmap
            .cells
            .iter()
            .find(|c| c.slot == slot)
            .map_or(0, |c| c.count)
    }

    fn make_event(participants: Vec<Vote>) -> Event {
        let mut event = Event::new(
            EventId::parse("heat").unwrap(),
            date("2024-01-01"),
            date("2024-01-02"),
        );
        event.participants = participants;
        event
    }

    #[test]
    fn counts_every_slot_of_every_vote() {
        let counts = count_by_slot(&two_voters());
        let expected = BTreeMap::from([
            ("2024-01-01-9".to_owned(), 2),
            ("2024-01-01-10".to_owned(), 1),
        ]);
        assert_eq!(counts, expected);
    }

    #[test]
    fn counts_keep_out_of_grid_keys() {
        let votes = vec![Vote::new("A", ["1999-12-31-9", "bogus"])];
        let counts = count_by_slot(&votes);
        assert_eq!(counts.get("1999-12-31-9"), Some(&1));
        assert_eq!(counts.get("bogus"), Some(&1));
    }

    #[test]
    fn counts_of_empty_participants_are_empty() {
        assert!(count_by_slot(&[]).is_empty());
    }

    #[test]
    fn my_vote_returns_exact_match() {
        let votes = two_voters();
        assert_eq!(my_vote(&votes, "A"), BTreeSet::from(["2024-01-01-9".to_owned()]));
        assert!(my_vote(&votes, "a").is_empty());
        assert!(my_vote(&votes, "Nobody").is_empty());
    }

    #[test]
    fn intensity_scales_and_clamps() {
        assert!(intensity(0, 5).abs() < f64::EPSILON);
        assert!((intensity(5, 5) - 1.0).abs() < f64::EPSILON);
        assert!((intensity(1, 2) - 0.5).abs() < f64::EPSILON);
        assert!((intensity(1, 50) - MIN_INTENSITY).abs() < f64::EPSILON);
        // Never divides by zero.
        assert!((intensity(1, 0) - 1.0).abs() < f64::EPSILON);
        // Stale data can count more voters than participants.
        assert!((intensity(3, 2) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn heatmap_covers_the_whole_grid() {
        let heatmap = Heatmap::build(&make_event(two_voters()));
        assert_eq!(heatmap.days, vec![date("2024-01-01"), date("2024-01-02")]);
        assert_eq!(heatmap.hours.len(), 15);
        assert_eq!(heatmap.cells.len(), 30);
        assert_eq!(heatmap.max_participants, 2);
        assert_eq!(count(&heatmap, "2024-01-01-9"), 2);
        assert_eq!(count(&heatmap, "2024-01-01-10"), 1);
        assert_eq!(count(&heatmap, "2024-01-02-12"), 0);
    }

    #[test]
    fn heatmap_ignores_out_of_grid_keys() {
        let votes = vec![Vote::new("A", ["2030-06-01-9", "2024-01-02-23"])];
        let heatmap = Heatmap::build(&make_event(votes));
        assert_eq!(count(&heatmap, "2030-06-01-9"), 0);
        assert_eq!(heatmap.cells.iter().map(|c| c.count).sum::<u32>(), 1);
    }

    #[test]
    fn heatmap_best_slots() {
        let heatmap = Heatmap::build(&make_event(two_voters()));
        assert_eq!(heatmap.best, vec!["2024-01-01-9".to_owned()]);

        let empty = Heatmap::build(&make_event(Vec::new()));
        assert!(empty.best.is_empty());
        assert_eq!(empty.max_participants, 0);
        assert!(empty.cells.iter().all(|c| c.intensity.abs() < f64::EPSILON));
    }

    #[test]
    fn heatmap_serializes_camel_case() {
        let heatmap = Heatmap::build(&make_event(two_voters()));
        let json = serde_json::to_value(&heatmap).unwrap();
        assert_eq!(json["eventId"], "heat");
        assert_eq!(json["maxParticipants"], 2);
        assert_eq!(json["cells"][0]["slot"], "2024-01-01-9");
        assert_eq!(json["cells"][0]["count"], 2);
    }

    #[test]
    fn heatmap_of_runaway_range_is_bounded() {
        let mut event = make_event(vec![Vote::new("A", ["1900-01-01-9"])]);
        event.start_date = date("1900-01-01");
        event.end_date = date("2100-12-31");

        let heatmap = Heatmap::build(&event);
        assert_eq!(heatmap.days.len(), grid::MAX_RANGE_DAYS);
        assert_eq!(heatmap.cells.len(), grid::MAX_RANGE_DAYS * grid::HOURS_PER_DAY);
        assert_eq!(heatmap.best, vec!["1900-01-01-9".to_owned()]);
    }

    #[test]
    fn legacy_timestamps_from_east_of_utc_keep_the_last_day() {
        // Picked 03-05..03-07 at local midnight in UTC+8.
        let json = r#"{
            "id": "k3x9ab",
            "startDate": "2024-03-04T16:00:00.000Z",
            "endDate": "2024-03-06T16:00:00.000Z",
            "participants": [{"user": "Ana", "slots": ["2024-03-07-9"]}]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let heatmap = Heatmap::build(&event);

        assert_eq!(heatmap.days.first(), Some(&date("2024-03-05")));
        assert_eq!(heatmap.days.last(), Some(&date("2024-03-07")));
        assert_eq!(count(&heatmap, "2024-03-07-9"), 1);
    }
}
