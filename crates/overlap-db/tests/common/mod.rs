//! Backend-agnostic contract checks shared by the file and live-service
//! integration tests. Every [`EventStore`] must pass all of them.

#![allow(dead_code, clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use overlap_db::{EventStore, StoreError};
use overlap_types::{Event, EventId, Vote};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn fresh_event() -> Event {
    Event::new(EventId::generate(), date("2024-01-01"), date("2024-01-02"))
}

pub async fn create_then_get_roundtrips(store: &dyn EventStore) {
    let event = fresh_event();
    store.create_event(&event).await.unwrap();

    let loaded = store.get_event(&event.id).await.unwrap().unwrap();
    assert_eq!(loaded.id, event.id);
    assert_eq!(loaded.start_date, date("2024-01-01"));
    assert_eq!(loaded.end_date, date("2024-01-02"));
    assert!(loaded.participants.is_empty());
}

pub async fn missing_event_is_none(store: &dyn EventStore) {
    let id = EventId::generate();
    assert!(store.get_event(&id).await.unwrap().is_none());
}

pub async fn duplicate_id_is_refused(store: &dyn EventStore) {
    let event = fresh_event();
    store.create_event(&event).await.unwrap();

    let mut clash = event.clone();
    clash.end_date = date("2024-02-01");
    assert!(matches!(
        store.create_event(&clash).await,
        Err(StoreError::DuplicateId(_))
    ));

    let kept = store.get_event(&event.id).await.unwrap().unwrap();
    assert_eq!(kept.end_date, date("2024-01-02"));
}

pub async fn vote_on_unknown_event_creates_nothing(store: &dyn EventStore) {
    let id = EventId::generate();
    let result = store
        .add_vote(&id, Vote::new("Ana", ["2024-01-01-9"]))
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(store.get_event(&id).await.unwrap().is_none());
}

pub async fn repeat_vote_is_idempotent(store: &dyn EventStore) {
    let event = fresh_event();
    store.create_event(&event).await.unwrap();
    let vote = Vote::new("Ana", ["2024-01-01-9", "2024-01-01-10"]);

    store.add_vote(&event.id, vote.clone()).await.unwrap();
    let updated = store.add_vote(&event.id, vote.clone()).await.unwrap().unwrap();

    assert_eq!(updated.participants, vec![vote]);
    let loaded = store.get_event(&event.id).await.unwrap().unwrap();
    assert_eq!(loaded, updated);
}

pub async fn second_vote_replaces_in_place(store: &dyn EventStore) {
    let event = fresh_event();
    store.create_event(&event).await.unwrap();

    store
        .add_vote(&event.id, Vote::new("Ana", ["2024-01-01-9"]))
        .await
        .unwrap();
    store
        .add_vote(&event.id, Vote::new("Ben", ["2024-01-01-9"]))
        .await
        .unwrap();
    let updated = store
        .add_vote(&event.id, Vote::new("Ana", ["2024-01-02-20"]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.participant_count(), 2);
    assert_eq!(updated.participants[0].user, "Ana");
    assert_eq!(
        updated.participants[0].slots.iter().collect::<Vec<_>>(),
        vec!["2024-01-02-20"]
    );
    assert_eq!(updated.participants[1].user, "Ben");
}

pub async fn empty_vote_is_recorded(store: &dyn EventStore) {
    let event = fresh_event();
    store.create_event(&event).await.unwrap();

    let updated = store
        .add_vote(&event.id, Vote::new("Lurker", Vec::<String>::new()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.participant_count(), 1);
    assert!(updated.participants[0].slots.is_empty());
}

/// Run every contract check against one store.
pub async fn run_contract(store: &dyn EventStore) {
    create_then_get_roundtrips(store).await;
    missing_event_is_none(store).await;
    duplicate_id_is_refused(store).await;
    vote_on_unknown_event_creates_nothing(store).await;
    repeat_vote_is_idempotent(store).await;
    second_vote_replaces_in_place(store).await;
    empty_vote_is_recorded(store).await;
}
