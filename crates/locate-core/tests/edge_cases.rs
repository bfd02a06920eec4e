//! Scenario checks for the record store and query view against the seed data.

use locate_core::query::{aggregate, filter};
use locate_core::{Counters, Draft, EditSession, Priority, RecordStore, Status, StoreError};

fn four_records() -> RecordStore {
    RecordStore::with_seed()
}

#[test]
fn aggregate_one_resolved_one_urgent() {
    let store = four_records();
    assert_eq!(
        aggregate(store.list()),
        Counters {
            open: 3,
            resolved: 1,
            urgent: 1
        }
    );
}

#[test]
fn filter_by_ticket_id_returns_exactly_one() {
    let store = four_records();
    let hits = filter(store.list(), "FM-2317");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "FM-2317");
    assert_eq!(hits[0].priority, Priority::Urgent);
}

#[test]
fn filter_with_no_match_is_empty() {
    let store = four_records();
    assert!(filter(store.list(), "pipeline in alaska").is_empty());
}

#[test]
fn resolving_ticket_moves_counters() {
    let mut store = four_records();
    let mut session = EditSession::new();
    session.begin(&store, "FM-2317").expect("begin");
    session.draft_mut().status = Status::Resolved;
    session.submit(&mut store).expect("submit");

    assert_eq!(
        aggregate(store.list()),
        Counters {
            open: 2,
            resolved: 2,
            urgent: 1
        }
    );
    // Order unchanged by the edit.
    assert_eq!(store.list()[0].id, "FM-2317");
}

#[test]
fn whitespace_only_fields_fail_with_all_missing() {
    let mut store = four_records();
    let draft = Draft {
        id: " ".into(),
        location: "\t".into(),
        description: "\n".into(),
        ..Draft::default()
    };
    let Err(StoreError::Validation(err)) = store.create(&draft) else {
        panic!("expected validation error");
    };
    assert_eq!(err.missing.len(), 3);
    assert_eq!(store.len(), 4);
}

#[test]
fn lookups_trim_the_requested_id() {
    let mut store = four_records();
    assert!(store.get("  FM-2320 ").is_some());
    assert!(store.delete(" FM-2320").is_ok());
    assert!(store.get("FM-2320").is_none());
}
