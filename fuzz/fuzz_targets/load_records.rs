#![no_main]

use libfuzzer_sys::fuzz_target;
use locate_core::query::filter;
use locate_core::{Record, RecordStore};

fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Vec<Record>>(data) else {
        return;
    };

    let Ok(store) = RecordStore::from_records(records.clone()) else {
        return;
    };
    assert_eq!(store.len(), records.len());
    assert_eq!(filter(store.list(), "  ").len(), records.len());

    for stored in store.list() {
        assert!(!stored.id.is_empty());
        assert_eq!(stored.id, stored.id.trim());
    }
    for record in &records {
        let found = store.get(&record.id).map(|r| r.id.as_str());
        assert_eq!(found, Some(record.id.trim()));
    }
});
