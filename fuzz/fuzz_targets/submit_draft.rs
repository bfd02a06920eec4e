#![no_main]

use libfuzzer_sys::fuzz_target;
use locate_core::query::{aggregate, filter};
use locate_core::{Draft, RecordStore};

// A draft body either becomes a trimmed record at the head of the list or
// leaves the store exactly as it was.
fuzz_target!(|data: &[u8]| {
    let Ok(draft) = serde_json::from_slice::<Draft>(data) else {
        return;
    };

    let mut store = RecordStore::with_seed();
    let before = store.list().to_vec();

    match store.create(&draft) {
        Ok(record) => {
            assert_eq!(store.list()[0], record);
            assert_eq!(&store.list()[1..], before.as_slice());
            assert_eq!(record.id, record.id.trim());
            assert!(!record.due.trim().is_empty());
            let hits = filter(store.list(), &record.id);
            assert!(hits.iter().any(|r| r.id == record.id));
        }
        Err(_) => assert_eq!(store.list(), before.as_slice()),
    }

    let counters = aggregate(store.list());
    assert_eq!(counters.open + counters.resolved, store.len());
});
