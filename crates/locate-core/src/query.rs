//! Projections and dashboard counters derived from the record collection.
//!
//! Everything here is a pure function of the slice it is given. Nothing is
//! cached; callers recompute after each mutation.

use crate::model::record::{Priority, Record, Status};
use serde::Serialize;

/// Headline counters for the dashboard hero panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Tickets not yet resolved.
    pub open: usize,
    pub resolved: usize,
    /// Tickets at the top priority tier.
    pub urgent: usize,
}

/// Per-status and per-priority counts, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub by_status: Vec<(Status, usize)>,
    pub by_priority: Vec<(Priority, usize)>,
}

/// Case-insensitive single-term match against id, location, description and
/// utility type. `needle` must already be trimmed and lowercased.
#[must_use]
pub fn matches(record: &Record, needle: &str) -> bool {
    [
        record.id.as_str(),
        record.location.as_str(),
        record.description.as_str(),
        record.utility.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Records matching `query`, in their original order.
///
/// A blank query returns every record.
#[must_use]
pub fn filter<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

#[must_use]
pub fn aggregate<'a, I>(records: I) -> Counters
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .fold(Counters::default(), |mut counters, record| {
            if record.status.is_terminal() {
                counters.resolved += 1;
            } else {
                counters.open += 1;
            }
            if record.priority.is_top_tier() {
                counters.urgent += 1;
            }
            counters
        })
}

#[must_use]
pub fn breakdown(records: &[Record]) -> Breakdown {
    let by_status = Status::ALL
        .iter()
        .map(|status| {
            let count = records.iter().filter(|r| r.status == *status).count();
            (*status, count)
        })
        .collect();
    let by_priority = Priority::ALL
        .iter()
        .map(|priority| {
            let count = records.iter().filter(|r| r.priority == *priority).count();
            (*priority, count)
        })
        .collect();

    Breakdown {
        by_status,
        by_priority,
    }
}

#[cfg(test)]
mod tests {
    use super::{Counters, aggregate, breakdown, filter};
    use crate::model::record::{Priority, Status};
    use crate::seed::seed_records;

    #[test]
    fn blank_query_is_identity_projection() {
        let records = seed_records();
        let all = filter(&records, "   ");
        assert_eq!(all.len(), records.len());
        assert!(all.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn query_by_id_finds_single_ticket() {
        let records = seed_records();
        let hits = filter(&records, "FM-2317");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "FM-2317");
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let records = seed_records();

        // "Stormwater" matches too.
        let by_utility: Vec<&str> =
            filter(&records, "  WATER ").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(by_utility, ["FM-2317", "FM-2320"]);

        let by_location: Vec<&str> =
            filter(&records, "marion").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(by_location, ["FM-2318"]);

        let by_description: Vec<&str> =
            filter(&records, "locate").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(by_description, ["FM-2317", "FM-2324"]);
    }

    #[test]
    fn query_ignores_owner_and_notes() {
        let records = seed_records();
        assert!(filter(&records, "Ramirez").is_empty());
        assert!(filter(&records, "BrightFiber").is_empty());
    }

    #[test]
    fn aggregate_counts_seed() {
        let records = seed_records();
        assert_eq!(
            aggregate(&records),
            Counters {
                open: 3,
                resolved: 1,
                urgent: 1
            }
        );
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn aggregate_accepts_projection() {
        let records = seed_records();
        let counters = aggregate(filter(&records, "FM-2324"));
        assert_eq!(
            counters,
            Counters {
                open: 0,
                resolved: 1,
                urgent: 0
            }
        );
        assert_eq!(aggregate(std::iter::empty()), Counters::default());
    }

    #[test]
    fn breakdown_covers_every_variant() {
        let records = seed_records();
        let b = breakdown(&records);
        assert_eq!(
            b.by_status,
            vec![
                (Status::Open, 1),
                (Status::InReview, 1),
                (Status::FieldCheck, 1),
                (Status::Resolved, 1)
            ]
        );
        assert_eq!(
            b.by_priority,
            vec![
                (Priority::Low, 1),
                (Priority::Standard, 2),
                (Priority::Urgent, 1)
            ]
        );
    }
}
