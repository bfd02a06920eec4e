//! Demo tickets for a freshly initialized tracker (downtown Fort Myers).

use crate::model::record::{Priority, Record, Status};

#[allow(clippy::too_many_arguments)]
fn ticket(
    id: &str,
    location: &str,
    description: &str,
    status: Status,
    priority: Priority,
    owner: &str,
    requested_by: &str,
    due: &str,
    utility: &str,
    notes: &str,
) -> Record {
    Record {
        id: id.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        status,
        priority,
        owner: owner.to_string(),
        requested_by: requested_by.to_string(),
        due: due.to_string(),
        utility: utility.to_string(),
        notes: Some(notes.to_string()),
    }
}

/// The four starter tickets, most recent first.
#[must_use]
pub fn seed_records() -> Vec<Record> {
    vec![
        ticket(
            "FM-2317",
            "First St & Fowler St",
            "Locate storm trunk to support canal bypass tie-in.",
            Status::Open,
            Priority::Urgent,
            "K. Ramirez",
            "City PM",
            "Today",
            "Stormwater",
            "Need depth at existing concrete collar and invert at upstream MH.",
        ),
        ticket(
            "FM-2318",
            "Marion St between Hendry & Jackson",
            "Verify fiber bundle clearance near new signal cabinet pad.",
            Status::InReview,
            Priority::Standard,
            "J. Patel",
            "Design Team",
            "Tomorrow",
            "Communications",
            "Ticket shared with BrightFiber; need splice diagram upload.",
        ),
        ticket(
            "FM-2320",
            "Cleveland Ave at Winkler Ave",
            "Confirm water service at proposed median opening.",
            Status::FieldCheck,
            Priority::Standard,
            "L. Howard",
            "City Inspector",
            "Nov 18",
            "Water",
            "Coordinate night work window; FDOT lane closure plan pending.",
        ),
        ticket(
            "FM-2324",
            "Ortiz Ave north of Ballard Rd",
            "Locate overhead power for crane swing clearance study.",
            Status::Resolved,
            Priority::Low,
            "M. Lee",
            "Contractor",
            "Closed",
            "Power",
            "Photos uploaded; clearance note added to MOT sheet.",
        ),
    ]
}
