//! Ticket field flags shared by `lt create` and `lt update`.

use clap::Args;
use locate_core::{Draft, Priority, Status};

/// Every editable field except the id. Unset flags leave the draft alone.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Intersection, block, or address of the work site.
    #[arg(short, long)]
    pub location: Option<String>,

    /// What needs to be located and why.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Workflow status: open, in-review, field-check, resolved.
    #[arg(short, long)]
    pub status: Option<Status>,

    /// Priority: low, standard, urgent.
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Crew member responsible for the locate.
    #[arg(long)]
    pub owner: Option<String>,

    /// Who asked for the locate.
    #[arg(long)]
    pub requested_by: Option<String>,

    /// Free-form due label ("Today", "Nov 18"). Blank means TBD.
    #[arg(long)]
    pub due: Option<String>,

    /// Utility type (Water, Gas, Fiber, ...).
    #[arg(short, long = "utility", visible_alias = "type")]
    pub utility: Option<String>,

    /// Field notes. Pass an empty string to clear.
    #[arg(long)]
    pub notes: Option<String>,
}

impl FieldArgs {
    /// Overlay the flags that were given onto `draft`.
    pub fn apply(&self, draft: &mut Draft) {
        fn set(slot: &mut String, value: Option<&String>) {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }

        set(&mut draft.location, self.location.as_ref());
        set(&mut draft.description, self.description.as_ref());
        set(&mut draft.owner, self.owner.as_ref());
        set(&mut draft.requested_by, self.requested_by.as_ref());
        set(&mut draft.due, self.due.as_ref());
        set(&mut draft.utility, self.utility.as_ref());
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        if let Some(notes) = &self.notes {
            draft.notes = Some(notes.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: FieldArgs,
    }

    #[test]
    fn parses_loose_enum_spellings() {
        let w = Wrapper::parse_from(["test", "--status", "field-check", "--priority", "URGENT"]);
        assert_eq!(w.args.status, Some(Status::FieldCheck));
        assert_eq!(w.args.priority, Some(Priority::Urgent));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Wrapper::try_parse_from(["test", "--status", "closed"]).is_err());
    }

    #[test]
    fn type_alias_sets_utility() {
        let w = Wrapper::parse_from(["test", "--type", "Gas"]);
        assert_eq!(w.args.utility.as_deref(), Some("Gas"));
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut draft = Draft {
            id: "FM-1".into(),
            location: "Main St".into(),
            description: "Gas service".into(),
            notes: Some("keep".into()),
            ..Draft::default()
        };
        let args = FieldArgs {
            status: Some(Status::Resolved),
            due: Some("Friday".into()),
            ..FieldArgs::default()
        };
        args.apply(&mut draft);

        assert_eq!(draft.location, "Main St");
        assert_eq!(draft.status, Status::Resolved);
        assert_eq!(draft.due, "Friday");
        assert_eq!(draft.notes.as_deref(), Some("keep"));
    }
}
