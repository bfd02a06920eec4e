//! `lt update`: edit an existing ticket in place.
//!
//! The ticket keeps its id and its position in the list. Only the flags
//! given on the command line change; everything else is carried over.

use crate::cmd::fields::FieldArgs;
use crate::output::{OutputMode, render_item};
use crate::project::Project;
use clap::Args;
use locate_core::EditSession;
use locate_core::lock::LockKind;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Ticket to edit.
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Execute `lt update <id>`.
pub fn run_update(args: &UpdateArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::open(project_root)?;
    let mut open = project.load(LockKind::Exclusive)?;

    let mut session = EditSession::new();
    session.begin(&open.store, &args.id)?;
    args.fields.apply(session.draft_mut());
    let record = session.submit(&mut open.store)?;
    project.save(&open)?;
    info!(id = %record.id, status = %record.status, "updated ticket");

    let stdout = std::io::stdout();
    render_item(&mut stdout.lock(), &record, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use locate_core::Status;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: UpdateArgs,
    }

    #[test]
    fn update_args_parse_positional_id() {
        let w = Wrapper::parse_from(["test", "FM-2320", "--status", "resolved"]);
        assert_eq!(w.args.id, "FM-2320");
        assert_eq!(w.args.fields.status, Some(Status::Resolved));
        assert!(w.args.fields.location.is_none());
    }

    #[test]
    fn update_args_require_id() {
        assert!(Wrapper::try_parse_from(["test", "--status", "open"]).is_err());
    }
}
