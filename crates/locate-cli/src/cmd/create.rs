//! `lt create`: add a ticket to the top of the list.

use crate::cmd::fields::FieldArgs;
use crate::output::{OutputMode, render_item};
use crate::project::Project;
use clap::Args;
use locate_core::lock::LockKind;
use locate_core::{Draft, EditSession};
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Ticket number, e.g. FM-2331.
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

impl CreateArgs {
    fn to_draft(&self) -> Draft {
        let mut draft = Draft {
            id: self.id.clone().unwrap_or_default(),
            ..Draft::default()
        };
        self.fields.apply(&mut draft);
        draft
    }
}

/// Execute `lt create`.
///
/// Missing required fields are reported together and nothing is written.
pub fn run_create(args: &CreateArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::open(project_root)?;
    let mut open = project.load(LockKind::Exclusive)?;

    let mut session = EditSession::new();
    session.set_draft(args.to_draft());
    let record = session.submit(&mut open.store)?;
    project.save(&open)?;
    info!(id = %record.id, "created ticket");

    let stdout = std::io::stdout();
    render_item(&mut stdout.lock(), &record, output)?;
    Ok(())
}
