//! `lt show`: display one ticket.

use crate::output::{OutputMode, render_item};
use crate::project::Project;
use clap::Args;
use locate_core::StoreError;
use locate_core::lock::LockKind;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket to display.
    pub id: String,
}

/// Execute `lt show <id>`.
pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::open(project_root)?;
    let open = project.load(LockKind::Shared)?;

    let record = open.store.get(&args.id).ok_or_else(|| StoreError::NotFound {
        id: args.id.trim().to_string(),
    })?;

    let stdout = std::io::stdout();
    render_item(&mut stdout.lock(), record, output)?;
    Ok(())
}
