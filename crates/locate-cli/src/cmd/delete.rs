//! `lt delete`: remove a ticket for good.

use crate::output::{OutputMode, render};
use crate::project::Project;
use clap::Args;
use locate_core::lock::LockKind;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Ticket to delete.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    ok: bool,
    id: String,
    remaining: usize,
}

/// Execute `lt delete <id>`. Deleting an absent ticket is an error.
pub fn run_delete(args: &DeleteArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::open(project_root)?;
    let mut open = project.load(LockKind::Exclusive)?;

    let removed = open.store.delete(&args.id)?;
    project.save(&open)?;
    info!(id = %removed.id, "deleted ticket");

    let result = DeleteOutput {
        ok: true,
        id: removed.id,
        remaining: open.store.len(),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, output, &result, |r, w| {
        writeln!(w, "✓ Deleted {}", r.id)?;
        writeln!(w, "  {} tickets remain", r.remaining)
    })
}
