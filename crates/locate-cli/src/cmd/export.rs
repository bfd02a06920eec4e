//! `lt export`: write tickets as CSV.

use crate::output::{OutputMode, render_success};
use crate::project::Project;
use anyhow::{Context as _, Result};
use clap::Args;
use locate_core::Record;
use locate_core::lock::LockKind;
use locate_core::query::filter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADERS: [&str; 10] = [
    "id",
    "location",
    "description",
    "status",
    "priority",
    "owner",
    "requestedBy",
    "due",
    "utility",
    "notes",
];

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export only tickets matching this search.
    #[arg(long)]
    pub query: Option<String>,
}

/// Write `records` as CSV, one row per ticket, in display order.
pub fn write_csv<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    let mut rows = 0;
    for r in records {
        csv.write_record([
            r.id.as_str(),
            r.location.as_str(),
            r.description.as_str(),
            r.status.as_str(),
            r.priority.as_str(),
            r.owner.as_str(),
            r.requested_by.as_str(),
            r.due.as_str(),
            r.utility.as_str(),
            r.notes.as_deref().unwrap_or(""),
        ])?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

/// Execute `lt export`.
pub fn run_export(args: &ExportArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let project = Project::open(project_root)?;
    let open = project.load(LockKind::Shared)?;
    let hits = filter(open.store.list(), args.query.as_deref().unwrap_or(""));

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let rows = write_csv(file, hits)?;
            info!(rows, path = %path.display(), "exported tickets");
            let stdout = std::io::stdout();
            render_success(
                &mut stdout.lock(),
                output,
                &format!("Exported {rows} tickets to {}", path.display()),
            )
        }
        None => {
            write_csv(std::io::stdout().lock(), hits)?;
            Ok(())
        }
    }
}
