//! `lt list`: the filtered ticket list.
//!
//! The free-text query matches id, location, description and utility type,
//! case-insensitively. `--status` and `--priority` narrow the result further.

use crate::output::{OutputMode, render_list};
use crate::project::Project;
use clap::Args;
use locate_core::lock::LockKind;
use locate_core::query::filter;
use locate_core::{Priority, Record, Status};
use std::io::Write;
use std::path::Path;

pub const NO_MATCHES: &str = "No tickets match that search.";
const NO_MATCHES_HINT: &str = "Try another ID, location, or utility type.";

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Search text, e.g. a ticket number or street name.
    pub query: Option<String>,

    /// Only tickets in this status.
    #[arg(long)]
    pub status: Option<Status>,

    /// Only tickets at this priority.
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Show at most this many tickets.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Apply query, facets, and limit in display order.
    #[must_use]
    pub fn select<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut hits = filter(records, self.query.as_deref().unwrap_or(""));
        hits.retain(|r| self.status.is_none_or(|s| r.status == s));
        hits.retain(|r| self.priority.is_none_or(|p| r.priority == p));
        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }
        hits
    }
}

/// Execute `lt list [query]`.
pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::open(project_root)?;
    let open = project.load(LockKind::Shared)?;

    let hits: Vec<Record> = args.select(open.store.list()).into_iter().cloned().collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if hits.is_empty() && !output.is_json() {
        writeln!(out, "{NO_MATCHES}")?;
        if output == OutputMode::Pretty {
            writeln!(out, "{NO_MATCHES_HINT}")?;
        }
        return Ok(());
    }
    render_list(&mut out, &hits, output)?;
    Ok(())
}
