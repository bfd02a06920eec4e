//! `lt summary`: dashboard counters and per-status / per-priority breakdown.

use crate::output::{OutputMode, pretty_kv, pretty_section, render};
use crate::project::Project;
use clap::Args;
use locate_core::lock::LockKind;
use locate_core::query::{aggregate, breakdown, filter};
use locate_core::{Counters, Record};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Count only tickets matching this search.
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Bucket {
    pub label: &'static str,
    pub tone: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    #[serde(flatten)]
    pub counters: Counters,
    pub total: usize,
    pub by_status: Vec<Bucket>,
    pub by_priority: Vec<Bucket>,
}

impl SummaryOutput {
    #[must_use]
    pub fn build(records: &[Record]) -> Self {
        let split = breakdown(records);
        Self {
            counters: aggregate(records),
            total: records.len(),
            by_status: split
                .by_status
                .into_iter()
                .map(|(status, count)| Bucket {
                    label: status.as_str(),
                    tone: status.tone().as_str(),
                    count,
                })
                .collect(),
            by_priority: split
                .by_priority
                .into_iter()
                .map(|(priority, count)| Bucket {
                    label: priority.as_str(),
                    tone: priority.tone().as_str(),
                    count,
                })
                .collect(),
        }
    }

    fn write_human(&self, w: &mut dyn Write, mode: OutputMode) -> io::Result<()> {
        if mode == OutputMode::Text {
            return writeln!(
                w,
                "open={} resolved={} urgent={} total={}",
                self.counters.open, self.counters.resolved, self.counters.urgent, self.total
            );
        }

        pretty_section(w, "Locate tickets")?;
        pretty_kv(w, "Open", self.counters.open.to_string())?;
        pretty_kv(w, "Resolved", self.counters.resolved.to_string())?;
        pretty_kv(w, "Urgent", self.counters.urgent.to_string())?;
        writeln!(w)?;
        pretty_section(w, "By status")?;
        for bucket in &self.by_status {
            pretty_kv(w, bucket.label, bucket.count.to_string())?;
        }
        writeln!(w)?;
        pretty_section(w, "By priority")?;
        for bucket in &self.by_priority {
            pretty_kv(w, bucket.label, bucket.count.to_string())?;
        }
        Ok(())
    }
}

/// Execute `lt summary`.
pub fn run_summary(args: &SummaryArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::open(project_root)?;
    let open = project.load(LockKind::Shared)?;

    let view: Vec<Record> = filter(open.store.list(), args.query.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    let summary = SummaryOutput::build(&view);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, output, &summary, |s, w| s.write_human(w, output))
}
