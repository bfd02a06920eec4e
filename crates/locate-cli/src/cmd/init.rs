use crate::output::{OutputMode, render, render_success};
use crate::project::Project;
use anyhow::{Context as _, Result};
use clap::Args;
use locate_core::config;
use locate_core::lock::LockKind;
use locate_core::persist::RecordBackend;
use locate_core::seed::seed_records;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Start with no tickets instead of the demo set.
    #[arg(long)]
    pub empty: bool,

    /// Overwrite an existing record file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct InitOutput {
    path: String,
    records: usize,
    config_written: bool,
}

/// Execute `lt init`. Creates the tracker skeleton:
///
/// ```text
/// .locate/
///   config.toml    (default project config)
///   records.json   (seed tickets unless --empty)
///   lock
/// ```
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let probe = Project::at(project_root)?;
    let records_path = probe.backend().records_path();
    if records_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use `lt init --force` to start over.",
            records_path.display()
        );
    }

    let config_written = config::write_default_project_config(project_root)?;
    // Re-read so a pre-existing config.toml decides whether to seed.
    let project = Project::at(project_root)?;
    let _lock = project.backend().lock(LockKind::Exclusive)?;

    let records = if args.empty || !project.config.store.seed_on_init {
        Vec::new()
    } else {
        seed_records()
    };
    project
        .backend()
        .save(&records)
        .with_context(|| format!("Failed to write {}", records_path.display()))?;
    info!(records = records.len(), "initialized tracker");

    let result = InitOutput {
        path: project.backend().dir().display().to_string(),
        records: records.len(),
        config_written,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match output {
        OutputMode::Json => render(&mut out, output, &result, |_, _| Ok(())),
        OutputMode::Pretty | OutputMode::Text => {
            render_success(
                &mut out,
                output,
                &format!("Initialized locate tracker in {}", result.path),
            )?;
            writeln!(out, "  {} tickets loaded", result.records)?;
            Ok(())
        }
    }
}
