//! `lt serve`: run the HTTP API.

use crate::http::{self, AppState};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use locate_core::RecordStore;
use locate_core::lock::LockKind;
use locate_core::persist::{MemoryBackend, RecordBackend};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on. Defaults to `server.bind` in .locate/config.toml.
    #[arg(long)]
    pub bind: Option<String>,

    /// Serve the demo tickets from memory; nothing is written to disk.
    #[arg(long)]
    pub ephemeral: bool,
}

/// Execute `lt serve`. Blocks until Ctrl-C.
pub fn run_serve(args: &ServeArgs, project_root: &Path) -> Result<()> {
    let (project, store, backend) = if args.ephemeral {
        let project = Project::at(project_root)?;
        let backend: Arc<dyn RecordBackend + Send + Sync> = Arc::new(MemoryBackend::new());
        (project, RecordStore::with_seed(), backend)
    } else {
        let project = Project::open(project_root)?;
        let store = project.load(LockKind::Shared)?.store;
        let backend: Arc<dyn RecordBackend + Send + Sync> = Arc::new(project.backend().clone());
        (project, store, backend)
    };

    let store = store.with_policy(project.config.store_policy());
    let bind = args
        .bind
        .clone()
        .unwrap_or_else(|| project.config.server.bind.clone());
    info!(records = store.len(), ephemeral = args.ephemeral, "starting server");

    let state = Arc::new(AppState::new(store, backend));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(http::serve(&bind, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn serve_defaults_to_config_bind() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.bind.is_none());
        assert!(!w.args.ephemeral);
    }

    #[test]
    fn serve_bind_and_ephemeral() {
        let w = Wrapper::parse_from(["test", "--bind", "0.0.0.0:9000", "--ephemeral"]);
        assert_eq!(w.args.bind.as_deref(), Some("0.0.0.0:9000"));
        assert!(w.args.ephemeral);
    }
}
