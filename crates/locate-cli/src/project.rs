//! Load-mutate-save plumbing shared by every command that touches `.locate/`.

use anyhow::{Context as _, Result};
use locate_core::RecordStore;
use locate_core::config::{self, ProjectConfig};
use locate_core::lock::{LockKind, StoreLock};
use locate_core::persist::{self, JsonFileBackend, RecordBackend};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Raised when a command needs `.locate/` and it is missing.
#[derive(Debug, Error)]
#[error("no locate tracker found in {}", root.display())]
pub struct NotInitialized {
    pub root: PathBuf,
}

/// A project directory with its config and file backend resolved.
#[derive(Debug)]
pub struct Project {
    pub config: ProjectConfig,
    backend: JsonFileBackend,
}

/// A store loaded under the project lock. Dropping it releases the lock.
#[derive(Debug)]
pub struct OpenStore {
    pub store: RecordStore,
    _lock: StoreLock,
}

impl Project {
    /// Resolve config and backend for `root` without touching the record file.
    pub fn at(root: &Path) -> Result<Self> {
        let config = config::load_project_config(root)?;
        Ok(Self {
            config,
            backend: JsonFileBackend::for_project(root),
        })
    }

    /// Like [`Project::at`], but fails with [`NotInitialized`] when
    /// `.locate/` has not been created yet.
    pub fn open(root: &Path) -> Result<Self> {
        let project = Self::at(root)?;
        if !project.backend.is_initialized() {
            return Err(NotInitialized {
                root: root.to_path_buf(),
            }
            .into());
        }
        Ok(project)
    }

    pub const fn backend(&self) -> &JsonFileBackend {
        &self.backend
    }

    /// Lock and load the collection. A tracker with no record file yet
    /// loads as an empty store.
    pub fn load(&self, kind: LockKind) -> Result<OpenStore> {
        let lock = self.backend.lock(kind)?;
        let path = self.backend.records_path();
        let store = persist::load_store(&self.backend, &path)?
            .unwrap_or_default()
            .with_policy(self.config.store_policy());
        debug!(records = store.len(), path = %path.display(), "loaded record store");
        Ok(OpenStore { store, _lock: lock })
    }

    /// Write the collection back while the caller still holds the lock.
    pub fn save(&self, open: &OpenStore) -> Result<()> {
        self.backend
            .save(open.store.list())
            .with_context(|| format!("Failed to save {}", self.backend.records_path().display()))
    }
}
