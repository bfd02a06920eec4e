//! Optional persistence for the record collection.
//!
//! The store never calls into this module. Callers load a collection, hand it
//! to [`RecordStore::from_records`](crate::store::RecordStore::from_records),
//! mutate in memory, and save the result once the mutation succeeded.

use crate::error::{ErrorCode, StoreError};
use crate::lock::{LockError, LockKind, StoreLock};
use crate::model::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Tracker data directory, relative to the project root.
pub const DATA_DIR: &str = ".locate";
const RECORDS_FILE: &str = "records.json";
const LOCK_FILE: &str = "lock";
const LOCK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("record file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "record file {} has unsupported format version {found} (expected {expected})",
        path.display(),
        expected = FORMAT_VERSION
    )]
    UnsupportedVersion { path: PathBuf, found: u32 },

    #[error("record file {} is inconsistent: {source}", path.display())]
    Inconsistent {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("in-memory backend poisoned")]
    Poisoned,
}

impl PersistError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Corrupt { .. } | Self::UnsupportedVersion { .. } | Self::Inconsistent { .. } => {
                ErrorCode::StoreFileCorrupt
            }
            Self::Write { .. } | Self::Io(_) => ErrorCode::StoreWriteFailed,
            Self::Lock(err) => err.code(),
            Self::Poisoned => ErrorCode::InternalUnexpected,
        }
    }
}

/// Where a record collection lives between sessions.
pub trait RecordBackend {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<Record>>, PersistError>;

    fn save(&self, records: &[Record]) -> Result<(), PersistError>;

    /// Save for a caller that does not already hold the backend's lock.
    fn save_locked(&self, records: &[Record]) -> Result<(), PersistError> {
        self.save(records)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    saved_at: DateTime<Utc>,
    records: Vec<Record>,
}

/// `.locate/records.json` with an advisory lock beside it.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Backend rooted at `<project_root>/.locate`.
    #[must_use]
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(DATA_DIR))
    }

    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE)
    }

    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    /// True once `lt init` (or a first save) has created the directory.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.dir.is_dir()
    }

    /// Take the directory lock. Hold the returned guard across a
    /// load-mutate-save cycle to keep other processes out.
    pub fn lock(&self, kind: LockKind) -> Result<StoreLock, PersistError> {
        Ok(StoreLock::acquire(&self.lock_path(), LOCK_TIMEOUT, kind)?)
    }

    fn read(&self) -> Result<Option<Vec<Record>>, PersistError> {
        let path = self.records_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let file: StoreFile = serde_json::from_str(&content).map_err(|source| {
            PersistError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;
        if file.version != FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                path,
                found: file.version,
            });
        }

        debug!(path = %path.display(), count = file.records.len(), "loaded records");
        Ok(Some(file.records))
    }

    fn write(&self, records: &[Record]) -> Result<(), PersistError> {
        let path = self.records_path();
        let write_err = |source| PersistError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let file = StoreFile {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            records: records.to_vec(),
        };
        let body = serde_json::to_vec_pretty(&file)
            .map_err(|err| write_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;

        // Write beside the target, then rename over it.
        let tmp = self.dir.join(format!("{RECORDS_FILE}.tmp"));
        {
            let mut out = fs::File::create(&tmp).map_err(write_err)?;
            out.write_all(&body).map_err(write_err)?;
            out.write_all(b"\n").map_err(write_err)?;
            out.sync_all().map_err(write_err)?;
        }
        fs::rename(&tmp, &path).map_err(write_err)?;

        info!(path = %path.display(), count = records.len(), "saved records");
        Ok(())
    }
}

impl RecordBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Vec<Record>>, PersistError> {
        self.read()
    }

    fn save(&self, records: &[Record]) -> Result<(), PersistError> {
        self.write(records)
    }

    fn save_locked(&self, records: &[Record]) -> Result<(), PersistError> {
        let _lock = self.lock(LockKind::Exclusive)?;
        self.write(records)
    }
}

/// Keeps the last saved collection in memory. Used by tests and by
/// `lt serve --ephemeral`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Option<Vec<Record>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            saved: Mutex::new(Some(records)),
        }
    }
}

impl RecordBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<Record>>, PersistError> {
        let saved = self.saved.lock().map_err(|_| PersistError::Poisoned)?;
        Ok(saved.clone())
    }

    fn save(&self, records: &[Record]) -> Result<(), PersistError> {
        let mut saved = self.saved.lock().map_err(|_| PersistError::Poisoned)?;
        *saved = Some(records.to_vec());
        Ok(())
    }
}

/// Load through `backend` and build a store, checking identity uniqueness.
pub fn load_store(
    backend: &dyn RecordBackend,
    path_hint: &Path,
) -> Result<Option<crate::store::RecordStore>, PersistError> {
    let Some(records) = backend.load()? else {
        return Ok(None);
    };
    crate::store::RecordStore::from_records(records)
        .map(Some)
        .map_err(|source| PersistError::Inconsistent {
            path: path_hint.to_path_buf(),
            source,
        })
}
