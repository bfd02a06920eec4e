//! The in-memory ticket collection.
//!
//! [`RecordStore`] is the single owner of the records. Reads hand out shared
//! references; mutations validate first and then replace whole values, so a
//! failed call never leaves the collection half-changed.

use crate::error::StoreError;
use crate::model::record::{Draft, Field, Record};
use crate::seed::seed_records;
use std::collections::HashSet;
use tracing::debug;

/// Validation knobs applied to every create and update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePolicy {
    /// Also require owner, requested-by and utility type.
    pub require_contacts: bool,
    /// Enforce the linear status workflow on update.
    pub strict_transitions: bool,
}

impl StorePolicy {
    #[must_use]
    pub fn required_fields(self) -> Vec<Field> {
        let mut fields = Field::CORE.to_vec();
        if self.require_contacts {
            fields.extend(Field::CONTACTS);
        }
        fields
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    policy: StorePolicy,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo tickets.
    #[must_use]
    pub fn with_seed() -> Self {
        Self {
            records: seed_records(),
            policy: StorePolicy::default(),
        }
    }

    /// Adopt an existing collection in display order.
    ///
    /// Each record is re-normalized (trimmed, blank due to `TBD`, blank notes
    /// to `None`) and must carry an id, location and description. Fails with
    /// [`StoreError::Validation`] on the first record that does not, or with
    /// [`StoreError::DuplicateIdentity`] on the first repeated trimmed id.
    pub fn from_records(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut normalized = Vec::with_capacity(records.len());
        for record in &records {
            let record = Draft::from(record).normalize(&Field::CORE)?;
            if !seen.insert(record.id.clone()) {
                return Err(StoreError::DuplicateIdentity { id: record.id });
            }
            normalized.push(record);
        }

        Ok(Self {
            records: normalized,
            policy: StorePolicy::default(),
        })
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: StorePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> StorePolicy {
        self.policy
    }

    /// Current collection, most recently created first.
    #[must_use]
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        let id = id.trim();
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Validate `draft` and prepend it.
    pub fn create(&mut self, draft: &Draft) -> Result<Record, StoreError> {
        let record = draft.normalize(&self.policy.required_fields())?;

        if self.position(&record.id).is_some() {
            return Err(StoreError::DuplicateIdentity { id: record.id });
        }

        debug!(id = %record.id, status = %record.status, "created ticket");
        self.records.insert(0, record.clone());
        Ok(record)
    }

    /// Replace the ticket stored under `id` with the normalized `draft`.
    ///
    /// The ticket keeps its position. The draft must carry the same id; a
    /// ticket cannot be re-keyed through an edit.
    pub fn update(&mut self, id: &str, draft: &Draft) -> Result<Record, StoreError> {
        let id = id.trim();
        let index = self.position(id).ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let record = draft.normalize(&self.policy.required_fields())?;
        if record.id != id {
            return Err(StoreError::IdentityChanged {
                id: id.to_string(),
                attempted: record.id,
            });
        }

        let current = &self.records[index];
        if self.policy.strict_transitions {
            current
                .status
                .can_transition_to(record.status)
                .map_err(|err| StoreError::transition(id, err))?;
        }

        debug!(
            id = %record.id,
            from = %current.status,
            to = %record.status,
            "updated ticket"
        );
        self.records[index] = record.clone();
        Ok(record)
    }

    /// Remove and return the ticket stored under `id`.
    pub fn delete(&mut self, id: &str) -> Result<Record, StoreError> {
        let id = id.trim();
        let index = self.position(id).ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        let removed = self.records.remove(index);
        debug!(id = %removed.id, "deleted ticket");
        Ok(removed)
    }
}
