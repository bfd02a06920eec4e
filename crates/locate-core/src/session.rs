//! Form state for creating and editing tickets.
//!
//! The id of the ticket being edited is tracked here, outside the record, so
//! a submit always targets the original id even if the form's id field was
//! touched.

use crate::error::StoreError;
use crate::model::record::{Draft, Record};
use crate::store::RecordStore;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EditSession {
    draft: Draft,
    editing_id: Option<String>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            draft: Draft::blank_form(),
            editing_id: None,
        }
    }
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the ticket stored under `id` into the form.
    pub fn begin(&mut self, store: &RecordStore, id: &str) -> Result<(), StoreError> {
        let record = store.get(id).ok_or_else(|| StoreError::NotFound {
            id: id.trim().to_string(),
        })?;
        self.draft = Draft::from(record);
        self.editing_id = Some(record.id.clone());
        Ok(())
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub const fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// Create or update depending on whether an edit is in progress.
    ///
    /// On success the form is cleared. On failure the draft is left as-is so
    /// the caller can correct it.
    pub fn submit(&mut self, store: &mut RecordStore) -> Result<Record, StoreError> {
        let record = match self.editing_id.as_deref() {
            Some(id) => store.update(id, &self.draft)?,
            None => store.create(&self.draft)?,
        };
        self.reset();
        Ok(record)
    }

    /// Drop the edit and restore the blank form.
    pub fn reset(&mut self) {
        self.draft = Draft::blank_form();
        self.editing_id = None;
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.editing_id.as_deref() {
            debug!(id, "edit cancelled");
        }
        self.reset();
    }

    /// Delete `id` from the store, cancelling the edit if it targets that id.
    pub fn delete(&mut self, store: &mut RecordStore, id: &str) -> Result<Record, StoreError> {
        let removed = store.delete(id)?;
        if self.editing_id.as_deref() == Some(removed.id.as_str()) {
            self.cancel();
        }
        Ok(removed)
    }
}
