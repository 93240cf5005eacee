//! In-memory sprint note log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::sprint::{
    domain::{SprintId, SprintNote},
    ports::{SprintAuditError, SprintAuditResult, SprintAuditSink},
};

/// Thread-safe append-only note log.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintAuditLog {
    notes: Arc<RwLock<Vec<SprintNote>>>,
}

impl InMemorySprintAuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notes recorded for `sprint_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SprintAuditError`] when the log lock is poisoned.
    pub fn notes_for(&self, sprint_id: SprintId) -> SprintAuditResult<Vec<SprintNote>> {
        let notes = self.notes.read().map_err(lock_error)?;
        Ok(notes
            .iter()
            .filter(|note| note.sprint_id == sprint_id)
            .cloned()
            .collect())
    }
}

fn lock_error(err: impl ToString) -> SprintAuditError {
    SprintAuditError::new(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SprintAuditSink for InMemorySprintAuditLog {
    async fn record(&self, note: &SprintNote) -> SprintAuditResult<()> {
        let mut notes = self.notes.write().map_err(lock_error)?;
        notes.push(note.clone());
        Ok(())
    }
}
