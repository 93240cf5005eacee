//! Append-only sink for sprint history notes.

use crate::sprint::domain::SprintNote;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit sink operations.
pub type SprintAuditResult<T> = Result<T, SprintAuditError>;

/// Destination for human-readable sprint notes.
///
/// Delivery is best-effort: services log a failed append and keep the state
/// transition that triggered it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SprintAuditSink: Send + Sync {
    /// Appends a note to the sprint's history.
    ///
    /// # Errors
    ///
    /// Returns [`SprintAuditError`] when the note could not be delivered.
    async fn record(&self, note: &SprintNote) -> SprintAuditResult<()>;
}

/// Error returned when a note could not be delivered.
#[derive(Debug, Clone, Error)]
#[error("audit sink unavailable: {0}")]
pub struct SprintAuditError(pub Arc<dyn std::error::Error + Send + Sync>);

impl SprintAuditError {
    /// Wraps an underlying delivery error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
