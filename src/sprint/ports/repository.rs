//! Repository port for sprint persistence and lookup.

use crate::sprint::domain::{ProjectId, Sprint, SprintId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sprint repository operations.
pub type SprintRepositoryResult<T> = Result<T, SprintRepositoryError>;

/// Sprint persistence contract.
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Stores a new sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::DuplicateSprint`] when the identifier
    /// already exists or [`SprintRepositoryError::DuplicateName`] when the
    /// project already has a sprint with the same name.
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Persists changes to an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::NotFound`] when the sprint does not
    /// exist or [`SprintRepositoryError::DuplicateName`] when a rename
    /// collides with a sibling.
    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Finds a sprint by identifier.
    ///
    /// Returns `None` when the sprint does not exist.
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>>;

    /// Returns the project's sprints, latest start date first and newest
    /// record first on equal start dates.
    async fn find_by_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>>;
}

/// Errors returned by sprint repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SprintRepositoryError {
    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),

    /// Another sprint of the project already uses the name.
    #[error("sprint name \"{name}\" must be unique per project")]
    DuplicateName {
        /// Owning project.
        project_id: ProjectId,
        /// Conflicting name.
        name: String,
    },

    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SprintRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
