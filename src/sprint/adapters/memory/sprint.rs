//! In-memory sprint repository.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sprint::{
    domain::{ProjectId, Sprint, SprintId},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};

/// Thread-safe in-memory sprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintRepository {
    state: Arc<RwLock<HashMap<SprintId, Sprint>>>,
}

impl InMemorySprintRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> SprintRepositoryError {
    SprintRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Rejects a sprint whose name is already used by another sprint of the
/// same project.
fn ensure_unique_name(
    sprints: &HashMap<SprintId, Sprint>,
    sprint: &Sprint,
) -> SprintRepositoryResult<()> {
    let taken = sprints.values().any(|existing| {
        existing.id() != sprint.id()
            && existing.project_id() == sprint.project_id()
            && existing.name() == sprint.name()
    });
    if taken {
        return Err(SprintRepositoryError::DuplicateName {
            project_id: sprint.project_id(),
            name: sprint.name().to_owned(),
        });
    }
    Ok(())
}

#[async_trait]
impl SprintRepository for InMemorySprintRepository {
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.state.write().map_err(lock_error)?;
        if sprints.contains_key(&sprint.id()) {
            return Err(SprintRepositoryError::DuplicateSprint(sprint.id()));
        }
        ensure_unique_name(&sprints, sprint)?;
        sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.state.write().map_err(lock_error)?;
        if !sprints.contains_key(&sprint.id()) {
            return Err(SprintRepositoryError::NotFound(sprint.id()));
        }
        ensure_unique_name(&sprints, sprint)?;
        sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        let sprints = self.state.read().map_err(lock_error)?;
        Ok(sprints.get(&id).cloned())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        let sprints = self.state.read().map_err(lock_error)?;
        let mut owned: Vec<Sprint> = sprints
            .values()
            .filter(|sprint| sprint.project_id() == project_id)
            .cloned()
            .collect();
        owned.sort_by_key(|sprint| {
            (
                Reverse(sprint.period().start()),
                Reverse(sprint.created_at()),
            )
        });
        Ok(owned)
    }
}
