//! Shared world state for sprint completion BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use sprintboard::sprint::{
    adapters::memory::{InMemorySprintAuditLog, InMemorySprintRepository, InMemoryTaskStore},
    domain::{CompanyId, CompletionWorkflow, OperatorContext, ProjectId, Sprint, UserId},
    services::{SprintService, SprintServiceError},
};

/// Service type used by the BDD world.
pub type TestSprintService = SprintService<
    InMemorySprintRepository,
    InMemoryTaskStore,
    InMemorySprintAuditLog,
    DefaultClock,
>;

/// Scenario world for sprint completion behaviour tests.
pub struct CompletionWorld {
    pub service: TestSprintService,
    pub tasks: Arc<InMemoryTaskStore>,
    pub audit: Arc<InMemorySprintAuditLog>,
    pub project_id: ProjectId,
    pub sprint: Option<Sprint>,
    pub next_sprint: Option<Sprint>,
    pub workflow: Option<CompletionWorkflow>,
    pub last_confirmation: Option<Result<Sprint, SprintServiceError>>,
}

impl CompletionWorld {
    /// Creates a world with an empty project.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskStore::new());
        let audit = Arc::new(InMemorySprintAuditLog::new());
        let service = SprintService::new(
            Arc::new(InMemorySprintRepository::new()),
            Arc::clone(&tasks),
            Arc::clone(&audit),
            Arc::new(DefaultClock),
            OperatorContext::new(UserId::new(), CompanyId::new()),
        );

        Self {
            service,
            tasks,
            audit,
            project_id: ProjectId::new(),
            sprint: None,
            next_sprint: None,
            workflow: None,
            last_confirmation: None,
        }
    }

    /// Returns the sprint under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no sprint has been set up yet.
    pub fn sprint(&self) -> Result<&Sprint, eyre::Report> {
        self.sprint
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing sprint in scenario world"))
    }
}

impl Default for CompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CompletionWorld {
    CompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
