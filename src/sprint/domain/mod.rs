//! Domain model for sprint planning.
//!
//! Sprints are time-boxed containers of project tasks. The domain covers the
//! sprint lifecycle, derived progress metrics, date and project consistency
//! rules, and the transient workflows used to complete a sprint and to plan
//! backlog tasks into it. Storage and notification concerns stay outside this
//! boundary.

mod backlog;
mod completion;
mod error;
mod ids;
mod metrics;
mod note;
mod period;
mod policy;
mod project;
mod sprint;
mod state;
mod task;

pub use backlog::BacklogAssignment;
pub use completion::{
    CompletionOutcome, CompletionWorkflow, IncompleteTaskDisposition, ResolvedDisposition,
};
pub use error::{
    ParseDispositionError, ParseSprintStateError, SprintDomainError, SprintErrorCategory,
};
pub use ids::{CompanyId, ProjectId, SprintId, TaskId, UserId};
pub use metrics::{SprintMetrics, velocity};
pub use note::{OperatorContext, SprintNote};
pub use period::SprintPeriod;
pub use policy::SprintPolicy;
pub use project::ProjectSprintOverview;
pub use sprint::{PersistedSprintData, Sprint, SprintName};
pub use state::SprintState;
pub use task::{StoryPoints, TaskRecord, TaskStage};
