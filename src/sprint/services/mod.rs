//! Application services for sprint orchestration.

mod completion;
mod lifecycle;
mod planning;
mod reporting;

pub use lifecycle::{
    CreateSprintRequest, SprintService, SprintServiceError, SprintServiceResult,
    UpdateSprintRequest,
};
