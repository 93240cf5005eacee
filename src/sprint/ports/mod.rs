//! Port contracts for sprint planning.
//!
//! Ports define the infrastructure-agnostic collaborators used by sprint
//! services: the sprint record store, the external task store and the audit
//! note sink.

pub mod audit;
pub mod repository;
pub mod task_store;

pub use audit::{SprintAuditError, SprintAuditResult, SprintAuditSink};
pub use repository::{SprintRepository, SprintRepositoryError, SprintRepositoryResult};
pub use task_store::{SprintAssignment, TaskStore, TaskStoreError, TaskStoreResult};
