//! In-memory adapter implementations.
//!
//! These adapters provide simple, thread-safe implementations of every
//! sprint port, suitable for tests and for embedding without a database.

mod audit;
mod sprint;
mod task;

pub use audit::InMemorySprintAuditLog;
pub use sprint::InMemorySprintRepository;
pub use task::InMemoryTaskStore;
