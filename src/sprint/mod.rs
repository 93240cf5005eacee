//! Sprint planning for project task boards.
//!
//! A sprint is a time-boxed container of a project's tasks. This module
//! implements the sprint lifecycle (`draft`, `active`, `done`, `cancelled`),
//! derived progress metrics, date-overlap and task-project consistency
//! rules, the two-step completion workflow that decides what happens to
//! unfinished work, and the workflow that plans backlog tasks into a sprint.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
