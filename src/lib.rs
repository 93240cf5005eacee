//! Sprintboard: sprint planning for project task boards.
//!
//! This crate manages time-boxed sprints over an external task store: sprint
//! scheduling and lifecycle, derived progress metrics, the completion
//! workflow for unfinished tasks, and bulk planning from the project backlog.
//!
//! # Architecture
//!
//! Sprintboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`sprint`]: Sprint lifecycle, metrics and planning workflows

pub mod sprint;
