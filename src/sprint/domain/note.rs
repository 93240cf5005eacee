//! Audit notes and the operator context they are written under.

use super::{CompanyId, SprintId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Implicit user and organisation every operation runs under.
///
/// Supplies defaults for sprint ownership and note authorship. It is not an
/// authorisation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorContext {
    /// Current user.
    pub user: UserId,
    /// Current organisation.
    pub company: CompanyId,
}

impl OperatorContext {
    /// Creates an operator context.
    #[must_use]
    pub const fn new(user: UserId, company: CompanyId) -> Self {
        Self { user, company }
    }
}

/// Human-readable note appended to a sprint's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintNote {
    /// Sprint the note belongs to.
    pub sprint_id: SprintId,
    /// Note text.
    pub body: String,
    /// User the note is attributed to.
    pub author: UserId,
    /// When the note was written.
    pub recorded_at: DateTime<Utc>,
}

impl SprintNote {
    /// Creates a note stamped with the current clock time.
    #[must_use]
    pub fn new(
        sprint_id: SprintId,
        body: impl Into<String>,
        author: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            sprint_id,
            body: body.into(),
            author,
            recorded_at: clock.utc(),
        }
    }

    /// Note recorded when a sprint starts.
    #[must_use]
    pub fn started(sprint_id: SprintId, author: UserId, clock: &impl Clock) -> Self {
        Self::new(sprint_id, "Sprint started", author, clock)
    }

    /// Note recorded when a sprint completes.
    #[must_use]
    pub fn completed(
        sprint_id: SprintId,
        velocity: f64,
        author: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self::new(
            sprint_id,
            format!("Sprint completed with velocity: {velocity:.2} points/day"),
            author,
            clock,
        )
    }

    /// Note recorded when a sprint is cancelled.
    #[must_use]
    pub fn cancelled(sprint_id: SprintId, author: UserId, clock: &impl Clock) -> Self {
        Self::new(sprint_id, "Sprint cancelled", author, clock)
    }
}
