//! Sprint lifecycle state.

use super::ParseSprintStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintState {
    /// Sprint is being planned.
    #[default]
    Draft,
    /// Sprint is running.
    Active,
    /// Sprint has been completed.
    Done,
    /// Sprint has been abandoned.
    Cancelled,
}

impl SprintState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the state machine permits moving to `target`.
    ///
    /// Only starting is guarded by the source state: a sprint becomes
    /// `active` from `draft` alone. Completion, cancellation and reset are
    /// reachable from every state.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match target {
            Self::Active => matches!(self, Self::Draft),
            Self::Draft | Self::Done | Self::Cancelled => true,
        }
    }

    /// Returns whether the sprint takes part in the date-overlap check.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Draft | Self::Active)
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintState {
    type Error = ParseSprintStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseSprintStateError(value.to_owned())),
        }
    }
}
