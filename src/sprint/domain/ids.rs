//! Identifier newtypes for sprints and the records they reference.
//!
//! Every identifier wraps a UUID so that sprint, task, project, user and
//! company references cannot be mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $what, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $what, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a sprint.
    SprintId,
    "sprint"
);

uuid_identifier!(
    /// Identifier of a task held by the external task store.
    TaskId,
    "task"
);

uuid_identifier!(
    /// Identifier of the project owning sprints and tasks.
    ProjectId,
    "project"
);

uuid_identifier!(
    /// Identifier of a user, used for sprint ownership and note authorship.
    UserId,
    "user"
);

uuid_identifier!(
    /// Identifier of the organisation a sprint belongs to.
    CompanyId,
    "company"
);
