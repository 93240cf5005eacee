//! Sprint-derived view over a project.

use super::{ProjectId, Sprint, SprintId, SprintState};
use serde::{Deserialize, Serialize};

/// Sprint count and current active sprint of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSprintOverview {
    /// Project the figures describe.
    pub project_id: ProjectId,
    /// Number of sprints owned by the project, in any state.
    pub sprint_count: usize,
    /// First active sprint in listing order.
    pub active_sprint: Option<SprintId>,
}

impl ProjectSprintOverview {
    /// Builds the overview from the project's sprints in listing order.
    #[must_use]
    pub fn from_sprints(project_id: ProjectId, sprints: &[Sprint]) -> Self {
        let owned = || sprints.iter().filter(|sprint| sprint.project_id() == project_id);
        Self {
            project_id,
            sprint_count: owned().count(),
            active_sprint: owned()
                .find(|sprint| sprint.state() == SprintState::Active)
                .map(Sprint::id),
        }
    }
}
