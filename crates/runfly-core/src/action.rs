//! Domain actions — the sole mechanism for state mutation.
//!
//! Workflows dispatch these into the [`Store`](crate::store::Store);
//! reducers fold them into the next state snapshot. Constructing an
//! action is pure: identical inputs give identical values, no I/O.

use crate::model::{
    Collaborator, DeployStatusInfo, Project, ProjectId, RunId, RunRecord, User, UserAccess, UserId,
};
use crate::store::Phase;

/// Every state transition in the domain layer is expressed as an Action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Collaboration lifecycles ──────────────────────────────────
    /// Sending a project invitation (one global lifecycle).
    Invitation(Phase),
    /// Transferring project ownership (one global lifecycle).
    OwnerChange(Phase),
    /// Changing one collaborator's access, keyed by user.
    AccessChange { user_id: UserId, phase: Phase },
    /// Revoking one collaborator's access, keyed by user.
    AccessRemoval { user_id: UserId, phase: Phase },
    /// Loading a project's roster (owner + collaborators), keyed by project.
    CollaboratorLoad { project_id: ProjectId, phase: Phase },

    // ── Project-graph merges (secondary actions after success) ────
    /// Insert or replace a collaborator at the given access level.
    CollaboratorUpserted {
        project_id: ProjectId,
        user: User,
        access: UserAccess,
    },
    /// Remove a collaborator from the roster.
    CollaboratorRemoved {
        project_id: ProjectId,
        user_id: UserId,
    },
    /// Replace a project's owner and roster wholesale.
    TeamLoaded {
        project_id: ProjectId,
        owner: User,
        collaborators: Vec<Collaborator>,
    },
    /// Transfer ownership to the member with this email — demotion of
    /// the old owner and promotion of the new land in one transition.
    OwnerChanged { project_id: ProjectId, email: String },

    // ── Project / run loading ─────────────────────────────────────
    ProjectsLoad(Phase),
    ProjectsLoaded(Vec<Project>),
    ProjectSelected(ProjectId),
    RunsLoad { project_id: ProjectId, phase: Phase },
    RunsLoaded {
        project_id: ProjectId,
        runs: Vec<RunRecord>,
    },

    // ── Deployment ────────────────────────────────────────────────
    /// Latest server-reported status for a run. Dispatched by the
    /// deploy workflow on every poll; never by UI directly.
    DeployStatusChanged {
        run_id: RunId,
        info: DeployStatusInfo,
    },
    /// Shutting a deployment down, keyed by run.
    Shutdown { run_id: RunId, phase: Phase },
    /// The deploy panel opened for this run.
    DeployPanelOpened(RunId),
    /// The deploy panel closed; client-side observation stops.
    DeployPanelClosed(RunId),
}
