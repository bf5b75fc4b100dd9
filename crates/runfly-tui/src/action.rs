//! All possible UI actions. Actions are the sole mechanism for state
//! mutation in the TUI layer.

use std::fmt;
use std::sync::Arc;

use runfly_core::{AppState, ProjectId, RunId, User, UserAccess, UserId};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

#[allow(dead_code)]
impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    RemoveCollaborator {
        project_id: ProjectId,
        user_id: UserId,
        name: String,
    },
    TransferOwnership {
        project_id: ProjectId,
        email: String,
        name: String,
    },
    ShutdownDeployment {
        run_id: RunId,
        name: String,
    },
}

impl ConfirmAction {
    /// The action to dispatch once the user confirms.
    pub fn into_action(self) -> Action {
        match self {
            Self::RemoveCollaborator {
                project_id, user_id, ..
            } => Action::RemoveCollaborator {
                project_id,
                user_id,
            },
            Self::TransferOwnership {
                project_id, email, ..
            } => Action::TransferOwnership { project_id, email },
            Self::ShutdownDeployment { run_id, .. } => Action::ShutdownDeployment(run_id),
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveCollaborator { name, .. } => {
                write!(f, "Remove {name} from the project?")
            }
            Self::TransferOwnership { name, .. } => {
                write!(f, "Make {name} the owner? You will lose owner access.")
            }
            Self::ShutdownDeployment { name, .. } => {
                write!(f, "Shut down the deployment of {name}?")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ─────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Domain state (from the data bridge) ───────────────────────
    StateChanged(Arc<AppState>),

    // ── Catalogue ─────────────────────────────────────────────────
    LoadProjects,
    SelectProject {
        project_id: ProjectId,
        author_id: UserId,
    },
    LoadRuns(ProjectId),

    // ── Collaboration ─────────────────────────────────────────────
    InviteCollaborator {
        project_id: ProjectId,
        email: String,
        access: UserAccess,
    },
    TransferOwnership {
        project_id: ProjectId,
        email: String,
    },
    ChangeAccess {
        project_id: ProjectId,
        user: User,
        access: UserAccess,
    },
    RemoveCollaborator {
        project_id: ProjectId,
        user_id: UserId,
    },
    LoadTeam {
        project_id: ProjectId,
        author_id: UserId,
    },
    ResetInvitation,
    ResetOwnerChange,
    ResetAccessChange(UserId),
    ResetAccessRemoval(UserId),
    ResetTeamLoad(ProjectId),

    // ── Deployment ────────────────────────────────────────────────
    OpenDeployPanel(RunId),
    CloseDeployPanel(RunId),
    Deploy(RunId),
    ShutdownDeployment(RunId),

    // ── Confirm dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
