// ── Root state and reducer ──

use crate::action::Action;

use super::collaboration::{self, CollaborationState};
use super::deploy::{self, DeployState};
use super::projects::{self, ProjectsState};
use super::runs::{self, RunsState};

/// The whole client-side state, one immutable snapshot.
///
/// Snapshots are cheap to clone and safe to hold across renders; a
/// dispatched action produces a new snapshot and never edits an old
/// one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub collaboration: CollaborationState,
    pub projects: ProjectsState,
    pub runs: RunsState,
    pub deploy: DeployState,
}

/// Fold one action into the next snapshot. Every slice sees every
/// action and ignores the ones not addressed to it.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        collaboration: collaboration::reduce(&state.collaboration, action),
        projects: projects::reduce(&state.projects, action),
        runs: runs::reduce(&state.runs, action),
        deploy: deploy::reduce(&state.deploy, action),
    }
}
