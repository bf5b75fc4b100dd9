// ── Selectors ──
//
// Total read helpers over a snapshot. Missing keys read as idle or
// `None`; no selector can panic on any state.

use crate::model::{DeployStatusInfo, Project, ProjectId, RunId, RunRecord, UserId};

use super::communication::Communication;
use super::state::AppState;

static NOT_REQUESTED: Communication = Communication::NotRequested;

// ── Collaboration lifecycles ──────────────────────────────────────

pub fn invitation(state: &AppState) -> &Communication {
    &state.collaboration.sending_invitation
}

pub fn owner_change(state: &AppState) -> &Communication {
    &state.collaboration.changing_owner
}

pub fn access_change<'a>(state: &'a AppState, user_id: &UserId) -> &'a Communication {
    state
        .collaboration
        .changing_access
        .get(user_id)
        .unwrap_or(&NOT_REQUESTED)
}

pub fn access_removal<'a>(state: &'a AppState, user_id: &UserId) -> &'a Communication {
    state
        .collaboration
        .removing_access
        .get(user_id)
        .unwrap_or(&NOT_REQUESTED)
}

pub fn collaborator_load<'a>(state: &'a AppState, project_id: &ProjectId) -> &'a Communication {
    state
        .collaboration
        .loading_collaborators
        .get(project_id)
        .unwrap_or(&NOT_REQUESTED)
}

// ── Projects and runs ─────────────────────────────────────────────

pub fn projects_loading(state: &AppState) -> &Communication {
    &state.projects.loading
}

pub fn project<'a>(state: &'a AppState, id: &ProjectId) -> Option<&'a Project> {
    state.projects.items.get(id)
}

pub fn selected_project(state: &AppState) -> Option<&Project> {
    state
        .projects
        .selected
        .as_ref()
        .and_then(|id| state.projects.items.get(id))
}

pub fn runs_loading<'a>(state: &'a AppState, project_id: &ProjectId) -> &'a Communication {
    state
        .runs
        .loading
        .get(project_id)
        .unwrap_or(&NOT_REQUESTED)
}

pub fn runs_of<'a>(state: &'a AppState, project_id: &ProjectId) -> &'a [RunRecord] {
    state
        .runs
        .by_project
        .get(project_id)
        .map_or(&[], Vec::as_slice)
}

// ── Deployment ────────────────────────────────────────────────────

pub fn deploy_status<'a>(state: &'a AppState, run_id: &RunId) -> Option<&'a DeployStatusInfo> {
    state.deploy.statuses.get(run_id)
}

/// The run whose deploy panel is open, if any.
pub fn active_run(state: &AppState) -> Option<&RunId> {
    state.deploy.active_run.as_ref()
}

/// Status of the run whose panel is open. `None` when no panel is
/// open or no status has arrived yet.
pub fn active_deploy_status(state: &AppState) -> Option<&DeployStatusInfo> {
    active_run(state).and_then(|run_id| deploy_status(state, run_id))
}

pub fn shutdown<'a>(state: &'a AppState, run_id: &RunId) -> &'a Communication {
    state
        .deploy
        .shutting_down
        .get(run_id)
        .unwrap_or(&NOT_REQUESTED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::store::{reduce, Phase};
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_keys_read_as_idle() {
        let state = AppState::default();
        let ghost = UserId::from("ghost");
        assert_eq!(access_change(&state, &ghost), &Communication::NotRequested);
        assert_eq!(access_removal(&state, &ghost), &Communication::NotRequested);
        assert_eq!(
            collaborator_load(&state, &ProjectId::from("none")),
            &Communication::NotRequested
        );
        assert_eq!(
            shutdown(&state, &RunId::from("none")),
            &Communication::NotRequested
        );
    }

    #[test]
    fn missing_entities_read_as_none_or_empty() {
        let state = AppState::default();
        assert!(project(&state, &ProjectId::from("p1")).is_none());
        assert!(selected_project(&state).is_none());
        assert!(runs_of(&state, &ProjectId::from("p1")).is_empty());
        assert!(deploy_status(&state, &RunId::from("r1")).is_none());
        assert!(active_deploy_status(&state).is_none());
    }

    #[test]
    fn keyed_lookup_finds_dispatched_entries() {
        let u1 = UserId::from("u1");
        let state = reduce(
            &AppState::default(),
            &Action::AccessChange {
                user_id: u1.clone(),
                phase: Phase::Request,
            },
        );
        assert!(access_change(&state, &u1).is_requesting());
        assert!(access_change(&state, &UserId::from("u2")).error().is_none());
    }

    #[test]
    fn active_status_follows_the_open_panel() {
        let r1 = RunId::from("r1");
        let mut state = reduce(&AppState::default(), &Action::DeployPanelOpened(r1.clone()));
        assert!(active_deploy_status(&state).is_none());

        state = reduce(
            &state,
            &Action::DeployStatusChanged {
                run_id: r1,
                info: DeployStatusInfo::Deploying,
            },
        );
        assert_eq!(active_deploy_status(&state), Some(&DeployStatusInfo::Deploying));
    }

    #[test]
    fn selected_project_requires_a_loaded_entry() {
        let state = reduce(
            &AppState::default(),
            &Action::ProjectSelected(ProjectId::from("p1")),
        );
        // Selection without a loaded project reads as None, not a panic.
        assert!(selected_project(&state).is_none());
    }
}
