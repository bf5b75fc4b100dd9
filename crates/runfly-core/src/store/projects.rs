// ── Projects slice ──
//
// The project graph plus the one global load lifecycle. Collaboration
// merge actions rewrite a single project in place; projects not
// addressed by an action are shared untouched.

use indexmap::IndexMap;

use crate::action::Action;
use crate::model::{Project, ProjectId};

use super::communication::Communication;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectsState {
    /// Insertion order mirrors the order the server returned them in.
    pub items: IndexMap<ProjectId, Project>,
    pub loading: Communication,
    pub selected: Option<ProjectId>,
}

/// Rebuild the map with one project swapped for its rewritten copy.
/// A merge addressed to an id we do not hold is dropped.
fn merge_project(
    items: &IndexMap<ProjectId, Project>,
    id: &ProjectId,
    rewrite: impl FnOnce(&Project) -> Project,
) -> IndexMap<ProjectId, Project> {
    let mut next = items.clone();
    if let Some(project) = next.get_mut(id) {
        *project = rewrite(project);
    }
    next
}

pub fn reduce(state: &ProjectsState, action: &Action) -> ProjectsState {
    match action {
        Action::ProjectsLoad(phase) => ProjectsState {
            loading: state.loading.apply(phase),
            ..state.clone()
        },
        Action::ProjectsLoaded(projects) => ProjectsState {
            items: projects
                .iter()
                .map(|p| (p.id.clone(), p.clone()))
                .collect(),
            ..state.clone()
        },
        Action::ProjectSelected(id) => ProjectsState {
            selected: Some(id.clone()),
            ..state.clone()
        },
        Action::CollaboratorUpserted {
            project_id,
            user,
            access,
        } => ProjectsState {
            items: merge_project(&state.items, project_id, |p| {
                p.with_collaborator(user.clone(), *access)
            }),
            ..state.clone()
        },
        Action::CollaboratorRemoved {
            project_id,
            user_id,
        } => ProjectsState {
            items: merge_project(&state.items, project_id, |p| p.without_collaborator(user_id)),
            ..state.clone()
        },
        Action::TeamLoaded {
            project_id,
            owner,
            collaborators,
        } => ProjectsState {
            items: merge_project(&state.items, project_id, |p| {
                p.with_team(owner.clone(), collaborators.clone())
            }),
            ..state.clone()
        },
        Action::OwnerChanged { project_id, email } => ProjectsState {
            items: merge_project(&state.items, project_id, |p| p.with_owner(email)),
            ..state.clone()
        },
        _ => state.clone(),
    }
}
