// ── Collaboration slice ──
//
// Two global lifecycles (invitation, owner change) and three keyed
// maps. Map entries appear on first dispatch for an id and are never
// required to be cleaned up: stale entries are harmless, and lookups
// for unknown ids read as NotRequested.

use std::collections::HashMap;

use crate::action::Action;
use crate::model::{ProjectId, UserId};

use super::communication::{Communication, Phase};

/// Communication state for every collaboration workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollaborationState {
    pub sending_invitation: Communication,
    pub changing_owner: Communication,
    pub changing_access: HashMap<UserId, Communication>,
    pub removing_access: HashMap<UserId, Communication>,
    pub loading_collaborators: HashMap<ProjectId, Communication>,
}

/// Replace only the addressed key's entry; every other entry passes
/// through unchanged.
fn step_keyed<K: Clone + Eq + std::hash::Hash>(
    map: &HashMap<K, Communication>,
    key: &K,
    phase: &Phase,
) -> HashMap<K, Communication> {
    let mut next = map.clone();
    let entry = next.entry(key.clone()).or_default();
    *entry = entry.apply(phase);
    next
}

pub fn reduce(state: &CollaborationState, action: &Action) -> CollaborationState {
    match action {
        Action::Invitation(phase) => CollaborationState {
            sending_invitation: state.sending_invitation.apply(phase),
            ..state.clone()
        },
        Action::OwnerChange(phase) => CollaborationState {
            changing_owner: state.changing_owner.apply(phase),
            ..state.clone()
        },
        Action::AccessChange { user_id, phase } => CollaborationState {
            changing_access: step_keyed(&state.changing_access, user_id, phase),
            ..state.clone()
        },
        Action::AccessRemoval { user_id, phase } => CollaborationState {
            removing_access: step_keyed(&state.removing_access, user_id, phase),
            ..state.clone()
        },
        Action::CollaboratorLoad { project_id, phase } => CollaborationState {
            loading_collaborators: step_keyed(&state.loading_collaborators, project_id, phase),
            ..state.clone()
        },
        _ => state.clone(),
    }
}
