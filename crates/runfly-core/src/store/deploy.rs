// ── Deployment slice ──
//
// Per-run deployment status plus shutdown lifecycles, and the one run
// whose deploy panel is open. Closing the panel clears `active_run`
// but keeps the last known status; reopening refreshes it.

use std::collections::HashMap;

use crate::action::Action;
use crate::model::{DeployStatusInfo, RunId};

use super::communication::Communication;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployState {
    pub statuses: HashMap<RunId, DeployStatusInfo>,
    pub shutting_down: HashMap<RunId, Communication>,
    pub active_run: Option<RunId>,
}

pub fn reduce(state: &DeployState, action: &Action) -> DeployState {
    match action {
        Action::DeployStatusChanged { run_id, info } => {
            let mut statuses = state.statuses.clone();
            statuses.insert(run_id.clone(), info.clone());
            DeployState {
                statuses,
                ..state.clone()
            }
        }
        Action::Shutdown { run_id, phase } => {
            let mut shutting_down = state.shutting_down.clone();
            let entry = shutting_down.entry(run_id.clone()).or_default();
            *entry = entry.apply(phase);
            DeployState {
                shutting_down,
                ..state.clone()
            }
        }
        Action::DeployPanelOpened(run_id) => DeployState {
            active_run: Some(run_id.clone()),
            ..state.clone()
        },
        Action::DeployPanelClosed(run_id) => {
            // A stale close (panel already switched to another run)
            // must not blank the newer panel.
            if state.active_run.as_ref() == Some(run_id) {
                DeployState {
                    active_run: None,
                    ..state.clone()
                }
            } else {
                state.clone()
            }
        }
        _ => state.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::DeploymentMeta;
    use crate::store::communication::Phase;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_updates_are_per_run() {
        let r1 = RunId::from("r1");
        let r2 = RunId::from("r2");
        let mut state = DeployState::default();
        state = reduce(
            &state,
            &Action::DeployStatusChanged {
                run_id: r1.clone(),
                info: DeployStatusInfo::Deploying,
            },
        );
        state = reduce(
            &state,
            &Action::DeployStatusChanged {
                run_id: r2.clone(),
                info: DeployStatusInfo::failed("out of quota"),
            },
        );
        assert_eq!(state.statuses.get(&r1), Some(&DeployStatusInfo::Deploying));
        assert_eq!(state.statuses.get(&r2).unwrap().error(), Some("out of quota"));
    }

    #[test]
    fn closing_keeps_the_last_status() {
        let r1 = RunId::from("r1");
        let mut state = reduce(&DeployState::default(), &Action::DeployPanelOpened(r1.clone()));
        state = reduce(
            &state,
            &Action::DeployStatusChanged {
                run_id: r1.clone(),
                info: DeployStatusInfo::Deployed {
                    meta: DeploymentMeta {
                        endpoint: "https://api.example.com/m/r1".into(),
                        token: None,
                    },
                },
            },
        );
        state = reduce(&state, &Action::DeployPanelClosed(r1.clone()));
        assert_eq!(state.active_run, None);
        assert!(matches!(
            state.statuses.get(&r1),
            Some(DeployStatusInfo::Deployed { .. })
        ));
    }

    #[test]
    fn stale_close_does_not_blank_a_newer_panel() {
        let r1 = RunId::from("r1");
        let r2 = RunId::from("r2");
        let mut state = reduce(&DeployState::default(), &Action::DeployPanelOpened(r1.clone()));
        state = reduce(&state, &Action::DeployPanelOpened(r2.clone()));
        state = reduce(&state, &Action::DeployPanelClosed(r1));
        assert_eq!(state.active_run, Some(r2));
    }

    #[test]
    fn shutdown_lifecycle_is_keyed() {
        let r1 = RunId::from("r1");
        let mut state = DeployState::default();
        state = reduce(
            &state,
            &Action::Shutdown {
                run_id: r1.clone(),
                phase: Phase::Request,
            },
        );
        assert!(state.shutting_down.get(&r1).unwrap().is_requesting());
        state = reduce(
            &state,
            &Action::Shutdown {
                run_id: r1.clone(),
                phase: Phase::Failure("already stopped".into()),
            },
        );
        assert_eq!(
            state.shutting_down.get(&r1).unwrap().error(),
            Some("already stopped")
        );
    }
}
