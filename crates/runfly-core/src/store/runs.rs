// ── Runs slice ──
//
// Experiment runs cached per project, each project with its own load
// lifecycle so switching projects never clobbers in-flight loads.

use std::collections::HashMap;

use crate::action::Action;
use crate::model::{ProjectId, RunRecord};

use super::communication::Communication;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunsState {
    pub by_project: HashMap<ProjectId, Vec<RunRecord>>,
    pub loading: HashMap<ProjectId, Communication>,
}

pub fn reduce(state: &RunsState, action: &Action) -> RunsState {
    match action {
        Action::RunsLoad { project_id, phase } => {
            let mut loading = state.loading.clone();
            let entry = loading.entry(project_id.clone()).or_default();
            *entry = entry.apply(phase);
            RunsState {
                loading,
                ..state.clone()
            }
        }
        Action::RunsLoaded { project_id, runs } => {
            let mut by_project = state.by_project.clone();
            by_project.insert(project_id.clone(), runs.clone());
            RunsState {
                by_project,
                ..state.clone()
            }
        }
        _ => state.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::communication::Phase;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn run(id: &str) -> RunRecord {
        RunRecord {
            id: id.into(),
            name: format!("run {id}"),
            project_id: ProjectId::from("p1"),
            date_created: Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap(),
            metrics: Vec::new(),
            hyperparameters: Vec::new(),
        }
    }

    #[test]
    fn load_lifecycles_are_per_project() {
        let p1 = ProjectId::from("p1");
        let p2 = ProjectId::from("p2");
        let mut state = RunsState::default();
        state = reduce(
            &state,
            &Action::RunsLoad {
                project_id: p1.clone(),
                phase: Phase::Request,
            },
        );
        state = reduce(
            &state,
            &Action::RunsLoad {
                project_id: p2.clone(),
                phase: Phase::Failure("timeout".into()),
            },
        );
        assert!(state.loading.get(&p1).unwrap().is_requesting());
        assert_eq!(state.loading.get(&p2).unwrap().error(), Some("timeout"));
    }

    #[test]
    fn loaded_runs_replace_the_project_cache() {
        let p1 = ProjectId::from("p1");
        let mut state = reduce(
            &RunsState::default(),
            &Action::RunsLoaded {
                project_id: p1.clone(),
                runs: vec![run("r1")],
            },
        );
        state = reduce(
            &state,
            &Action::RunsLoaded {
                project_id: p1.clone(),
                runs: vec![run("r2"), run("r3")],
            },
        );
        let cached = state.by_project.get(&p1).unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id.as_str(), "r2");
    }

    #[test]
    fn foreign_actions_are_identity() {
        let state = reduce(
            &RunsState::default(),
            &Action::RunsLoaded {
                project_id: ProjectId::from("p1"),
                runs: vec![run("r1")],
            },
        );
        let next = reduce(&state, &Action::ProjectsLoad(Phase::Request));
        assert_eq!(next, state);
    }
}
