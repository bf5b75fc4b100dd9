// ── Catalogue workflows ──

use crate::action::Action;
use crate::model::ProjectId;
use crate::services::ProjectsService;
use crate::store::{Phase, Store};

/// Load the project catalogue.
pub async fn load_projects(store: &Store, service: &impl ProjectsService) {
    store.dispatch(Action::ProjectsLoad(Phase::Request));
    match service.projects().await {
        Ok(projects) => {
            store.dispatch(Action::ProjectsLoad(Phase::Success));
            store.dispatch(Action::ProjectsLoaded(projects));
        }
        Err(error) => store.dispatch(Action::ProjectsLoad(Phase::Failure(error.user_message()))),
    }
}

/// Load one project's experiment runs.
pub async fn load_runs(store: &Store, service: &impl ProjectsService, project_id: &ProjectId) {
    store.dispatch(Action::RunsLoad {
        project_id: project_id.clone(),
        phase: Phase::Request,
    });
    match service.runs(project_id).await {
        Ok(runs) => {
            store.dispatch(Action::RunsLoad {
                project_id: project_id.clone(),
                phase: Phase::Success,
            });
            store.dispatch(Action::RunsLoaded {
                project_id: project_id.clone(),
                runs,
            });
        }
        Err(error) => store.dispatch(Action::RunsLoad {
            project_id: project_id.clone(),
            phase: Phase::Failure(error.user_message()),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Project, RunRecord, User};
    use crate::store::select;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    struct Catalogue {
        fail: Option<&'static str>,
    }

    impl Catalogue {
        fn outcome<T>(&self, value: T) -> Result<T, runfly_api::Error> {
            match self.fail {
                None => Ok(value),
                Some(message) => Err(runfly_api::Error::Api {
                    status: 500,
                    message: message.to_owned(),
                }),
            }
        }
    }

    impl ProjectsService for Catalogue {
        async fn projects(&self) -> Result<Vec<Project>, runfly_api::Error> {
            self.outcome(vec![
                Project::new("p2", "ranker", User::new("a", "a@example.com")),
                Project::new("p1", "churn-model", User::new("b", "b@example.com")),
            ])
        }

        async fn runs(&self, project_id: &ProjectId) -> Result<Vec<RunRecord>, runfly_api::Error> {
            self.outcome(vec![RunRecord {
                id: "r1".into(),
                name: "baseline".into(),
                project_id: project_id.clone(),
                date_created: Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap(),
                metrics: Vec::new(),
                hyperparameters: Vec::new(),
            }])
        }
    }

    #[tokio::test]
    async fn load_projects_populates_in_server_order() {
        let store = Store::new();
        load_projects(&store, &Catalogue { fail: None }).await;

        let state = store.state();
        assert!(select::projects_loading(&state).is_succeeded());
        let ids: Vec<&str> = state.projects.items.keys().map(ProjectId::as_str).collect();
        assert_eq!(ids, ["p2", "p1"]);
    }

    #[tokio::test]
    async fn load_projects_failure_keeps_items_and_surfaces_error() {
        let store = Store::new();
        load_projects(&store, &Catalogue { fail: None }).await;
        load_projects(&store, &Catalogue { fail: Some("503 unavailable") }).await;

        let state = store.state();
        assert_eq!(select::projects_loading(&state).error(), Some("503 unavailable"));
        // The previously loaded catalogue is still there for the UI.
        assert_eq!(state.projects.items.len(), 2);
    }

    #[tokio::test]
    async fn load_runs_is_keyed_by_project() {
        let store = Store::new();
        let p1 = ProjectId::from("p1");
        let p2 = ProjectId::from("p2");

        load_runs(&store, &Catalogue { fail: None }, &p1).await;
        load_runs(&store, &Catalogue { fail: Some("timeout") }, &p2).await;

        let state = store.state();
        assert!(select::runs_loading(&state, &p1).is_succeeded());
        assert_eq!(select::runs_loading(&state, &p2).error(), Some("timeout"));
        assert_eq!(select::runs_of(&state, &p1).len(), 1);
        assert!(select::runs_of(&state, &p2).is_empty());
    }
}
