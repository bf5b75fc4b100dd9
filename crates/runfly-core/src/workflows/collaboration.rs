// ── Collaboration workflows ──
//
// Each orchestrator dispatches the request phase, calls the service,
// and lands exactly one terminal phase. Success is followed by the
// secondary merge into the project graph; failure carries the
// server-reported message into state. Nothing here returns an error:
// the store is the only output channel.

use crate::action::Action;
use crate::model::{ProjectId, User, UserAccess, UserId};
use crate::services::CollaboratorsService;
use crate::store::{Phase, Store};

/// Invite a user by email. On success the server-resolved account is
/// merged into the roster at the granted level.
pub async fn send_invitation(
    store: &Store,
    service: &impl CollaboratorsService,
    project_id: &ProjectId,
    email: &str,
    access: UserAccess,
) {
    store.dispatch(Action::Invitation(Phase::Request));
    match service.send_invitation(project_id, email, access).await {
        Ok(user) => {
            store.dispatch(Action::Invitation(Phase::Success));
            store.dispatch(Action::CollaboratorUpserted {
                project_id: project_id.clone(),
                user,
                access,
            });
        }
        Err(error) => store.dispatch(Action::Invitation(Phase::Failure(error.user_message()))),
    }
}

/// Transfer ownership to the member with this email. The demotion of
/// the old owner and the promotion of the new one land in one merge.
pub async fn change_owner(
    store: &Store,
    service: &impl CollaboratorsService,
    project_id: &ProjectId,
    email: &str,
) {
    store.dispatch(Action::OwnerChange(Phase::Request));
    match service.change_owner(project_id, email).await {
        Ok(()) => {
            store.dispatch(Action::OwnerChange(Phase::Success));
            store.dispatch(Action::OwnerChanged {
                project_id: project_id.clone(),
                email: email.to_owned(),
            });
        }
        Err(error) => store.dispatch(Action::OwnerChange(Phase::Failure(error.user_message()))),
    }
}

/// Set one collaborator's access level.
pub async fn change_access(
    store: &Store,
    service: &impl CollaboratorsService,
    project_id: &ProjectId,
    user: &User,
    access: UserAccess,
) {
    store.dispatch(Action::AccessChange {
        user_id: user.id.clone(),
        phase: Phase::Request,
    });
    match service.change_access(project_id, &user.id, access).await {
        Ok(()) => {
            store.dispatch(Action::AccessChange {
                user_id: user.id.clone(),
                phase: Phase::Success,
            });
            store.dispatch(Action::CollaboratorUpserted {
                project_id: project_id.clone(),
                user: user.clone(),
                access,
            });
        }
        Err(error) => store.dispatch(Action::AccessChange {
            user_id: user.id.clone(),
            phase: Phase::Failure(error.user_message()),
        }),
    }
}

/// Revoke one collaborator's membership. The roster shrinks only on
/// success; a failure leaves it exactly as it was.
pub async fn remove_access(
    store: &Store,
    service: &impl CollaboratorsService,
    project_id: &ProjectId,
    user_id: &UserId,
) {
    store.dispatch(Action::AccessRemoval {
        user_id: user_id.clone(),
        phase: Phase::Request,
    });
    match service.remove_access(project_id, user_id).await {
        Ok(()) => {
            store.dispatch(Action::AccessRemoval {
                user_id: user_id.clone(),
                phase: Phase::Success,
            });
            store.dispatch(Action::CollaboratorRemoved {
                project_id: project_id.clone(),
                user_id: user_id.clone(),
            });
        }
        Err(error) => store.dispatch(Action::AccessRemoval {
            user_id: user_id.clone(),
            phase: Phase::Failure(error.user_message()),
        }),
    }
}

/// Load a project's roster, owner included.
pub async fn load_collaborators(
    store: &Store,
    service: &impl CollaboratorsService,
    project_id: &ProjectId,
    author_id: &UserId,
) {
    store.dispatch(Action::CollaboratorLoad {
        project_id: project_id.clone(),
        phase: Phase::Request,
    });
    match service.collaborators(project_id, author_id).await {
        Ok(team) => {
            store.dispatch(Action::CollaboratorLoad {
                project_id: project_id.clone(),
                phase: Phase::Success,
            });
            store.dispatch(Action::TeamLoaded {
                project_id: project_id.clone(),
                owner: team.owner,
                collaborators: team.collaborators,
            });
        }
        Err(error) => store.dispatch(Action::CollaboratorLoad {
            project_id: project_id.clone(),
            phase: Phase::Failure(error.user_message()),
        }),
    }
}

// ── Resets ────────────────────────────────────────────────────────
//
// Explicit return to the idle state, one per workflow. The UI calls
// these from its retry / dismiss affordances.

pub fn reset_invitation(store: &Store) {
    store.dispatch(Action::Invitation(Phase::Reset));
}

pub fn reset_owner_change(store: &Store) {
    store.dispatch(Action::OwnerChange(Phase::Reset));
}

pub fn reset_access_change(store: &Store, user_id: &UserId) {
    store.dispatch(Action::AccessChange {
        user_id: user_id.clone(),
        phase: Phase::Reset,
    });
}

pub fn reset_access_removal(store: &Store, user_id: &UserId) {
    store.dispatch(Action::AccessRemoval {
        user_id: user_id.clone(),
        phase: Phase::Reset,
    });
}

pub fn reset_collaborator_load(store: &Store, project_id: &ProjectId) {
    store.dispatch(Action::CollaboratorLoad {
        project_id: project_id.clone(),
        phase: Phase::Reset,
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Collaborator, Project};
    use crate::services::Team;
    use crate::store::select;
    use pretty_assertions::assert_eq;

    /// Scripted service: succeeds unless told to fail, and checks the
    /// relevant lifecycle already reads `Requesting` when the call
    /// lands (request precedes the service call).
    struct Scripted {
        fail: Option<&'static str>,
        observe: Store,
    }

    impl Scripted {
        fn happy(observe: &Store) -> Self {
            Self {
                fail: None,
                observe: observe.clone(),
            }
        }

        fn failing(observe: &Store, message: &'static str) -> Self {
            Self {
                fail: Some(message),
                observe: observe.clone(),
            }
        }

        fn outcome(&self) -> Result<(), runfly_api::Error> {
            match self.fail {
                None => Ok(()),
                Some(message) => Err(runfly_api::Error::Api {
                    status: 403,
                    message: message.to_owned(),
                }),
            }
        }
    }

    impl CollaboratorsService for Scripted {
        async fn send_invitation(
            &self,
            _project_id: &ProjectId,
            email: &str,
            _access: UserAccess,
        ) -> Result<User, runfly_api::Error> {
            assert!(select::invitation(&self.observe.state()).is_requesting());
            self.outcome().map(|()| User::new(format!("{email}-id"), email))
        }

        async fn change_owner(
            &self,
            _project_id: &ProjectId,
            _email: &str,
        ) -> Result<(), runfly_api::Error> {
            assert!(select::owner_change(&self.observe.state()).is_requesting());
            self.outcome()
        }

        async fn change_access(
            &self,
            _project_id: &ProjectId,
            user_id: &UserId,
            _access: UserAccess,
        ) -> Result<(), runfly_api::Error> {
            assert!(select::access_change(&self.observe.state(), user_id).is_requesting());
            self.outcome()
        }

        async fn remove_access(
            &self,
            _project_id: &ProjectId,
            user_id: &UserId,
        ) -> Result<(), runfly_api::Error> {
            assert!(select::access_removal(&self.observe.state(), user_id).is_requesting());
            self.outcome()
        }

        async fn collaborators(
            &self,
            project_id: &ProjectId,
            author_id: &UserId,
        ) -> Result<Team, runfly_api::Error> {
            assert!(select::collaborator_load(&self.observe.state(), project_id).is_requesting());
            self.outcome().map(|()| Team {
                owner: User::new(author_id.clone(), "owner@example.com"),
                collaborators: vec![Collaborator::new(
                    User::new("member", "member@example.com"),
                    UserAccess::ReadOnly,
                )],
            })
        }
    }

    fn seeded_store() -> (Store, ProjectId) {
        let store = Store::new();
        let project_id = ProjectId::from("p1");
        let project = Project::new(
            project_id.clone(),
            "churn-model",
            User::new("owner", "owner@example.com"),
        )
        .with_collaborator(User::new("u1", "u1@example.com"), UserAccess::ReadWrite);
        store.dispatch(Action::ProjectsLoaded(vec![project]));
        (store, project_id)
    }

    #[tokio::test]
    async fn change_access_success_merges_new_level() {
        let (store, p1) = seeded_store();
        let service = Scripted::happy(&store);
        let u1 = User::new("u1", "u1@example.com");

        change_access(&store, &service, &p1, &u1, UserAccess::ReadOnly).await;

        let state = store.state();
        assert!(select::access_change(&state, &u1.id).is_succeeded());
        assert_eq!(
            select::project(&state, &p1).unwrap().access_of(&u1.id),
            Some(UserAccess::ReadOnly)
        );
    }

    #[tokio::test]
    async fn remove_access_failure_surfaces_message_and_keeps_roster() {
        let (store, p1) = seeded_store();
        let service = Scripted::failing(&store, "403 forbidden");
        let u1 = UserId::from("u1");

        remove_access(&store, &service, &p1, &u1).await;

        let state = store.state();
        assert_eq!(select::access_removal(&state, &u1).error(), Some("403 forbidden"));
        assert_eq!(
            select::project(&state, &p1).unwrap().access_of(&u1),
            Some(UserAccess::ReadWrite)
        );
    }

    #[tokio::test]
    async fn invitation_success_merges_invited_user() {
        let (store, p1) = seeded_store();
        let service = Scripted::happy(&store);

        send_invitation(&store, &service, &p1, "new@example.com", UserAccess::ReadOnly).await;

        let state = store.state();
        assert!(select::invitation(&state).is_succeeded());
        assert_eq!(
            select::project(&state, &p1)
                .unwrap()
                .access_of(&UserId::from("new@example.com-id")),
            Some(UserAccess::ReadOnly)
        );
    }

    #[tokio::test]
    async fn invitation_failure_leaves_roster_untouched() {
        let (store, p1) = seeded_store();
        let before = select::project(&store.state(), &p1).unwrap().clone();
        let service = Scripted::failing(&store, "email already invited");

        send_invitation(&store, &service, &p1, "new@example.com", UserAccess::ReadOnly).await;

        let state = store.state();
        assert_eq!(select::invitation(&state).error(), Some("email already invited"));
        assert_eq!(select::project(&state, &p1).unwrap(), &before);
    }

    #[tokio::test]
    async fn owner_change_lands_in_one_transition() {
        let (store, p1) = seeded_store();
        let service = Scripted::happy(&store);

        change_owner(&store, &service, &p1, "u1@example.com").await;

        let state = store.state();
        assert!(select::owner_change(&state).is_succeeded());
        let project = select::project(&state, &p1).unwrap();
        assert_eq!(project.author.id, UserId::from("u1"));
        assert_eq!(
            project.access_of(&UserId::from("owner")),
            Some(UserAccess::ReadWrite)
        );
    }

    #[tokio::test]
    async fn load_collaborators_replaces_roster() {
        let (store, p1) = seeded_store();
        let service = Scripted::happy(&store);

        load_collaborators(&store, &service, &p1, &UserId::from("owner")).await;

        let state = store.state();
        assert!(select::collaborator_load(&state, &p1).is_succeeded());
        let project = select::project(&state, &p1).unwrap();
        assert_eq!(project.author.id, UserId::from("owner"));
        assert_eq!(
            project.access_of(&UserId::from("member")),
            Some(UserAccess::ReadOnly)
        );
        // The seeded u1 entry was replaced wholesale.
        assert!(project.access_of(&UserId::from("u1")).is_none());
    }

    #[tokio::test]
    async fn keyed_failures_do_not_cross_talk() {
        let (store, p1) = seeded_store();
        let u1 = User::new("u1", "u1@example.com");
        let u2 = User::new("u2", "u2@example.com");

        change_access(&store, &Scripted::happy(&store), &p1, &u2, UserAccess::ReadOnly).await;
        change_access(
            &store,
            &Scripted::failing(&store, "500 internal"),
            &p1,
            &u1,
            UserAccess::ReadOnly,
        )
        .await;

        let state = store.state();
        assert_eq!(select::access_change(&state, &u1.id).error(), Some("500 internal"));
        assert!(select::access_change(&state, &u2.id).is_succeeded());
    }

    #[tokio::test]
    async fn reset_returns_a_failed_workflow_to_idle() {
        let (store, p1) = seeded_store();
        let u1 = UserId::from("u1");
        remove_access(&store, &Scripted::failing(&store, "403 forbidden"), &p1, &u1).await;

        reset_access_removal(&store, &u1);
        let once = store.state();
        reset_access_removal(&store, &u1);
        let twice = store.state();

        assert!(!select::access_removal(&once, &u1).is_failed());
        assert_eq!(once.collaboration, twice.collaboration);
    }
}
