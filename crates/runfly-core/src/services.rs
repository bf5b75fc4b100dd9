//! Service seams between orchestration and transport.
//!
//! Workflows talk to the backend through these traits only, so tests
//! drive them with scripted in-memory services while production wires
//! in the HTTP client from `runfly-api`.

use std::future::Future;

use crate::model::{
    Collaborator, DeployStatusInfo, Project, ProjectId, RunId, RunRecord, User, UserAccess, UserId,
};

/// A project roster as the server reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub owner: User,
    pub collaborators: Vec<Collaborator>,
}

/// Collaboration endpoints of a project.
pub trait CollaboratorsService: Send + Sync {
    /// Invite a user by email at the given access level. The server
    /// resolves the email to an account and returns the invited user.
    fn send_invitation(
        &self,
        project_id: &ProjectId,
        email: &str,
        access: UserAccess,
    ) -> impl Future<Output = Result<User, runfly_api::Error>> + Send;

    /// Transfer ownership to the member with this email.
    fn change_owner(
        &self,
        project_id: &ProjectId,
        email: &str,
    ) -> impl Future<Output = Result<(), runfly_api::Error>> + Send;

    /// Set one collaborator's access level.
    fn change_access(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        access: UserAccess,
    ) -> impl Future<Output = Result<(), runfly_api::Error>> + Send;

    /// Revoke one collaborator's membership.
    fn remove_access(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<(), runfly_api::Error>> + Send;

    /// Fetch the full roster. The owner's account is resolved from
    /// `author_id`, so it rides along even when the collaborator list
    /// is empty.
    fn collaborators(
        &self,
        project_id: &ProjectId,
        author_id: &UserId,
    ) -> impl Future<Output = Result<Team, runfly_api::Error>> + Send;
}

/// Project and run catalogue endpoints.
pub trait ProjectsService: Send + Sync {
    fn projects(&self) -> impl Future<Output = Result<Vec<Project>, runfly_api::Error>> + Send;

    fn runs(
        &self,
        project_id: &ProjectId,
    ) -> impl Future<Output = Result<Vec<RunRecord>, runfly_api::Error>> + Send;
}

/// Model-deployment endpoints. Every call reports the run's current
/// deployment status.
pub trait DeployService: Send + Sync {
    /// Ask the server to deploy the run's model.
    fn deploy(
        &self,
        run_id: &RunId,
    ) -> impl Future<Output = Result<DeployStatusInfo, runfly_api::Error>> + Send;

    /// Read the current status without changing it.
    fn status(
        &self,
        run_id: &RunId,
    ) -> impl Future<Output = Result<DeployStatusInfo, runfly_api::Error>> + Send;

    /// Tear the deployment down.
    fn shutdown(
        &self,
        run_id: &RunId,
    ) -> impl Future<Output = Result<DeployStatusInfo, runfly_api::Error>> + Send;
}
