// ── Production services over runfly-api ──
//
// Binds the service seams to the HTTP client. Endpoint paths and
// payloads live in `runfly-api`; this module only adapts identifiers
// and converts wire types into the domain model via `convert`.

use crate::model::{DeployStatusInfo, Project, ProjectId, RunId, RunRecord, User, UserAccess, UserId};
use crate::services::{CollaboratorsService, DeployService, ProjectsService, Team};

impl CollaboratorsService for runfly_api::ApiClient {
    async fn send_invitation(
        &self,
        project_id: &ProjectId,
        email: &str,
        access: UserAccess,
    ) -> Result<User, runfly_api::Error> {
        self.invite_collaborator(project_id.as_str(), email, access.into())
            .await
            .map(User::from)
    }

    async fn change_owner(
        &self,
        project_id: &ProjectId,
        email: &str,
    ) -> Result<(), runfly_api::Error> {
        self.transfer_ownership(project_id.as_str(), email).await
    }

    async fn change_access(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        access: UserAccess,
    ) -> Result<(), runfly_api::Error> {
        self.set_collaborator_access(project_id.as_str(), user_id.as_str(), access.into())
            .await
    }

    async fn remove_access(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<(), runfly_api::Error> {
        self.remove_collaborator(project_id.as_str(), user_id.as_str())
            .await
    }

    async fn collaborators(
        &self,
        project_id: &ProjectId,
        author_id: &UserId,
    ) -> Result<Team, runfly_api::Error> {
        self.collaborators_with_owner(project_id.as_str(), author_id.as_str())
            .await
            .map(Team::from)
    }
}

impl ProjectsService for runfly_api::ApiClient {
    async fn projects(&self) -> Result<Vec<Project>, runfly_api::Error> {
        let dtos = self.list_projects().await?;
        Ok(dtos.into_iter().map(Project::from).collect())
    }

    async fn runs(&self, project_id: &ProjectId) -> Result<Vec<RunRecord>, runfly_api::Error> {
        let dtos = self.list_runs(project_id.as_str()).await?;
        Ok(dtos.into_iter().map(RunRecord::from).collect())
    }
}

impl DeployService for runfly_api::ApiClient {
    async fn deploy(&self, run_id: &RunId) -> Result<DeployStatusInfo, runfly_api::Error> {
        self.deploy_model(run_id.as_str())
            .await
            .map(DeployStatusInfo::from)
    }

    async fn status(&self, run_id: &RunId) -> Result<DeployStatusInfo, runfly_api::Error> {
        self.deployment_status(run_id.as_str())
            .await
            .map(DeployStatusInfo::from)
    }

    async fn shutdown(&self, run_id: &RunId) -> Result<DeployStatusInfo, runfly_api::Error> {
        self.shutdown_deployment(run_id.as_str())
            .await
            .map(DeployStatusInfo::from)
    }
}
