// Project and run catalogue endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ProjectDto, RunRecordDto};

impl ApiClient {
    /// List every project visible to the authenticated user.
    ///
    /// `GET /api/v1/projects`
    pub async fn list_projects(&self) -> Result<Vec<ProjectDto>, Error> {
        let url = self.api_url("projects");
        debug!("listing projects");
        self.get(url).await
    }

    /// List a project's experiment runs, oldest first.
    ///
    /// `GET /api/v1/projects/{projectId}/runs`
    pub async fn list_runs(&self, project_id: &str) -> Result<Vec<RunRecordDto>, Error> {
        let url = self.api_url(&format!("projects/{project_id}/runs"));
        debug!(project_id, "listing runs");
        self.get(url).await
    }
}
