// Model deployment endpoints
//
// Every call returns the run's current `DeployStatusDto`, so callers
// always hold the freshest status the server will admit to.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::DeployStatusDto;

impl ApiClient {
    /// Ask the server to deploy the run's model.
    ///
    /// `POST /api/v1/deployments/{runId}`
    pub async fn deploy_model(&self, run_id: &str) -> Result<DeployStatusDto, Error> {
        let url = self.api_url(&format!("deployments/{run_id}"));
        debug!(run_id, "requesting deployment");
        self.post(url, &json!({})).await
    }

    /// Read the run's deployment status without changing it.
    ///
    /// `GET /api/v1/deployments/{runId}`
    pub async fn deployment_status(&self, run_id: &str) -> Result<DeployStatusDto, Error> {
        let url = self.api_url(&format!("deployments/{run_id}"));
        self.get(url).await
    }

    /// Tear the run's deployment down.
    ///
    /// `DELETE /api/v1/deployments/{runId}`
    pub async fn shutdown_deployment(&self, run_id: &str) -> Result<DeployStatusDto, Error> {
        let url = self.api_url(&format!("deployments/{run_id}"));
        debug!(run_id, "shutting deployment down");
        self.delete(url).await
    }
}
