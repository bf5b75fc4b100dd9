// Wire types for the tracking server's REST API.
//
// All payloads are camelCase JSON. Fields use `#[serde(default)]`
// liberally because older server builds omit optional fields instead
// of sending null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Users and access ─────────────────────────────────────────────────

/// A platform account as collaboration endpoints return it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Access level on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessLevelDto {
    Owner,
    ReadWrite,
    ReadOnly,
}

/// A roster entry: the user payload with the granted level attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub access: AccessLevelDto,
}

/// Full roster of a project: resolved owner plus non-owner members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub owner: UserDto,
    #[serde(default)]
    pub collaborators: Vec<CollaboratorDto>,
}

// ── Projects and runs ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub author: UserDto,
    /// Present only when the server inlines the roster; the dedicated
    /// collaborators endpoint is authoritative.
    #[serde(default)]
    pub collaborators: Vec<CollaboratorDto>,
}

/// A logged metric or hyperparameter value. Numbers and free-form text
/// share one field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValueDto {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValueDto {
    pub key: String,
    pub value: ParamValueDto,
}

/// A flattened experiment run from the runs listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecordDto {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub metrics: Vec<KeyValueDto>,
    #[serde(default)]
    pub hyperparameters: Vec<KeyValueDto>,
}

// ── Deployment ───────────────────────────────────────────────────────

/// Endpoint details of a live deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployMetaDto {
    pub endpoint: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Deployment status report, discriminated by `status`.
///
/// ```json
/// { "status": "deployed", "data": { "endpoint": "...", "token": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DeployStatusDto {
    NotDeployed {
        #[serde(default)]
        error: Option<String>,
    },
    Deploying,
    Deployed {
        data: DeployMetaDto,
    },
}
