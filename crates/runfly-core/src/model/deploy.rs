// ── Deployment status domain types ──

use serde::{Deserialize, Serialize};

/// Endpoint details of a live deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentMeta {
    /// Prediction endpoint URL.
    pub endpoint: String,
    /// Bearer token for the endpoint, when the server issues one.
    pub token: Option<String>,
}

/// Where a run's deployment stands, as last reported by the server.
///
/// Entries are created when a deploy panel first asks for a status and
/// transition only through the deploy workflow — never directly from UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DeployStatusInfo {
    NotDeployed {
        /// Failure message from a rejected deploy or a failed status
        /// check; `None` for the plain idle state.
        error: Option<String>,
    },
    Deploying,
    Deployed { meta: DeploymentMeta },
}

impl DeployStatusInfo {
    /// Idle, never-deployed, no error.
    pub fn idle() -> Self {
        Self::NotDeployed { error: None }
    }

    /// Failed terminal state carrying the reported message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::NotDeployed {
            error: Some(error.into()),
        }
    }

    /// True once the poll loop must stop: deployed, or not-deployed
    /// with an explicit failure. A plain `NotDeployed` mid-poll is not
    /// terminal — the server can report it briefly before the deploy
    /// request lands.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Deployed { .. } | Self::NotDeployed { error: Some(_) }
        )
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::NotDeployed { error } => error.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!DeployStatusInfo::idle().is_terminal());
        assert!(!DeployStatusInfo::Deploying.is_terminal());
        assert!(DeployStatusInfo::failed("quota exceeded").is_terminal());
        assert!(
            DeployStatusInfo::Deployed {
                meta: DeploymentMeta {
                    endpoint: "https://api.example.com/predict/r1".into(),
                    token: None,
                }
            }
            .is_terminal()
        );
    }

    #[test]
    fn error_only_on_failed_not_deployed() {
        assert_eq!(DeployStatusInfo::idle().error(), None);
        assert_eq!(DeployStatusInfo::Deploying.error(), None);
        assert_eq!(
            DeployStatusInfo::failed("no capacity").error(),
            Some("no capacity")
        );
    }
}
