// ── Runtime server configuration ──
//
// Describes *how* to reach a tracking server. Carries credential data
// and connection tuning but never touches disk -- the TUI resolves its
// profile layer into a `ServerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;

/// Configuration for connecting to a single tracking server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server root URL (e.g. `https://app.runfly.dev`).
    pub url: Url,
    /// Bearer token for the API. `None` is only useful against a local
    /// development server with auth disabled.
    pub token: Option<SecretString>,
    /// Request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (on-prem installs).
    pub accept_invalid_certs: bool,
}

impl ServerConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: None,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Build the HTTP client this config describes.
    pub fn api_client(&self) -> Result<runfly_api::ApiClient, CoreError> {
        let transport = runfly_api::TransportConfig {
            token: self.token.clone(),
            timeout: self.timeout,
            danger_accept_invalid_certs: self.accept_invalid_certs,
        };
        Ok(runfly_api::ApiClient::new(self.url.clone(), &transport)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn api_client_builds_from_a_plain_config() {
        let config = ServerConfig::new(Url::parse("https://runfly.dev").unwrap());
        assert!(config.api_client().is_ok());
    }

    #[test]
    fn token_rides_along() {
        let config = ServerConfig::new(Url::parse("https://runfly.dev").unwrap())
            .with_token(SecretString::from("tok-1".to_owned()));
        assert!(config.token.is_some());
        assert!(config.api_client().is_ok());
    }
}
