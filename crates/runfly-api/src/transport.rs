// Shared transport configuration for building reqwest::Client instances.
//
// The tracking server sits behind TLS in hosted installs and behind
// self-signed certificates on-prem, so certificate handling and the
// bearer token both live here rather than in each endpoint module.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bearer token sent on every request; `None` for anonymous access
    /// (only useful against a local development server).
    pub token: Option<SecretString>,
    pub timeout: Duration,
    /// Accept self-signed certificates (on-prem installs).
    pub danger_accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            token: None,
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// The token (when present) is installed as a default `Authorization`
    /// header and marked sensitive so it never shows up in logs.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| Error::Authentication {
                    message: "API token contains characters not valid in a header".into(),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("runfly/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        assert!(TransportConfig::default().build_client().is_ok());
    }

    #[test]
    fn token_with_control_characters_is_rejected() {
        let config = TransportConfig {
            token: Some(SecretString::from("bad\ntoken".to_owned())),
            ..TransportConfig::default()
        };
        assert!(matches!(
            config.build_client(),
            Err(Error::Authentication { .. })
        ));
    }
}
