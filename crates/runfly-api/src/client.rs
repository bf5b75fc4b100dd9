// HTTP client for the tracking server's REST API.
//
// Wraps `reqwest::Client` with URL construction, status checking, and
// error-body extraction. Endpoint groups (collaborators, projects,
// deploy) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for the runfly tracking server.
///
/// All endpoint methods live in sibling modules; on failure they report
/// the server's own error wording through [`Error::Api`], taken from
/// the `{"error": "..."}` body the server sends with non-2xx statuses.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the server root, e.g. `https://app.runfly.dev` or
    /// an on-prem `https://runfly.internal:8443`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when the caller already configured headers and TLS, or
    /// in tests pointing at a mock server.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/v1/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/v1/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::decode(Self::check(resp).await?).await
    }

    /// Send a POST request with a JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::decode(Self::check(resp).await?).await
    }

    /// Send a POST request whose response body carries nothing useful.
    pub(crate) async fn post_unit(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Send a PUT request whose response body carries nothing useful.
    pub(crate) async fn put_unit(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        debug!("PUT {url}");
        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Send a DELETE request and decode the JSON response.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {url}");
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::decode(Self::check(resp).await?).await
    }

    /// Send a DELETE request whose response body carries nothing useful.
    pub(crate) async fn delete_unit(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check(resp).await?;
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    /// Turn a non-2xx response into an error, passing 2xx through.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "invalid or expired API token".into(),
            });
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: server_message(status, &body),
        })
    }

    /// Decode a 2xx response body as JSON.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Extract the server's error wording from a failure body.
///
/// The server reports failures as `{"error": "..."}`; a few older
/// endpoints use `{"message": "..."}`. Anything else falls back to the
/// HTTP reason phrase.
fn server_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            return message;
        }
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_owned()
}
