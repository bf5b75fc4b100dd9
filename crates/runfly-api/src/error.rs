use thiserror::Error;

/// Top-level error type for the `runfly-api` crate.
///
/// Covers every failure mode the HTTP client can hit: authentication,
/// transport, server-reported errors, and response decoding.
/// `runfly-core` turns these into the messages workflows publish.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the credentials (401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server-reported ─────────────────────────────────────────────
    /// Structured error from the tracking server. `message` is the
    /// server's own wording, taken from the `{"error": "..."}` body.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The text a user should see for this failure.
    ///
    /// Server-reported errors surface verbatim so the UI shows exactly
    /// what the server said; everything else falls back to the display
    /// form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Authentication { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Api { status: 401, .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}
