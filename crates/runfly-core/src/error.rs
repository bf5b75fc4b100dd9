// ── Core error types ──
//
// User-facing errors from runfly-core. Consumers never see raw HTTP
// statuses or JSON parse failures directly; the `From<runfly_api::Error>`
// impl translates transport-layer errors into domain wording. Workflow
// failures never travel this path at all -- they land in the store as
// `Communication::Failure`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the tracking server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Server-reported errors ───────────────────────────────────────
    /// The server refused the request; `message` is its own wording.
    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    /// The server answered with something the client cannot decode.
    #[error("Unexpected server response: {message}")]
    UnexpectedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<runfly_api::Error> for CoreError {
    fn from(err: runfly_api::Error) -> Self {
        match err {
            runfly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            runfly_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            runfly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid server URL: {e}"),
            },
            runfly_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                url: "<unknown>".into(),
                reason: format!("TLS error: {reason}"),
            },
            runfly_api::Error::Api { status, message } => {
                CoreError::ServerRejected { status, message }
            }
            runfly_api::Error::Deserialization { message, .. } => {
                CoreError::UnexpectedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejection_keeps_the_server_wording() {
        let core: CoreError = runfly_api::Error::Api {
            status: 403,
            message: "User is not the project owner".into(),
        }
        .into();
        assert_eq!(core.to_string(), "User is not the project owner");
    }

    #[test]
    fn auth_errors_map_to_authentication_failed() {
        let core: CoreError = runfly_api::Error::Authentication {
            message: "invalid or expired API token".into(),
        }
        .into();
        assert!(matches!(core, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn decode_failures_never_leak_the_raw_body() {
        let core: CoreError = runfly_api::Error::Deserialization {
            message: "expected value at line 1".into(),
            body: "<html>".into(),
        }
        .into();
        assert!(!core.to_string().contains("<html>"));
    }
}
