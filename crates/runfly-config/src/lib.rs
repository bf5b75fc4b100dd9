//! Shared configuration for runfly tools.
//!
//! TOML profiles, token resolution (env + plaintext), and translation
//! to `runfly_core::ServerConfig`. The TUI depends on this crate; it
//! never parses config files itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use runfly_core::{ServerConfig, TrackerConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoToken { profile: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Seconds between deploy status polls.
    #[serde(default = "default_poll_secs")]
    pub deploy_poll_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            insecure: false,
            deploy_poll_secs: default_poll_secs(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_poll_secs() -> u64 {
    5
}

/// A named tracking-server profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://app.runfly.dev").
    pub server: String,

    /// API token (plaintext -- prefer an env var).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Override insecure TLS setting (on-prem self-signed certs).
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override deploy poll cadence.
    pub deploy_poll_secs: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "runfly", "runfly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("runfly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from a specific file + environment.
///
/// `RUNFLY_`-prefixed variables override file values, split on `_`
/// (e.g. `RUNFLY_DEFAULTS_TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RUNFLY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

/// Serialize config to TOML and write it to a specific file.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

/// Pick a profile by name, falling back to the configured default.
pub fn select_profile<'a>(
    config: &'a Config,
    name: Option<&str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let wanted = name
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .ok_or_else(|| ConfigError::Validation {
            field: "default_profile".into(),
            reason: "no profile requested and no default configured".into(),
        })?;

    config
        .profiles
        .get_key_value(wanted.as_str())
        .map(|(k, v)| (k.as_str(), v))
        .ok_or(ConfigError::UnknownProfile { profile: wanted })
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token from the credential chain.
///
/// Order: the profile's `token_env` variable, then the plaintext
/// `token` field. A profile without either is still usable against a
/// local server with auth disabled, so the error is the caller's call.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken {
        profile: profile_name.into(),
    })
}

// ── Translation to runtime config ───────────────────────────────────

/// Build a `ServerConfig` from a profile.
///
/// A missing token is tolerated (anonymous local development); every
/// other validation failure is an error.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ServerConfig, ConfigError> {
    let url: url::Url = profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })?;

    let token = resolve_token(profile, profile_name).ok();
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ServerConfig {
        url,
        token,
        timeout,
        accept_invalid_certs: profile.insecure.unwrap_or(defaults.insecure),
    })
}

/// Build a `TrackerConfig` from a profile's tuning overrides.
pub fn profile_to_tracker_config(profile: &Profile, defaults: &Defaults) -> TrackerConfig {
    TrackerConfig {
        deploy_poll_interval: Duration::from_secs(
            profile.deploy_poll_secs.unwrap_or(defaults.deploy_poll_secs),
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn profiles_parse_with_defaults_filled() {
        let file = write_config(
            r#"
            default_profile = "prod"

            [profiles.prod]
            server = "https://app.runfly.dev"
            token = "tok-1"

            [profiles.lab]
            server = "https://runfly.lab:8443"
            insecure = true
            deploy_poll_secs = 2
            "#,
        );

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("prod"));
        assert_eq!(config.defaults.timeout, 30);
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles["lab"].insecure, Some(true));
    }

    #[test]
    fn select_profile_prefers_the_explicit_name() {
        let file = write_config(
            r#"
            default_profile = "prod"

            [profiles.prod]
            server = "https://app.runfly.dev"

            [profiles.lab]
            server = "https://runfly.lab:8443"
            "#,
        );
        let config = load_config_from(file.path()).unwrap();

        let (name, _) = select_profile(&config, Some("lab")).unwrap();
        assert_eq!(name, "lab");

        let (name, _) = select_profile(&config, None).unwrap();
        assert_eq!(name, "prod");

        assert!(matches!(
            select_profile(&config, Some("missing")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn plaintext_token_resolves_and_absence_is_an_error() {
        let with = Profile {
            server: "https://app.runfly.dev".into(),
            token: Some("tok-1".into()),
            token_env: None,
            insecure: None,
            timeout: None,
            deploy_poll_secs: None,
        };
        assert!(resolve_token(&with, "prod").is_ok());

        let without = Profile { token: None, ..with };
        assert!(matches!(
            resolve_token(&without, "prod"),
            Err(ConfigError::NoToken { .. })
        ));
    }

    #[test]
    fn profile_overrides_beat_global_defaults() {
        let defaults = Defaults::default();
        let profile = Profile {
            server: "https://runfly.lab:8443".into(),
            token: None,
            token_env: None,
            insecure: Some(true),
            timeout: Some(5),
            deploy_poll_secs: Some(2),
        };

        let server = profile_to_server_config(&profile, "lab", &defaults).unwrap();
        assert!(server.accept_invalid_certs);
        assert_eq!(server.timeout, Duration::from_secs(5));
        assert!(server.token.is_none());

        let tracker = profile_to_tracker_config(&profile, &defaults);
        assert_eq!(tracker.deploy_poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn saved_config_loads_back() {
        let config = Config {
            default_profile: Some("prod".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([(
                "prod".to_owned(),
                Profile {
                    server: "https://app.runfly.dev".into(),
                    token: None,
                    token_env: Some("RUNFLY_PROD_TOKEN".into()),
                    insecure: None,
                    timeout: Some(10),
                    deploy_poll_secs: None,
                },
            )]),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
        assert_eq!(loaded.profiles["prod"].timeout, Some(10));
        assert_eq!(
            loaded.profiles["prod"].token_env.as_deref(),
            Some("RUNFLY_PROD_TOKEN")
        );
    }

    #[test]
    fn bad_server_url_is_a_validation_error() {
        let profile = Profile {
            server: "not a url".into(),
            token: None,
            token_env: None,
            insecure: None,
            timeout: None,
            deploy_poll_secs: None,
        };
        assert!(matches!(
            profile_to_server_config(&profile, "lab", &Defaults::default()),
            Err(ConfigError::Validation { .. })
        ));
    }
}
