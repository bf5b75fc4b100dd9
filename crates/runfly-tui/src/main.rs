//! `runfly-tui` — Terminal front end for the runfly experiment tracker.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive state from
//! `runfly-core`'s [`StateStream`](runfly_core::StateStream). Screens
//! are navigable via number keys (1-3): Projects, Runs, and Team.
//!
//! Logs are written to a file (default `/tmp/runfly-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task streams
//! state snapshots from the tracker into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use runfly_core::{HttpTracker, ServerConfig, TrackerConfig};

use crate::app::App;

/// Terminal dashboard for browsing runs and managing project teams.
#[derive(Parser, Debug)]
#[command(name = "runfly-tui", version, about)]
struct Cli {
    /// Tracking server URL (e.g., https://app.runfly.dev)
    #[arg(short = 's', long, env = "RUNFLY_SERVER")]
    server: Option<String>,

    /// Bearer token for the server API
    #[arg(short = 't', long, env = "RUNFLY_TOKEN")]
    token: Option<String>,

    /// Config profile to use when no server is given on the CLI
    #[arg(short = 'p', long)]
    profile: Option<String>,

    /// Accept self-signed TLS certificates (on-prem installs)
    #[arg(long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/runfly-tui.log)
    #[arg(long, default_value = "/tmp/runfly-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("runfly_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("runfly-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Build a tracker from CLI args, if a server URL was provided.
fn build_tracker(cli: &Cli) -> Option<HttpTracker> {
    let url_str = cli.server.as_deref()?;
    let url = url_str.parse::<url::Url>().expect("invalid server URL");

    let mut server = ServerConfig::new(url);
    server.accept_invalid_certs = cli.insecure;
    if let Some(token) = &cli.token {
        server = server.with_token(SecretString::from(token.clone()));
    }

    HttpTracker::connect(&server, TrackerConfig::default()).ok()
}

/// Try loading a tracker from the shared config file.
fn build_tracker_from_config(profile: Option<&str>) -> Option<HttpTracker> {
    let cfg = runfly_config::load_config().ok()?;
    let (name, profile) = runfly_config::select_profile(&cfg, profile).ok()?;
    let server = runfly_config::profile_to_server_config(profile, name, &cfg.defaults).ok()?;
    let tracker_config = runfly_config::profile_to_tracker_config(profile, &cfg.defaults);
    HttpTracker::connect(&server, tracker_config).ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        server = cli.server.as_deref().unwrap_or("(not set)"),
        profile = cli.profile.as_deref().unwrap_or("(default)"),
        "starting runfly-tui"
    );

    // Priority: CLI flags > config file profile
    let tracker =
        build_tracker(&cli).or_else(|| build_tracker_from_config(cli.profile.as_deref()));
    let mut app = App::new(tracker);
    app.run().await?;

    Ok(())
}
