// runfly-core: Reactive state layer between runfly-api and consumers (TUI).

pub mod action;
pub mod chart;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod remote;
pub mod routes;
pub mod services;
pub mod store;
pub mod tracker;
pub mod workflows;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::Action;
pub use config::ServerConfig;
pub use error::CoreError;
pub use services::{CollaboratorsService, DeployService, ProjectsService, Team};
pub use store::select;
pub use store::{AppState, Communication, Phase, StateStream, Store, reduce};
pub use tracker::{HttpTracker, Tracker, TrackerConfig};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Identity
    ProjectId, RunId, UserId,
    // People and access
    Collaborator, User, UserAccess,
    // Catalogue
    KeyValue, ParamValue, Project, RunRecord,
    // Deployment
    DeployStatusInfo, DeploymentMeta,
};

// Chart engine re-exports.
pub use chart::{ChartModel, LinearScale, Mark, TimeScale};
