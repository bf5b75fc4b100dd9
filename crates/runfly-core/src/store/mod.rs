// ── Client state store ──
//
// Immutable snapshots folded by pure reducers, published over a
// `watch` channel.

mod app_store;
mod collaboration;
mod communication;
mod deploy;
mod projects;
mod runs;
pub mod select;
mod state;

pub use app_store::{StateStream, StateWatchStream, Store};
pub use collaboration::CollaborationState;
pub use communication::{Communication, Phase};
pub use deploy::DeployState;
pub use projects::ProjectsState;
pub use runs::RunsState;
pub use state::{reduce, AppState};
