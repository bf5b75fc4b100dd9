// runfly-api: Async HTTP client for the runfly tracking server.

pub mod client;
pub mod collaborators;
pub mod deploy;
pub mod error;
pub mod models;
pub mod projects;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
