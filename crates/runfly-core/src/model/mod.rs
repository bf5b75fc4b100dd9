//! Domain model: identifiers, users, projects, runs, deployments.

mod deploy;
mod ids;
mod project;
mod run;
mod user;

pub use deploy::{DeployStatusInfo, DeploymentMeta};
pub use ids::{ProjectId, RunId, UserId};
pub use project::Project;
pub use run::{KeyValue, ParamValue, RunRecord};
pub use user::{Collaborator, User, UserAccess};
