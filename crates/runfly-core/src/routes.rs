// ── Navigable paths ──
//
// The front end owns the routing table; this module only knows how to
// spell the handful of paths other layers need to emit, so a run detail
// view can link out without depending on the UI crate.

use crate::model::{ProjectId, RunId};

/// Path of a project's run listing.
#[must_use]
pub fn project_path(project_id: &ProjectId) -> String {
    format!("/projects/{project_id}")
}

/// Path of a single run record inside its project. This is the link
/// target a chart detail card points at.
#[must_use]
pub fn run_record_path(project_id: &ProjectId, run_id: &RunId) -> String {
    format!("/projects/{project_id}/runs/{run_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_record_path_nests_under_its_project() {
        let path = run_record_path(&ProjectId::from("p-7"), &RunId::from("r-19"));
        assert_eq!(path, "/projects/p-7/runs/r-19");
    }

    #[test]
    fn project_path_is_a_prefix_of_its_runs() {
        let project = ProjectId::from("alpha");
        let run = RunId::from("beta");
        assert!(run_record_path(&project, &run).starts_with(&project_path(&project)));
    }
}
