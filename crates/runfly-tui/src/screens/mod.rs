//! Screen implementations. Each screen is a top-level Component.

mod projects;
mod runs;
mod team;

pub use projects::ProjectsScreen;
pub use runs::RunsScreen;
pub use team::TeamScreen;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create all three screens in tab-bar order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Projects, Box::new(ProjectsScreen::new()) as _),
        (ScreenId::Runs, Box::new(RunsScreen::new()) as _),
        (ScreenId::Team, Box::new(TeamScreen::new()) as _),
    ]
}
