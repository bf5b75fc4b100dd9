//! Component trait — the unit of composition for screens.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// A renderable, event-handling UI unit. Screens implement this; the
/// app drives every hook from its event loop.
pub trait Component {
    /// Called once before the event loop starts. Components keep the
    /// sender to dispatch actions outside the request/response hooks.
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()>;

    /// Handle a key event. Only the active screen sees these; global
    /// keys never reach it.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>>;

    /// Handle a mouse event. Most screens don't care.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// True while the screen has a modal layer open (text field,
    /// detail card, deploy panel). The app then routes every key here
    /// except Ctrl+C, so typing "q" into a field doesn't quit and Esc
    /// closes the layer instead of switching screens.
    fn captures_input(&self) -> bool {
        false
    }

    /// React to an action, optionally producing a follow-up.
    fn update(&mut self, action: &Action) -> Result<Option<Action>>;

    /// Draw into the given area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently holds input focus.
    #[allow(dead_code)]
    fn focused(&self) -> bool {
        false
    }

    /// Set focus state.
    fn set_focused(&mut self, _focused: bool) {}

    /// Stable name for logging.
    #[allow(dead_code)]
    fn id(&self) -> &str;
}
