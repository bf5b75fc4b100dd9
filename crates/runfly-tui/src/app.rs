//! Application core — event loop, screen management, action dispatch.
//!
//! Intent actions (load, invite, deploy, ...) are turned into tracker
//! calls here; their outcomes come back as state snapshots through the
//! data bridge, never as return values.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use runfly_core::HttpTracker;

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a notification stays in the status bar.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Tracking server facade; `None` when started offline.
    tracker: Option<HttpTracker>,
    /// Stops the data bridge task on shutdown.
    bridge_cancel: CancellationToken,
    /// Confirmation awaiting a y/n answer.
    pending_confirm: Option<ConfirmAction>,
    /// Last notification and when it was posted.
    notification: Option<(Notification, Instant)>,
    /// Help overlay visibility.
    help_visible: bool,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(tracker: Option<HttpTracker>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::default(),
            previous_screen: None,
            screens,
            running: true,
            tracker,
            bridge_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        // Focus the initial screen
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        if let Some(tracker) = &self.tracker {
            data_bridge::spawn(tracker, self.action_tx.clone(), self.bridge_cancel.clone());
            self.action_tx.send(Action::LoadProjects)?;
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.bridge_cancel.cancel();
        if let Some(tracker) = self.tracker.take() {
            tracker.stop().await;
        }
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // A pending confirmation swallows everything until answered.
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // A screen with an open modal layer owns the keyboard; only
        // Ctrl+C bypasses it.
        let captured = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|screen| screen.captures_input());
        if captured {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            return self.delegate_key(key);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            // Help
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc — context-dependent back
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        self.delegate_key(key)
    }

    fn delegate_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Handle mouse events (delegate to active screen).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Run a tracker call on the runtime, or report that none is
    /// connected. Outcomes land in the store, not here.
    fn with_tracker<F, Fut>(&self, call: F)
    where
        F: FnOnce(HttpTracker) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        match &self.tracker {
            Some(tracker) => {
                tokio::spawn(call(tracker.clone()));
            }
            None => {
                let _ = self.action_tx.send(Action::Notify(Notification::error(
                    "Not connected to a tracking server",
                )));
            }
        }
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    // Unfocus current screen
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    // Focus new screen
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.action_tx.send(confirm.into_action())?;
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::Tick => {
                let expired = self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, posted)| posted.elapsed() >= NOTIFICATION_TTL);
                if expired {
                    self.notification = None;
                }
                // The active screen may animate on ticks.
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // Every screen tracks the snapshot, visible or not, so
            // switching tabs never shows stale data.
            Action::StateChanged(_) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // ── Catalogue intents ─────────────────────────────────
            Action::LoadProjects => {
                self.with_tracker(|tracker| async move {
                    tracker.load_projects().await;
                });
            }

            Action::SelectProject {
                project_id,
                author_id,
            } => {
                let project_id = project_id.clone();
                let author_id = author_id.clone();
                if let Some(tracker) = &self.tracker {
                    tracker.select_project(project_id.clone());
                }
                self.with_tracker(move |tracker| async move {
                    tracker.load_runs(&project_id).await;
                    tracker.load_collaborators(&project_id, &author_id).await;
                });
            }

            Action::LoadRuns(project_id) => {
                let project_id = project_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.load_runs(&project_id).await;
                });
            }

            // ── Collaboration intents ─────────────────────────────
            Action::InviteCollaborator {
                project_id,
                email,
                access,
            } => {
                let project_id = project_id.clone();
                let email = email.clone();
                let access = *access;
                self.with_tracker(move |tracker| async move {
                    tracker.send_invitation(&project_id, &email, access).await;
                });
            }

            Action::TransferOwnership { project_id, email } => {
                let project_id = project_id.clone();
                let email = email.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.change_owner(&project_id, &email).await;
                });
            }

            Action::ChangeAccess {
                project_id,
                user,
                access,
            } => {
                let project_id = project_id.clone();
                let user = user.clone();
                let access = *access;
                self.with_tracker(move |tracker| async move {
                    tracker.change_access(&project_id, &user, access).await;
                });
            }

            Action::RemoveCollaborator {
                project_id,
                user_id,
            } => {
                let project_id = project_id.clone();
                let user_id = user_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.remove_access(&project_id, &user_id).await;
                });
            }

            Action::LoadTeam {
                project_id,
                author_id,
            } => {
                let project_id = project_id.clone();
                let author_id = author_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.load_collaborators(&project_id, &author_id).await;
                });
            }

            Action::ResetInvitation => {
                if let Some(tracker) = &self.tracker {
                    tracker.reset_invitation();
                }
            }

            Action::ResetOwnerChange => {
                if let Some(tracker) = &self.tracker {
                    tracker.reset_owner_change();
                }
            }

            Action::ResetAccessChange(user_id) => {
                if let Some(tracker) = &self.tracker {
                    tracker.reset_access_change(user_id);
                }
            }

            Action::ResetAccessRemoval(user_id) => {
                if let Some(tracker) = &self.tracker {
                    tracker.reset_access_removal(user_id);
                }
            }

            Action::ResetTeamLoad(project_id) => {
                if let Some(tracker) = &self.tracker {
                    tracker.reset_collaborator_load(project_id);
                }
            }

            // ── Deployment intents ────────────────────────────────
            Action::OpenDeployPanel(run_id) => {
                let run_id = run_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.open_deploy_panel(run_id).await;
                });
            }

            Action::CloseDeployPanel(run_id) => {
                let run_id = run_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.close_deploy_panel(&run_id).await;
                });
            }

            Action::Deploy(run_id) => {
                let run_id = run_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.deploy(run_id).await;
                });
            }

            Action::ShutdownDeployment(run_id) => {
                let run_id = run_id.clone();
                self.with_tracker(move |tracker| async move {
                    tracker.shutdown_deployment(&run_id).await;
                });
            }

            // Render is handled in the main loop, not here
            Action::Render => {}
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = layout[0];
        let tab_area = layout[1];
        let status_area = layout[2];

        // Render active screen
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        // Render tab bar
        self.render_tab_bar(frame, tab_area);

        // Render status bar
        self.render_status_bar(frame, status_area);

        // Overlays draw over everything else
        if let Some(confirm) = &self.pending_confirm {
            self.render_confirm(frame, area, confirm);
        }
        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar showing all 3 screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with connection status, key hints,
    /// and the current notification.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = if self.tracker.is_some() {
            Span::styled("● connected", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("○ offline", Style::default().fg(theme::ERROR_RED))
        };

        let hints = Span::styled(" │ ? help  q quit", theme::key_hint());

        let line = Line::from(vec![Span::raw(" "), connection_indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);

        if let Some((notification, _)) = &self.notification {
            let style = match notification.level {
                NotificationLevel::Info => Style::default().fg(theme::NEON_CYAN),
                NotificationLevel::Success => Style::default().fg(theme::SUCCESS_GREEN),
                NotificationLevel::Error => Style::default().fg(theme::ERROR_RED),
            };
            let toast = Paragraph::new(Line::from(Span::styled(
                format!("{} ", notification.message),
                style,
            )))
            .alignment(Alignment::Right);
            frame.render_widget(toast, area);
        }
    }

    /// Render the confirmation dialog centered on screen.
    fn render_confirm(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 5u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog = Rect::new(area.x + x, area.y + y, width, height);

        // Clear the background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ERROR_RED));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let lines = vec![
            Line::from(Span::styled(
                format!(" {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("yes   ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("no", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 62u16.min(area.width.saturating_sub(4));
        let help_height = 24u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;

        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        // Clear the background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Navigation",
                Style::default().fg(theme::NEON_CYAN),
            )),
            Line::from(Span::styled("  ─────────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  1-3       ", theme::key_hint_key()),
                Span::styled("Jump to screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Tab       ", theme::key_hint_key()),
                Span::styled("Next screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  j/k ↑/↓   ", theme::key_hint_key()),
                Span::styled("Move up/down", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Enter     ", theme::key_hint_key()),
                Span::styled("Select / detail", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Esc       ", theme::key_hint_key()),
                Span::styled("Back / close", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Runs",
                Style::default().fg(theme::NEON_CYAN),
            )),
            Line::from(Span::styled("  ────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  h/l       ", theme::key_hint_key()),
                Span::styled("Hover marks         ", theme::key_hint()),
                Span::styled("m  ", theme::key_hint_key()),
                Span::styled("Cycle metric", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  d         ", theme::key_hint_key()),
                Span::styled("Deploy panel        ", theme::key_hint()),
                Span::styled("s  ", theme::key_hint_key()),
                Span::styled("Shut down", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Team",
                Style::default().fg(theme::NEON_CYAN),
            )),
            Line::from(Span::styled("  ────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  i         ", theme::key_hint_key()),
                Span::styled("Invite              ", theme::key_hint()),
                Span::styled("a  ", theme::key_hint_key()),
                Span::styled("Toggle access", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  o         ", theme::key_hint_key()),
                Span::styled("Transfer ownership  ", theme::key_hint()),
                Span::styled("x  ", theme::key_hint_key()),
                Span::styled("Remove", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  r         ", theme::key_hint_key()),
                Span::styled("Reload              ", theme::key_hint()),
                Span::styled("c  ", theme::key_hint_key()),
                Span::styled("Clear error", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  q         ", theme::key_hint_key()),
                Span::styled("Quit", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "                          Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
