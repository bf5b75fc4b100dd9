//! Team screen — the selected project's roster and every collaboration
//! workflow: invite, access toggle, removal, ownership transfer.
//!
//! Workflow outcomes are detected by comparing consecutive snapshots;
//! a lifecycle that moves from requesting to succeeded produces a
//! notification and an immediate reset, so the badge column only ever
//! shows in-flight and failed states.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use runfly_core::{AppState, Collaborator, Communication, Project, UserAccess, select};

use crate::action::{Action, ConfirmAction, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::comm_badge;

pub struct TeamScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    state: Arc<AppState>,
    /// Previous snapshot, kept to detect lifecycle transitions.
    prev: Arc<AppState>,
    table_state: ratatui::widgets::TableState,
    invite_open: bool,
    invite_email: Input,
    invite_access: UserAccess,
}

impl TeamScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            state: Arc::new(AppState::default()),
            prev: Arc::new(AppState::default()),
            table_state: ratatui::widgets::TableState::default().with_selected(0),
            invite_open: false,
            invite_email: Input::default(),
            invite_access: UserAccess::ReadWrite,
        }
    }

    fn send(&self, action: Action) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(action);
        }
    }

    fn notify_and(&self, notification: Notification, follow_up: Action) {
        self.send(Action::Notify(notification));
        self.send(follow_up);
    }

    fn project(&self) -> Option<&Project> {
        select::selected_project(&self.state)
    }

    /// Owner row plus one row per collaborator.
    fn member_count(&self) -> usize {
        self.project().map_or(0, |p| 1 + p.collaborators.len())
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// The collaborator on the selected row. The owner row (index 0)
    /// reads as `None`; the owner is never edited in place.
    fn selected_collaborator(&self) -> Option<&Collaborator> {
        let index = self.selected_index();
        if index == 0 {
            return None;
        }
        self.project()?.collaborators.values().nth(index - 1)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.member_count();
        if len == 0 {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Fold a new snapshot in: fire notifications and resets for every
    /// lifecycle that just succeeded, then clamp the selection.
    fn apply_snapshot(&mut self, next: &Arc<AppState>) {
        let prev = Arc::clone(&self.prev);

        if select::invitation(&prev).is_requesting() && select::invitation(next).is_succeeded() {
            self.invite_open = false;
            self.invite_email.reset();
            self.notify_and(
                Notification::success("Invitation sent"),
                Action::ResetInvitation,
            );
        }

        if select::owner_change(&prev).is_requesting() && select::owner_change(next).is_succeeded()
        {
            self.notify_and(
                Notification::success("Ownership transferred"),
                Action::ResetOwnerChange,
            );
        }

        for (user_id, comm) in &next.collaboration.changing_access {
            if comm.is_succeeded() && select::access_change(&prev, user_id).is_requesting() {
                self.notify_and(
                    Notification::success("Access updated"),
                    Action::ResetAccessChange(user_id.clone()),
                );
            }
        }

        for (user_id, comm) in &next.collaboration.removing_access {
            if comm.is_succeeded() && select::access_removal(&prev, user_id).is_requesting() {
                self.notify_and(
                    Notification::success("Collaborator removed"),
                    Action::ResetAccessRemoval(user_id.clone()),
                );
            }
        }

        self.prev = Arc::clone(next);
        self.state = Arc::clone(next);

        let len = self.member_count();
        if len > 0 && self.selected_index() >= len {
            self.table_state.select(Some(len - 1));
        }
    }

    fn handle_invite_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => {
                self.invite_open = false;
                self.invite_email.reset();
                Ok(Some(Action::ResetInvitation))
            }
            KeyCode::Tab => {
                self.invite_access = self.invite_access.toggled();
                Ok(None)
            }
            KeyCode::Enter => {
                let email = self.invite_email.value().trim().to_owned();
                let project_id = self.project().map(|p| p.id.clone());
                match project_id {
                    Some(project_id) if !email.is_empty() && email.contains('@') => {
                        // Form stays open; the success transition closes it.
                        Ok(Some(Action::InviteCollaborator {
                            project_id,
                            email,
                            access: self.invite_access,
                        }))
                    }
                    _ => Ok(None),
                }
            }
            _ => {
                let _ = self
                    .invite_email
                    .handle_event(&CrosstermEvent::Key(key));
                Ok(None)
            }
        }
    }

    /// Reset the first failed lifecycle the selection points at, falling
    /// back to a failed roster load.
    fn clear_failed(&self) -> Option<Action> {
        if let Some(collaborator) = self.selected_collaborator() {
            let user_id = &collaborator.user.id;
            if select::access_removal(&self.state, user_id).is_failed() {
                return Some(Action::ResetAccessRemoval(user_id.clone()));
            }
            if select::access_change(&self.state, user_id).is_failed() {
                return Some(Action::ResetAccessChange(user_id.clone()));
            }
        }
        let project = self.project()?;
        if select::collaborator_load(&self.state, &project.id).is_failed() {
            return Some(Action::ResetTeamLoad(project.id.clone()));
        }
        None
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render_status(&self, frame: &mut Frame, area: Rect, project: &Project) {
        let mut spans: Vec<Span> = Vec::new();

        let roster = select::collaborator_load(&self.state, &project.id);
        if roster.is_requesting() {
            spans.push(Span::styled(
                " ⟳ loading team",
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        } else if let Some(error) = roster.error() {
            spans.push(Span::styled(
                format!(" ✗ {error}"),
                Style::default().fg(theme::ERROR_RED),
            ));
            spans.push(Span::styled("  r ", theme::key_hint_key()));
            spans.push(Span::styled("retry  ", theme::key_hint()));
            spans.push(Span::styled("c ", theme::key_hint_key()));
            spans.push(Span::styled("dismiss", theme::key_hint()));
        }

        if let Some(collaborator) = self.selected_collaborator() {
            let user_id = &collaborator.user.id;
            let removal = select::access_removal(&self.state, user_id);
            let change = select::access_change(&self.state, user_id);
            if let Some(error) = removal.error().or_else(|| change.error()) {
                spans.push(Span::styled(
                    format!("  ✗ {error}"),
                    Style::default().fg(theme::ERROR_RED),
                ));
                spans.push(Span::styled("  c ", theme::key_hint_key()));
                spans.push(Span::styled("clear", theme::key_hint()));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, project: &Project) {
        let header = Row::new([
            Cell::from("Member").style(theme::table_header()),
            Cell::from("Email").style(theme::table_header()),
            Cell::from("Access").style(theme::table_header()),
            Cell::from("").style(theme::table_header()),
        ]);

        let mut rows: Vec<Row> = Vec::with_capacity(self.member_count());
        rows.push(Row::new([
            Cell::from(format!("▸ {}", project.author.display_name()))
                .style(Style::default().fg(theme::ELECTRIC_PURPLE)),
            Cell::from(project.author.email.clone())
                .style(Style::default().fg(theme::CORAL)),
            Cell::from(UserAccess::Owner.to_string())
                .style(Style::default().fg(theme::ELECTRIC_PURPLE)),
            Cell::from(""),
        ]));

        for collaborator in project.collaborators.values() {
            let user_id = &collaborator.user.id;
            let removal = select::access_removal(&self.state, user_id);
            let change = select::access_change(&self.state, user_id);
            // Removal is the more drastic lifecycle; its badge wins.
            let badge = if matches!(removal, Communication::NotRequested) {
                comm_badge::comm_span(change)
            } else {
                comm_badge::comm_span(removal)
            };

            rows.push(Row::new([
                Cell::from(format!("  {}", collaborator.user.display_name()))
                    .style(Style::default().fg(theme::NEON_CYAN)),
                Cell::from(collaborator.user.email.clone())
                    .style(Style::default().fg(theme::CORAL)),
                Cell::from(collaborator.access.to_string())
                    .style(Style::default().fg(theme::DIM_WHITE)),
                Cell::from(badge),
            ]));
        }

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Min(26),
                Constraint::Length(14),
                Constraint::Length(2),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected());

        let mut table_state = self.table_state;
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_invite_modal(&self, frame: &mut Frame, area: Rect) {
        let width = 54u16.min(area.width.saturating_sub(4));
        let height = 8u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let modal = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            modal,
        );
        let block = Block::default()
            .title(" Invite collaborator ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let access = self.invite_access.to_string();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" Email   ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    self.invite_email.value().to_owned(),
                    Style::default().fg(theme::NEON_CYAN),
                ),
                Span::styled("█", Style::default().fg(theme::NEON_CYAN)),
            ]),
            Line::from(vec![
                Span::styled(" Access  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(access, Style::default().fg(theme::ELECTRIC_PURPLE)),
                Span::styled("   (Tab switches)", Style::default().fg(theme::BORDER_GRAY)),
            ]),
            Line::from(""),
        ];

        let invitation = select::invitation(&self.state);
        if invitation.is_requesting() {
            lines.push(Line::from(Span::styled(
                " ⟳ sending invitation",
                Style::default().fg(theme::ELECTRIC_YELLOW),
            )));
        } else if let Some(error) = invitation.error() {
            lines.push(Line::from(Span::styled(
                format!(" ✗ {error}"),
                Style::default().fg(theme::ERROR_RED),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", theme::key_hint_key()),
            Span::styled("send  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for TeamScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.invite_open {
            return self.handle_invite_key(key);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.table_state.select(Some(0));
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.member_count();
                if len > 0 {
                    self.table_state.select(Some(len - 1));
                }
                Ok(None)
            }
            KeyCode::Char('i') => {
                if self.project().is_some() {
                    self.invite_open = true;
                }
                Ok(None)
            }
            KeyCode::Char('a') => {
                let intent = self.project().and_then(|project| {
                    let collaborator = self.selected_collaborator()?;
                    Some(Action::ChangeAccess {
                        project_id: project.id.clone(),
                        user: collaborator.user.clone(),
                        access: collaborator.access.toggled(),
                    })
                });
                Ok(intent)
            }
            KeyCode::Char('x') => {
                let confirm = self.project().and_then(|project| {
                    let collaborator = self.selected_collaborator()?;
                    Some(Action::ShowConfirm(ConfirmAction::RemoveCollaborator {
                        project_id: project.id.clone(),
                        user_id: collaborator.user.id.clone(),
                        name: collaborator.user.display_name().to_owned(),
                    }))
                });
                Ok(confirm)
            }
            KeyCode::Char('o') => {
                let confirm = self.project().and_then(|project| {
                    let collaborator = self.selected_collaborator()?;
                    Some(Action::ShowConfirm(ConfirmAction::TransferOwnership {
                        project_id: project.id.clone(),
                        email: collaborator.user.email.clone(),
                        name: collaborator.user.display_name().to_owned(),
                    }))
                });
                Ok(confirm)
            }
            KeyCode::Char('r') => {
                let reload = self.project().map(|project| Action::LoadTeam {
                    project_id: project.id.clone(),
                    author_id: project.author.id.clone(),
                });
                Ok(reload)
            }
            KeyCode::Char('c') => Ok(self.clear_failed()),
            _ => Ok(None),
        }
    }

    fn captures_input(&self) -> bool {
        self.invite_open
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateChanged(snapshot) = action {
            self.apply_snapshot(snapshot);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.project() {
            Some(project) => format!(" Team · {} ({}) ", project.name, self.member_count()),
            None => " Team ".to_owned(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(project) = self.project() else {
            let y_offset = inner.height.saturating_sub(1) / 2;
            let centered = Rect {
                x: inner.x,
                y: inner.y + y_offset,
                width: inner.width,
                height: 1.min(inner.height),
            };
            let notice = Paragraph::new("Select a project first (press 1).")
                .style(Style::default().fg(theme::BORDER_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(notice, centered);
            return;
        };

        let layout = Layout::vertical([
            Constraint::Length(1), // lifecycle status
            Constraint::Min(1),   // roster table
            Constraint::Length(1), // key hints
        ])
        .split(inner);

        self.render_status(frame, layout[0], project);
        self.render_table(frame, layout[1], project);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("i ", theme::key_hint_key()),
            Span::styled("invite  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("access  ", theme::key_hint()),
            Span::styled("o ", theme::key_hint_key()),
            Span::styled("owner  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("remove  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        if self.invite_open {
            self.render_invite_modal(frame, inner);
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Team"
    }
}
