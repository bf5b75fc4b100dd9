//! Projects screen — the catalogue, one row per project.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use runfly_core::{AppState, Project, select};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::comm_badge;

pub struct ProjectsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    state: Arc<AppState>,
    table_state: TableState,
}

impl ProjectsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            state: Arc::new(AppState::default()),
            table_state: TableState::default(),
        }
    }

    fn send(&self, action: Action) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(action);
        }
    }

    fn len(&self) -> usize {
        self.state.projects.items.len()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn project_at(&self, idx: usize) -> Option<&Project> {
        self.state.projects.items.values().nth(idx)
    }

    fn select(&mut self, idx: usize) {
        let clamped = if self.len() == 0 {
            0
        } else {
            idx.min(self.len() - 1)
        };
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.len() == 0 {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, self.len() as isize - 1);
        self.select(next as usize);
    }
}

impl Component for ProjectsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
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
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                if self.len() > 0 {
                    self.select(self.len() - 1);
                }
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(Action::LoadProjects)),
            KeyCode::Enter => {
                let picked = self
                    .project_at(self.selected_index())
                    .map(|p| (p.id.clone(), p.author.id.clone()));
                if let Some((project_id, author_id)) = picked {
                    self.send(Action::SelectProject {
                        project_id,
                        author_id,
                    });
                    Ok(Some(Action::SwitchScreen(ScreenId::Runs)))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateChanged(snapshot) = action {
            self.state = Arc::clone(snapshot);
            if self.len() > 0 && self.selected_index() >= self.len() {
                self.select(self.len() - 1);
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.len();
        let block = Block::default()
            .title(format!(" Projects ({count}) "))
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

        let layout = Layout::vertical([
            Constraint::Length(1), // load status
            Constraint::Min(1),   // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        // Load status line
        let loading = select::projects_loading(&self.state);
        let status_line = if let Some(error) = loading.error() {
            Line::from(vec![
                comm_badge::comm_span(loading),
                Span::styled(format!(" {error}"), Style::default().fg(theme::ERROR_RED)),
                Span::styled("  r ", theme::key_hint_key()),
                Span::styled("retry", theme::key_hint()),
            ])
        } else if loading.is_requesting() {
            Line::from(vec![
                Span::raw(" "),
                comm_badge::comm_span(loading),
                Span::styled(" loading projects", Style::default().fg(theme::ELECTRIC_YELLOW)),
            ])
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(status_line), layout[0]);

        if count == 0 && !loading.is_requesting() {
            let notice = Paragraph::new("No projects yet. Press r to reload.")
                .style(Style::default().fg(theme::BORDER_GRAY))
                .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(notice, layout[1]);
        } else {
            let header = Row::new(vec![
                Cell::from("Name").style(theme::table_header()),
                Cell::from("Owner").style(theme::table_header()),
                Cell::from("Members").style(theme::table_header()),
                Cell::from("Description").style(theme::table_header()),
            ]);

            let rows: Vec<Row> = self
                .state
                .projects
                .items
                .values()
                .enumerate()
                .map(|(i, project)| {
                    let is_selected = i == self.selected_index();
                    let prefix = if is_selected { "▸ " } else { "  " };
                    let members = project.collaborators.len() + 1;
                    let description = project.description.as_deref().unwrap_or("─");

                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", project.name)).style(
                            Style::default().fg(theme::NEON_CYAN).add_modifier(
                                if is_selected {
                                    Modifier::BOLD
                                } else {
                                    Modifier::empty()
                                },
                            ),
                        ),
                        Cell::from(project.author.display_name().to_owned())
                            .style(Style::default().fg(theme::CORAL)),
                        Cell::from(members.to_string()),
                        Cell::from(description.to_owned()),
                    ])
                    .style(if is_selected {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let widths = [
                Constraint::Min(20),
                Constraint::Length(24),
                Constraint::Length(8),
                Constraint::Min(20),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());

            let mut table_state = self.table_state;
            frame.render_stateful_widget(table, layout[1], &mut table_state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("open  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Projects"
    }
}
