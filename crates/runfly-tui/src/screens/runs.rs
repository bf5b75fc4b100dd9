//! Runs screen — metric-over-time scatter chart with hover, run
//! detail, and the deployment panel.
//!
//! The chart is a fixed 680x400 logical surface projected onto the
//! terminal cell grid; hover hit-testing happens in surface units so
//! the same geometry drives mouse and keyboard interaction.

use std::cell::Cell;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState, WhichUse};
use tokio::sync::mpsc::UnboundedSender;

use runfly_core::chart::{self, ChartModel};
use runfly_core::{AppState, DeployStatusInfo, RunId, RunRecord, routes, select};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;

pub struct RunsScreen {
    focused: bool,
    state: Arc<AppState>,
    chart: ChartModel,
    /// Metric currently plotted; `None` until the dataset names one.
    metric: Option<String>,
    /// Index into `chart.marks` of the hovered mark.
    hovered: Option<usize>,
    detail_open: bool,
    throbber: ThrobberState,
    /// Cell area the chart was last drawn into, for mouse mapping.
    chart_area: Cell<Rect>,
}

impl RunsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: Arc::new(AppState::default()),
            chart: ChartModel::derive(&[], ""),
            metric: None,
            hovered: None,
            detail_open: false,
            throbber: ThrobberState::default(),
            chart_area: Cell::new(Rect::default()),
        }
    }

    fn current_runs(&self) -> &[RunRecord] {
        match self.state.projects.selected.as_ref() {
            Some(project_id) => select::runs_of(&self.state, project_id),
            None => &[],
        }
    }

    /// Metric names across the dataset, in first-seen order.
    fn metric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for run in self.current_runs() {
            for name in run.metric_names() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_owned());
                }
            }
        }
        names
    }

    /// Re-derive the chart from the current snapshot and metric. Falls
    /// back to the dataset's first metric when the chosen one is gone.
    fn refresh_chart(&mut self) {
        let names = self.metric_names();
        if self.metric.as_ref().is_none_or(|m| !names.contains(m)) {
            self.metric = names.first().cloned();
        }

        let model = match (self.state.projects.selected.as_ref(), self.metric.as_deref()) {
            (Some(project_id), Some(metric)) => {
                ChartModel::derive(select::runs_of(&self.state, project_id), metric)
            }
            _ => ChartModel::derive(&[], ""),
        };
        self.hovered = self.hovered.filter(|&i| i < model.marks.len());
        self.chart = model;
    }

    fn cycle_metric(&mut self) {
        let names = self.metric_names();
        if names.is_empty() {
            return;
        }
        let next = match self.metric.as_deref().and_then(|m| {
            names.iter().position(|n| n == m)
        }) {
            Some(idx) => names[(idx + 1) % names.len()].clone(),
            None => names[0].clone(),
        };
        self.metric = Some(next);
        self.refresh_chart();
    }

    fn move_hover(&mut self, delta: isize) {
        let len = self.chart.marks.len();
        if len == 0 {
            self.hovered = None;
            return;
        }
        let next = match self.hovered {
            None => {
                if delta >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        };
        self.hovered = Some(next);
    }

    fn hovered_run(&self) -> Option<&RunRecord> {
        let mark = self.chart.marks.get(self.hovered?)?;
        self.current_runs().get(mark.run_index)
    }

    fn run_name(&self, run_id: &RunId) -> String {
        self.current_runs()
            .iter()
            .find(|r| &r.id == run_id)
            .map_or_else(|| run_id.to_string(), |r| r.name.clone())
    }

    /// The run whose deploy panel is open, if any.
    fn active_panel_run(&self) -> Option<RunId> {
        select::active_run(&self.state).cloned()
    }

    fn panel_status(&self) -> Option<&DeployStatusInfo> {
        select::active_deploy_status(&self.state)
    }

    /// Map a terminal cell to a chart surface point plus a hit radius
    /// never smaller than one cell.
    fn surface_point(&self, column: u16, row: u16) -> Option<(f64, f64, f64)> {
        let area = self.chart_area.get();
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let dx = column.checked_sub(area.x)?;
        let dy = row.checked_sub(area.y)?;
        if dx >= area.width || dy >= area.height {
            return None;
        }
        let x = (f64::from(dx) + 0.5) / f64::from(area.width) * chart::WIDTH;
        let y = (f64::from(dy) + 0.5) / f64::from(area.height) * chart::HEIGHT;
        let cell = (chart::WIDTH / f64::from(area.width))
            .max(chart::HEIGHT / f64::from(area.height));
        Some((x, y, chart::MARK_RADIUS.max(cell)))
    }

    fn mark_at(&self, column: u16, row: u16) -> Option<usize> {
        let (x, y, radius) = self.surface_point(column, row)?;
        let hit = self.chart.hit_test(x, y, radius)?;
        self.chart.marks.iter().position(|m| m.run_index == hit.run_index)
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let total = self.current_runs().len();
        let plotted = self.chart.marks.len();
        let metric = self.metric.as_deref().unwrap_or("(no metric)");

        let mut spans = vec![
            Span::styled(" Metric: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(metric.to_owned(), Style::default().fg(theme::NEON_CYAN)),
            Span::styled(
                format!("  ·  {plotted}/{total} runs plotted"),
                Style::default().fg(theme::DIM_WHITE),
            ),
        ];

        if let Some(project_id) = self.state.projects.selected.as_ref() {
            let loading = select::runs_loading(&self.state, project_id);
            if loading.is_requesting() {
                spans.push(Span::styled(
                    "  ⟳ loading runs",
                    Style::default().fg(theme::ELECTRIC_YELLOW),
                ));
            } else if let Some(error) = loading.error() {
                spans.push(Span::styled(
                    format!("  ✗ {error}"),
                    Style::default().fg(theme::ERROR_RED),
                ));
            }
        }

        if let Some(run) = self.hovered_run() {
            let date = fmt::fmt_date(run.date_created);
            spans.push(Span::styled(
                format!("  ·  {} · {date}", run.name),
                Style::default().fg(theme::MARK_MINT),
            ));
            if let Some(value) = self.metric.as_deref().and_then(|m| run.metric_value(m)) {
                let value = fmt::fmt_metric(value);
                spans.push(Span::styled(
                    format!(" · {value}"),
                    Style::default().fg(theme::MARK_MINT),
                ));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        self.chart_area.set(area);

        if self.chart.is_empty() {
            let y_offset = area.height.saturating_sub(1) / 2;
            let centered = Rect {
                x: area.x,
                y: area.y + y_offset,
                width: area.width,
                height: 1.min(area.height),
            };
            let notice = Paragraph::new("data not available")
                .style(Style::default().fg(theme::BORDER_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(notice, centered);
            return;
        }

        // Canvas y grows upward; surface y grows downward.
        let marks: Vec<(f64, f64)> = self
            .chart
            .marks
            .iter()
            .map(|m| (m.cx, chart::HEIGHT - m.cy))
            .collect();
        let hovered = self.hovered.and_then(|i| self.chart.marks.get(i));

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, chart::WIDTH])
            .y_bounds([0.0, chart::HEIGHT])
            .paint(|ctx| {
                self.paint_axes(ctx);
                for &(x, y) in &marks {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: chart::MARK_RADIUS,
                        color: theme::MARK_INDIGO,
                    });
                }
                ctx.draw(&Points {
                    coords: &marks,
                    color: theme::MARK_INDIGO,
                });
                if let Some(mark) = hovered {
                    ctx.draw(&Circle {
                        x: mark.cx,
                        y: chart::HEIGHT - mark.cy,
                        radius: chart::MARK_RADIUS_HOVER,
                        color: theme::MARK_MINT,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }

    fn paint_axes(&self, ctx: &mut Context<'_>) {
        let (x0, x1) = chart::X_RANGE;
        let y_bottom = chart::HEIGHT - chart::Y_RANGE.0;
        let y_top = chart::HEIGHT - chart::Y_RANGE.1;

        ctx.draw(&CanvasLine {
            x1: x0,
            y1: y_bottom,
            x2: x1,
            y2: y_bottom,
            color: theme::BORDER_GRAY,
        });
        ctx.draw(&CanvasLine {
            x1: x0,
            y1: y_bottom,
            x2: x0,
            y2: y_top,
            color: theme::BORDER_GRAY,
        });

        if let Some(x_scale) = &self.chart.x_scale {
            for tick in x_scale.ticks(chart::X_TICKS, chart::X_TICK_FORMAT) {
                ctx.draw(&CanvasLine {
                    x1: tick.position,
                    y1: y_bottom,
                    x2: tick.position,
                    y2: y_bottom - 6.0,
                    color: theme::BORDER_GRAY,
                });
                // Keep the last label inside the surface.
                let label_x = tick.position.min(chart::WIDTH - 95.0);
                ctx.print(
                    label_x,
                    y_bottom - 24.0,
                    Line::styled(tick.label, Style::default().fg(theme::DIM_WHITE)),
                );
            }
        }

        if let Some(y_scale) = &self.chart.y_scale {
            for tick in y_scale.ticks(chart::Y_TICKS) {
                let y = chart::HEIGHT - tick.position;
                ctx.draw(&CanvasLine {
                    x1: x0,
                    y1: y,
                    x2: x1,
                    y2: y,
                    color: theme::BORDER_GRAY,
                });
                ctx.print(
                    4.0,
                    y,
                    Line::styled(tick.label, Style::default().fg(theme::DIM_WHITE)),
                );
            }
        }

        // Axis titles: time along the bottom, the metric up the side.
        ctx.print(
            chart::WIDTH / 2.0 - 40.0,
            y_bottom - 44.0,
            Line::styled("Time Range", Style::default().fg(theme::DIM_WHITE)),
        );
        ctx.print(
            4.0,
            y_top + 16.0,
            Line::styled(
                self.chart.metric.clone(),
                Style::default().fg(theme::DIM_WHITE),
            ),
        );
    }

    fn render_deploy_panel(&self, frame: &mut Frame, area: Rect, run_id: &RunId) {
        let name = self.run_name(run_id);
        let block = Block::default()
            .title(format!(" Deploy · {name} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),   // status content
            Constraint::Length(1), // hints
        ])
        .split(inner);
        let content = layout[0];
        let first_row = Rect {
            height: 1.min(content.height),
            ..content
        };

        let mut hint_spans = vec![Span::raw("  ")];
        match self.panel_status() {
            None => {
                self.render_spinner(frame, first_row, "checking deployment status");
            }
            Some(DeployStatusInfo::Deploying) => {
                self.render_spinner(frame, first_row, "deploying, polling status");
                hint_spans.push(Span::styled("Esc ", theme::key_hint_key()));
                hint_spans.push(Span::styled(
                    "close (the server keeps deploying)",
                    theme::key_hint(),
                ));
            }
            Some(DeployStatusInfo::NotDeployed { error: None }) => {
                let lines = vec![
                    Line::from(Span::styled(
                        " ○ Not deployed",
                        Style::default().fg(theme::DIM_WHITE),
                    )),
                    Line::from(Span::styled(
                        "   Deploy this model to get a prediction endpoint.",
                        Style::default().fg(theme::BORDER_GRAY),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines), content);
                hint_spans.push(Span::styled("d ", theme::key_hint_key()));
                hint_spans.push(Span::styled("deploy  ", theme::key_hint()));
                hint_spans.push(Span::styled("Esc ", theme::key_hint_key()));
                hint_spans.push(Span::styled("close", theme::key_hint()));
            }
            Some(DeployStatusInfo::NotDeployed { error: Some(error) }) => {
                let lines = vec![
                    Line::from(Span::styled(
                        " ✗ Deployment failed",
                        Style::default()
                            .fg(theme::ERROR_RED)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("   {error}"),
                        Style::default().fg(theme::ERROR_RED),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines), content);
                hint_spans.push(Span::styled("d ", theme::key_hint_key()));
                hint_spans.push(Span::styled("retry  ", theme::key_hint()));
                hint_spans.push(Span::styled("Esc ", theme::key_hint_key()));
                hint_spans.push(Span::styled("close", theme::key_hint()));
            }
            Some(DeployStatusInfo::Deployed { meta }) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        " ● Live",
                        Style::default()
                            .fg(theme::SUCCESS_GREEN)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled("   Endpoint  ", Style::default().fg(theme::DIM_WHITE)),
                        Span::styled(meta.endpoint.clone(), Style::default().fg(theme::NEON_CYAN)),
                    ]),
                ];
                if let Some(token) = &meta.token {
                    lines.push(Line::from(vec![
                        Span::styled("   Token     ", Style::default().fg(theme::DIM_WHITE)),
                        Span::styled(token.clone(), Style::default().fg(theme::CORAL)),
                    ]));
                }
                let shutdown = select::shutdown(&self.state, run_id);
                if shutdown.is_requesting() {
                    lines.push(Line::from(Span::styled(
                        "   ⟳ shutting down",
                        Style::default().fg(theme::ELECTRIC_YELLOW),
                    )));
                } else if let Some(error) = shutdown.error() {
                    lines.push(Line::from(Span::styled(
                        format!("   ✗ {error}"),
                        Style::default().fg(theme::ERROR_RED),
                    )));
                }
                frame.render_widget(Paragraph::new(lines), content);
                hint_spans.push(Span::styled("s ", theme::key_hint_key()));
                hint_spans.push(Span::styled("shut down  ", theme::key_hint()));
                hint_spans.push(Span::styled("Esc ", theme::key_hint_key()));
                hint_spans.push(Span::styled("close", theme::key_hint()));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(hint_spans)), layout[1]);
    }

    fn render_spinner(&self, frame: &mut Frame, area: Rect, label: &str) {
        let throbber = Throbber::default()
            .label(format!(" {label}"))
            .style(Style::default().fg(theme::ELECTRIC_YELLOW))
            .throbber_style(Style::default().fg(theme::ELECTRIC_YELLOW))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        let mut spin = self.throbber.clone();
        frame.render_stateful_widget(throbber, area, &mut spin);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, run: &RunRecord) {
        let needed = 9 + run.metrics.len() + run.hyperparameters.len();
        let height = u16::try_from(needed)
            .unwrap_or(u16::MAX)
            .min(area.height.saturating_sub(2));
        let width = 58u16.min(area.width.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let modal = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            modal,
        );
        let block = Block::default()
            .title(format!(" {} ", run.name))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let date = fmt::fmt_date(run.date_created);
        let path = routes::run_record_path(&run.project_id, &run.id);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" Created  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(date, Style::default().fg(theme::NEON_CYAN)),
            ]),
            Line::from(vec![
                Span::styled(" Path     ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(path, Style::default().fg(theme::CORAL)),
            ]),
            Line::from(""),
            Line::from(Span::styled(" Metrics", theme::table_header())),
        ];
        for kv in &run.metrics {
            let key = &kv.key;
            let value = fmt::fmt_value(&kv.value);
            lines.push(Line::from(Span::styled(
                format!("   {key:<18}{value}"),
                Style::default().fg(theme::DIM_WHITE),
            )));
        }
        lines.push(Line::from(Span::styled(
            " Hyperparameters",
            theme::table_header(),
        )));
        for kv in &run.hyperparameters {
            let key = &kv.key;
            let value = fmt::fmt_value(&kv.value);
            lines.push(Line::from(Span::styled(
                format!("   {key:<18}{value}"),
                Style::default().fg(theme::DIM_WHITE),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Esc ", theme::key_hint_key()),
            Span::styled("close  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("deploy panel", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for RunsScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open {
            return match key.code {
                KeyCode::Esc => {
                    self.detail_open = false;
                    Ok(None)
                }
                KeyCode::Char('d') => {
                    self.detail_open = false;
                    let run_id = self.hovered_run().map(|r| r.id.clone());
                    Ok(run_id.map(Action::OpenDeployPanel))
                }
                _ => Ok(None),
            };
        }

        if let Some(run_id) = self.active_panel_run() {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseDeployPanel(run_id))),
                KeyCode::Char('d') => {
                    // Deploy only from idle or failed; a live or pending
                    // deployment is never restarted from here.
                    if matches!(
                        self.panel_status(),
                        None | Some(DeployStatusInfo::NotDeployed { .. })
                    ) {
                        Ok(Some(Action::Deploy(run_id)))
                    } else {
                        Ok(None)
                    }
                }
                KeyCode::Char('s') => {
                    if matches!(self.panel_status(), Some(DeployStatusInfo::Deployed { .. })) {
                        let name = self.run_name(&run_id);
                        Ok(Some(Action::ShowConfirm(ConfirmAction::ShutdownDeployment {
                            run_id,
                            name,
                        })))
                    } else {
                        Ok(None)
                    }
                }
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('h' | 'k') | KeyCode::Left | KeyCode::Up => {
                self.move_hover(-1);
                Ok(None)
            }
            KeyCode::Char('l' | 'j') | KeyCode::Right | KeyCode::Down => {
                self.move_hover(1);
                Ok(None)
            }
            KeyCode::Char('m') => {
                self.cycle_metric();
                Ok(None)
            }
            KeyCode::Char('r') => {
                let project_id = self.state.projects.selected.clone();
                Ok(project_id.map(Action::LoadRuns))
            }
            KeyCode::Enter => {
                if self.hovered_run().is_some() {
                    self.detail_open = true;
                }
                Ok(None)
            }
            KeyCode::Char('d') => {
                let run_id = self.hovered_run().map(|r| r.id.clone());
                Ok(run_id.map(Action::OpenDeployPanel))
            }
            _ => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.detail_open || self.active_panel_run().is_some() {
            return Ok(None);
        }
        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(idx) = self.mark_at(mouse.column, mouse.row) {
                    self.hovered = Some(idx);
                }
                Ok(None)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = self.mark_at(mouse.column, mouse.row) {
                    self.hovered = Some(idx);
                    self.detail_open = true;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn captures_input(&self) -> bool {
        self.detail_open || self.active_panel_run().is_some()
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StateChanged(snapshot) => {
                self.state = Arc::clone(snapshot);
                self.refresh_chart();
            }
            Action::Tick => {
                self.throbber.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match select::selected_project(&self.state) {
            Some(project) => format!(" Runs · {} ", project.name),
            None => " Runs ".to_owned(),
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

        if self.state.projects.selected.is_none() {
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
        }

        let layout = Layout::vertical([
            Constraint::Length(1), // status line
            Constraint::Min(1),   // chart (and deploy panel)
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_status(frame, layout[0]);

        let panel_run = self.active_panel_run();
        let (chart_rect, panel_rect) = if panel_run.is_some() {
            let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(8)])
                .split(layout[1]);
            (chunks[0], Some(chunks[1]))
        } else {
            (layout[1], None)
        };

        self.render_chart(frame, chart_rect);
        if let (Some(rect), Some(run_id)) = (panel_rect, panel_run.as_ref()) {
            self.render_deploy_panel(frame, rect, run_id);
        }

        let hints = Line::from(vec![
            Span::styled("  h/l ", theme::key_hint_key()),
            Span::styled("hover  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail  ", theme::key_hint()),
            Span::styled("m ", theme::key_hint_key()),
            Span::styled("metric  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("deploy  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        if self.detail_open {
            if let Some(run) = self.hovered_run() {
                self.render_detail(frame, inner, run);
            }
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Runs"
    }
}
