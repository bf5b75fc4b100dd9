//! Request-lifecycle badge — ⟳/✓/✗ with color mapping.

use ratatui::style::Style;
use ratatui::text::Span;
use runfly_core::Communication;

use crate::theme;

/// Returns a styled `Span` for one request lifecycle. Idle renders as
/// nothing so untouched rows stay clean.
pub fn comm_span(comm: &Communication) -> Span<'static> {
    match comm {
        Communication::NotRequested => Span::raw(""),
        Communication::Requesting => {
            Span::styled("⟳", Style::default().fg(theme::ELECTRIC_YELLOW))
        }
        Communication::Succeeded => Span::styled("✓", Style::default().fg(theme::SUCCESS_GREEN)),
        Communication::Failed { .. } => Span::styled("✗", Style::default().fg(theme::ERROR_RED)),
    }
}
