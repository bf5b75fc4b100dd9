//! Color palette and shared styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────

pub const BG_DARK: Color = Color::Rgb(0x10, 0x14, 0x1c);
pub const NEON_CYAN: Color = Color::Rgb(0x2d, 0xd4, 0xbf);
pub const DIM_WHITE: Color = Color::Rgb(0xc9, 0xd1, 0xd9);
pub const BORDER_GRAY: Color = Color::Rgb(0x3d, 0x44, 0x4f);
pub const SUCCESS_GREEN: Color = Color::Rgb(0x3f, 0xb9, 0x50);
pub const ERROR_RED: Color = Color::Rgb(0xf8, 0x51, 0x49);
pub const ELECTRIC_YELLOW: Color = Color::Rgb(0xd2, 0x99, 0x22);
pub const ELECTRIC_PURPLE: Color = Color::Rgb(0xa3, 0x71, 0xf7);
pub const CORAL: Color = Color::Rgb(0xff, 0x7b, 0x72);

/// Chart marks, matching the platform's web palette.
pub const MARK_INDIGO: Color = Color::Rgb(0x68, 0x63, 0xff);
pub const MARK_MINT: Color = Color::Rgb(0x5f, 0xe6, 0xc9);

// ── Shared styles ─────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(NEON_CYAN)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .bg(Color::Rgb(0x1c, 0x23, 0x30))
        .add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default()
        .fg(ELECTRIC_YELLOW)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(NEON_CYAN)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(BORDER_GRAY)
}
