//! Night-sky palette and semantic styling for the TUI, matching the
//! public showcase site's look.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const SIGNAL_YELLOW: Color = Color::Rgb(236, 201, 75); // #ecc94b
pub const SKY_BLUE: Color = Color::Rgb(74, 144, 226); // #4a90e2
pub const SUCCESS_GREEN: Color = Color::Rgb(104, 211, 145); // #68d391
pub const ERROR_RED: Color = Color::Rgb(252, 129, 129); // #fc8181
pub const WARNING_ORANGE: Color = Color::Rgb(246, 173, 85); // #f6ad55

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(203, 213, 224); // #cbd5e0
pub const MUTED_GRAY: Color = Color::Rgb(113, 128, 150); // #718096
pub const BORDER_BLUE: Color = Color::Rgb(44, 82, 130); // #2c5282
pub const BG_NIGHT: Color = Color::Rgb(4, 13, 24); // #040d18
pub const BG_PANEL: Color = Color::Rgb(13, 27, 42); // #0d1b2a

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default()
        .fg(SIGNAL_YELLOW)
        .add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(SIGNAL_YELLOW)
}

/// Border for an unfocused panel.
#[allow(dead_code)]
pub fn border_default() -> Style {
    Style::default().fg(BORDER_BLUE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(SKY_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(SIGNAL_YELLOW)
        .bg(BG_PANEL)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(SIGNAL_YELLOW)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(MUTED_GRAY)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(MUTED_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SKY_BLUE).add_modifier(Modifier::BOLD)
}

/// Empty-state placeholder text.
pub fn empty_notice() -> Style {
    Style::default().fg(MUTED_GRAY)
}
