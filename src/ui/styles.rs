use crate::domain::{Mode, NoteColor, Priority};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Info message style
pub fn info_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Category badge style
pub fn tag_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Accent color for each pomodoro mode
pub fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

/// Highlighted mode button
pub fn active_mode_style(mode: Mode) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(mode_color(mode))
        .add_modifier(Modifier::BOLD)
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

pub fn note_color(color: NoteColor) -> Color {
    match color {
        NoteColor::Gray => Color::Gray,
        NoteColor::Red => Color::Red,
        NoteColor::Blue => Color::Blue,
        NoteColor::Green => Color::Green,
        NoteColor::Yellow => Color::Yellow,
        NoteColor::Purple => Color::Magenta,
    }
}

/// Overdue task / over-budget warning style
pub fn warning_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
