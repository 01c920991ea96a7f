use crate::app::AppState;
use crate::domain::pomodoro::format_focus_time;
use crate::domain::Mode;
use crate::ui::styles::{
    active_mode_style, border_style, default_style, hint_style, mode_color, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// 5-row block glyphs for the clock digits
fn glyph(c: char) -> [&'static str; 5] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => [" ", " ", " ", " ", " "],
    }
}

/// Render "MM:SS" as five rows of block characters
pub fn big_clock(text: &str) -> Vec<String> {
    (0..5)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Mode selector row; the current mode is highlighted
fn mode_buttons(current: Mode) -> Line<'static> {
    let keys = ['f', 's', 'l'];
    let mut spans = Vec::new();
    for (mode, key) in Mode::all().iter().zip(keys) {
        let label = format!(" [{}] {} ", key, mode.name());
        let style = if *mode == current {
            active_mode_style(*mode)
        } else {
            default_style()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

/// Render the Pomodoro tab
pub fn render_pomodoro_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.pomodoro;
    let accent = Style::default()
        .fg(mode_color(timer.mode()))
        .add_modifier(Modifier::BOLD);

    let title = if timer.mode().is_break() {
        " Break Time "
    } else {
        " Focus Timer "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Mode buttons
            Constraint::Length(1),
            Constraint::Length(5), // Clock
            Constraint::Length(1), // Running state
            Constraint::Length(1),
            Constraint::Length(1), // Progress gauge
            Constraint::Length(1),
            Constraint::Length(3), // Stats
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(mode_buttons(timer.mode())).alignment(Alignment::Center),
        chunks[1],
    );

    let clock: Vec<Line> = big_clock(&timer.formatted_time())
        .into_iter()
        .map(|row| Line::from(Span::styled(row, accent)))
        .collect();
    f.render_widget(Paragraph::new(clock).alignment(Alignment::Center), chunks[3]);

    let state = if timer.is_active() {
        Span::styled("● Running", accent)
    } else {
        Span::styled("⏸ Paused (Space to start)", hint_style())
    };
    f.render_widget(
        Paragraph::new(Line::from(state)).alignment(Alignment::Center),
        chunks[4],
    );

    // Gauge is inset so it lines up under the clock
    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(chunks[6])[1];
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(mode_color(timer.mode())))
        .ratio(timer.progress_ratio().clamp(0.0, 1.0))
        .label(format!("{:.0}%", timer.progress_ratio() * 100.0));
    f.render_widget(gauge, gauge_area);

    let stats = vec![
        Line::from(vec![
            Span::raw("Completed pomodoros: "),
            Span::styled(timer.completed_work_sessions().to_string(), title_style()),
        ]),
        Line::from(vec![
            Span::raw("Until long break: "),
            Span::styled(timer.sessions_until_long_break().to_string(), title_style()),
        ]),
        Line::from(vec![
            Span::raw("Focus time: "),
            Span::styled(format_focus_time(timer.focused_minutes()), title_style()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(stats).alignment(Alignment::Center),
        chunks[8],
    );
}
