use crate::app::AppState;
use crate::domain::{SettingField, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the pomodoro settings modal
pub fn render_settings_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::Settings {
        return;
    }

    let fields = SettingField::all();
    let modal_area = create_modal_area(area, fields.len() as u16 + 7);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let settings = app.pomodoro.settings();
    let mut lines = vec![Line::raw("")];

    for (idx, field) in fields.iter().enumerate() {
        let text = format!(
            "  {:<22}{:>20}  ",
            field.label(),
            format!("◀ {} ▶", settings.display_value(*field))
        );
        let line = if idx == app.settings_selected {
            Line::from(Span::styled(text, selected_style()))
        } else {
            Line::raw(text)
        };
        lines.push(line);
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("  Changes apply to the next countdown."));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [←/→]", modal_title_style()),
        Span::raw(" Adjust  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Close"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" ⚙ Timer Settings ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the delete confirmation modal
pub fn render_confirm_delete_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(pending) = &app.pending_delete else {
        return;
    };

    let modal_area = create_modal_area(area, 9);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw("  Delete this item?"),
        Line::raw(""),
        Line::from(Span::styled(format!("  {}", pending.label), modal_title_style())),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Delete  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Confirm Delete ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
