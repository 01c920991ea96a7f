use crate::app::{AppState, FormField};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label, value line and spacer for one field
fn field_lines(field: &FormField, editing: bool) -> Vec<Line<'static>> {
    let label = if editing {
        format!("{}: (editing)", field.label)
    } else {
        format!("{}:", field.label)
    };

    let value = if field.is_choice() {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("◀ {} ▶", field.value), modal_title_style()),
        ])
    } else {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(field.value.clone(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ])
    };

    vec![Line::raw(label), value, Line::raw("")]
}

/// Render the open input form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let height = form.fields.len() as u16 * 3 + 5;
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (idx, field) in form.fields.iter().enumerate() {
        lines.extend(field_lines(field, idx == form.editing_field));
    }

    // Instructions
    lines.push(Line::styled(
        "Tab next field  ·  ←/→ choose  ·  Enter save  ·  Esc cancel",
        hint_style(),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(form.kind.title(), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
