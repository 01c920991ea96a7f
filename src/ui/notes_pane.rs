use crate::app::AppState;
use crate::domain::{Note, UiMode};
use crate::ui::layout::split_main_side;
use crate::ui::styles::{
    border_style, hint_style, modal_title_style, note_color, selected_style, tag_style,
    title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const PREVIEW_CHARS: usize = 40;

fn create_note_item(note: &Note) -> ListItem<'static> {
    let marker = Style::default().fg(note_color(note.color));
    let header = Line::from(vec![
        Span::styled("▌ ", marker),
        Span::styled(note.title.clone(), title_style()),
        Span::styled(format!("  [{}]", note.category.name()), tag_style()),
    ]);
    let detail = Line::from(vec![
        Span::styled("▌ ", marker),
        Span::styled(note.preview(PREVIEW_CHARS), hint_style()),
    ]);
    ListItem::new(vec![header, detail])
}

/// Render the Notes tab: search bar, note list, selected note content
pub fn render_notes_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_bar(f, app, chunks[0]);

    let (list_area, content_area) = split_main_side(chunks[1], 45);
    let visible = app.visible_notes();

    let items: Vec<ListItem> = if visible.is_empty() {
        let message = if app.notes.is_empty() {
            "  No notes yet. Press 'a' to create one."
        } else {
            "  No notes match."
        };
        vec![ListItem::new(Line::styled(message, hint_style()))]
    } else {
        visible.iter().map(|note| create_note_item(note)).collect()
    };

    let category = app
        .note_category
        .map(|c| c.name())
        .unwrap_or("All");
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(
                    format!(" Notes ({}) · {} ", visible.len(), category),
                    title_style(),
                )),
        )
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.note_selected));
    }
    f.render_stateful_widget(list, list_area, &mut state);

    let content = match app.selected_note() {
        Some(note) => {
            let mut lines = vec![
                Line::styled(
                    format!(
                        "{} · edited {}",
                        note.category.name(),
                        note.updated_at.format("%Y-%m-%d %H:%M")
                    ),
                    hint_style(),
                ),
                Line::raw(""),
            ];
            lines.extend(note.content.lines().map(|l| Line::raw(l.to_string())));
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(note_color(note.color)))
                        .title(Span::styled(format!(" {} ", note.title), title_style())),
                )
                .wrap(Wrap { trim: false })
        }
        None => Paragraph::new("").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        ),
    };
    f.render_widget(content, content_area);
}

fn render_search_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let searching = app.ui_mode == UiMode::Search;
    let mut spans = vec![
        Span::raw("🔍 "),
        Span::styled(app.note_search.clone(), modal_title_style()),
    ];
    if searching {
        spans.push(Span::styled("█", modal_title_style()));
    } else if app.note_search.is_empty() {
        spans.push(Span::styled("press / to search", hint_style()));
    }

    let border = if searching {
        modal_title_style()
    } else {
        border_style()
    };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(" Search ", title_style())),
    );
    f.render_widget(paragraph, area);
}
