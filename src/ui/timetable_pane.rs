use crate::app::AppState;
use crate::domain::timetable::{classes_in_slot, slot_label, SLOT_HOURS};
use crate::domain::{ClassDay, ClassEvent, NoteColor};
use crate::ui::layout::split_main_side;
use crate::ui::styles::{
    border_style, hint_style, note_color, selected_style, tag_style, title_style,
};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Row, Table},
    Frame,
};

const TIME_COLUMN_WIDTH: u16 = 9;

/// What one grid cell shows: the title in a class's first slot, a bar in the
/// slots it continues through. Overlapping classes are counted after the title.
fn slot_text(classes: &[ClassEvent], day: ClassDay, hour: u8) -> Option<(String, NoteColor)> {
    let in_slot = classes_in_slot(classes, day, hour);
    let class = in_slot.first()?;

    let text = if class.start_hour == hour {
        match in_slot.len() {
            1 => class.title.clone(),
            n => format!("{} +{}", class.title, n - 1),
        }
    } else {
        "┃".to_string()
    };
    Some((text, class.color))
}

fn slot_cell(classes: &[ClassEvent], day: ClassDay, hour: u8) -> Cell<'static> {
    match slot_text(classes, day, hour) {
        Some((text, color)) => {
            let mut style = Style::default().fg(note_color(color));
            if !text.starts_with('┃') {
                style = style.add_modifier(Modifier::BOLD);
            }
            Cell::from(Span::styled(text, style))
        }
        None => Cell::from(""),
    }
}

fn create_class_item(class: &ClassEvent) -> ListItem<'static> {
    let marker = Style::default().fg(note_color(class.color));
    let header = Line::from(vec![
        Span::styled("▌ ", marker),
        Span::styled(class.title.clone(), title_style()),
    ]);
    let mut detail = vec![
        Span::styled("▌ ", marker),
        Span::styled(format!("{} ", class.day.short_name()), tag_style()),
        Span::styled(class.time_range(), hint_style()),
    ];
    if !class.location.is_empty() {
        detail.push(Span::styled(format!(" · {}", class.location), hint_style()));
    }
    ListItem::new(vec![header, Line::from(detail)])
}

/// Render the Timetable tab: weekly grid on the left, class list on the right
pub fn render_timetable_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let (grid_area, list_area) = split_main_side(area, 65);
    let classes = app.timetable.items();

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(ClassDay::all().iter().map(|day| Cell::from(day.short_name()))),
    )
    .style(title_style());

    let rows: Vec<Row> = SLOT_HOURS
        .map(|hour| {
            let mut cells = vec![Cell::from(Span::styled(slot_label(hour), hint_style()))];
            cells.extend(
                ClassDay::all()
                    .iter()
                    .map(|day| slot_cell(classes, *day, hour)),
            );
            Row::new(cells)
        })
        .collect();

    let day_count = ClassDay::all().len() as u32;
    let mut widths = vec![Constraint::Length(TIME_COLUMN_WIDTH)];
    widths.extend(ClassDay::all().iter().map(|_| Constraint::Ratio(1, day_count)));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Weekly Schedule ", title_style())),
    );
    f.render_widget(table, grid_area);

    let visible = app.visible_classes();
    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(Line::styled(
            "  No classes added yet. Press 'a' to add one.",
            hint_style(),
        ))]
    } else {
        visible.iter().map(|class| create_class_item(class)).collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(
                    format!(" Your Classes ({}) ", visible.len()),
                    title_style(),
                )),
        )
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.class_selected));
    }
    f.render_stateful_widget(list, list_area, &mut state);
}
