use crate::app::AppState;
use crate::domain::Task;
use crate::ui::layout::split_main_side;
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, priority_style, selected_style, tag_style,
    title_style, warning_style,
};
use chrono::{Local, NaiveDate};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Human label for a due date relative to today
fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    match (due - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => due.format("%b %d").to_string(),
    }
}

/// One list row: checkbox, title, priority, category, due date
fn create_task_line(task: &Task, today: NaiveDate) -> Line<'static> {
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let text_style = if task.completed {
        done_style()
    } else {
        default_style()
    };
    let due_style = if task.is_overdue(today) {
        warning_style()
    } else {
        hint_style()
    };

    let mut spans = vec![
        Span::raw(checkbox),
        Span::styled(task.title.clone(), text_style),
        Span::raw("  "),
        Span::styled(task.priority.name().to_string(), priority_style(task.priority)),
    ];
    if !task.category.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", task.category), tag_style()));
    }
    spans.push(Span::styled(
        format!("  ⇢ {}", due_label(task.due, today)),
        due_style,
    ));

    Line::from(spans)
}

/// Render the Tasks tab: filtered list on the left, summary on the right
pub fn render_tasks_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let today = Local::now().date_naive();
    let (list_area, side_area) = split_main_side(area, 70);

    let visible = app.visible_tasks();
    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(Line::styled(
            "  No tasks here. Press 'a' to add one.",
            hint_style(),
        ))]
    } else {
        visible
            .iter()
            .map(|task| ListItem::new(create_task_line(task, today)))
            .collect()
    };

    let title = format!(
        " Tasks ({}) · {} ",
        visible.len(),
        app.task_filter.label()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.task_selected));
    }
    f.render_stateful_widget(list, list_area, &mut state);

    render_task_summary(f, app, today, side_area);
}

fn render_task_summary(f: &mut Frame, app: &AppState, today: NaiveDate, area: Rect) {
    let tasks = app.tasks.items();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Total:     "),
            Span::styled(tasks.len().to_string(), title_style()),
        ]),
        Line::from(vec![
            Span::raw("Completed: "),
            Span::styled(completed.to_string(), title_style()),
        ]),
        Line::from(vec![
            Span::raw("Active:    "),
            Span::styled((tasks.len() - completed).to_string(), title_style()),
        ]),
        Line::from(vec![
            Span::raw("Overdue:   "),
            Span::styled(overdue.to_string(), warning_style()),
        ]),
        Line::raw(""),
        Line::styled("Categories", title_style()),
    ];
    for category in app.task_categories.items() {
        let count = tasks.iter().filter(|t| t.category == *category).count();
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", category), tag_style()),
            Span::styled(format!(" ({})", count), hint_style()),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Overview ", title_style())),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_label() {
        let today = date(2024, 3, 10);
        assert_eq!(due_label(today, today), "today");
        assert_eq!(due_label(date(2024, 3, 11), today), "tomorrow");
        assert_eq!(due_label(date(2024, 3, 9), today), "yesterday");
        assert_eq!(due_label(date(2024, 4, 1), today), "Apr 01");
    }

    #[test]
    fn test_create_task_line() {
        let task = Task::new("Lab write-up", date(2024, 3, 8), Priority::High, "Projects").unwrap();
        let line = create_task_line(&task, date(2024, 3, 10));

        let line_str = format!("{:?}", line);
        assert!(line_str.contains("Lab write-up"));
        assert!(line_str.contains("[Projects]"));
        assert!(line
            .spans
            .iter()
            .any(|s| s.content.contains("Mar 08") && s.style == warning_style()));
    }
}
