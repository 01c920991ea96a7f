use crate::app::{AppState, StatusKind};
use crate::domain::{ExpenseView, Tab, UiMode};
use crate::ui::styles::{error_style, hint_style, info_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key hints for the current tab and mode
pub fn hints_for(tab: Tab, ui_mode: UiMode, expense_view: ExpenseView) -> Vec<&'static str> {
    match ui_mode {
        UiMode::Form => vec![
            "Tab/↑↓ field",
            "←/→ choice",
            "Enter save",
            "Esc cancel",
        ],
        UiMode::Settings => vec![
            "↑/↓ select",
            "←/→ adjust",
            "Shift ±5",
            "Space toggle",
            "Esc close",
        ],
        UiMode::ConfirmDelete => vec!["y confirm", "n cancel"],
        UiMode::Search => vec!["type to search", "Enter keep", "Esc clear"],
        UiMode::Normal => {
            let mut hints = match tab {
                Tab::Pomodoro => vec![
                    "Space start/pause",
                    "r reset",
                    "f focus",
                    "s short",
                    "l long",
                    "o settings",
                ],
                Tab::Tasks => vec![
                    "↑/↓ select",
                    "Space done",
                    "a add",
                    "c category",
                    "f filter",
                    "x delete",
                ],
                Tab::Notes => vec![
                    "↑/↓ select",
                    "a new",
                    "e edit",
                    "/ search",
                    "f category",
                    "x delete",
                ],
                Tab::Expenses => match expense_view {
                    ExpenseView::Tracker => vec!["↑/↓ select", "a add", "x delete", "v view"],
                    ExpenseView::Budget => vec![
                        "↑/↓ select",
                        "a category",
                        "e set budget",
                        "r rename",
                        "x delete",
                        "v view",
                    ],
                    ExpenseView::Analytics => vec!["v view"],
                },
                Tab::Timetable => vec!["↑/↓ select", "a add class", "x remove"],
            };
            hints.extend(["Tab/1-5 switch", "q quit"]);
            hints
        }
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let text = hints_for(app.tab, app.ui_mode, app.expense_view).join("   ");
    let paragraph = Paragraph::new(Line::raw(format!(" {}", text))).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the inline notification line
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => info_style(),
                StatusKind::Error => error_style(),
            };
            Line::from(Span::styled(format!(" {}", status.text), style))
        }
        None => Line::raw(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_hints_include_globals() {
        let hints = hints_for(Tab::Tasks, UiMode::Normal, ExpenseView::Tracker);
        assert!(hints.contains(&"a add"));
        assert_eq!(hints.last(), Some(&"q quit"));
    }

    #[test]
    fn test_modal_hints_replace_tab_hints() {
        let hints = hints_for(Tab::Pomodoro, UiMode::Settings, ExpenseView::Tracker);
        assert!(hints.contains(&"Esc close"));
        assert!(!hints.contains(&"q quit"));
    }

    #[test]
    fn test_budget_view_hints() {
        let hints = hints_for(Tab::Expenses, UiMode::Normal, ExpenseView::Budget);
        assert!(hints.contains(&"e set budget"));
        assert!(hints.contains(&"r rename"));
    }
}
