pub mod expenses_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod notes_pane;
pub mod pomodoro_pane;
pub mod styles;
pub mod tab_bar;
pub mod tasks_pane;
pub mod timetable_pane;

use crate::app::AppState;
use crate::domain::{Tab, UiMode};
use expenses_pane::render_expenses_pane;
use input_form::render_input_form;
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use modal::{render_confirm_delete_modal, render_settings_modal};
use notes_pane::render_notes_pane;
use pomodoro_pane::render_pomodoro_pane;
use ratatui::Frame;
use tab_bar::render_tab_bar;
use tasks_pane::render_tasks_pane;
use timetable_pane::render_timetable_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_tab_bar(f, app, layout.tabs_area);
    render_keybindings(f, app, layout.keybindings_area);

    match app.tab {
        Tab::Pomodoro => render_pomodoro_pane(f, app, layout.content_area),
        Tab::Tasks => render_tasks_pane(f, app, layout.content_area),
        Tab::Notes => render_notes_pane(f, app, layout.content_area),
        Tab::Expenses => render_expenses_pane(f, app, layout.content_area),
        Tab::Timetable => render_timetable_pane(f, app, layout.content_area),
    }

    render_status_line(f, app, layout.status_area);

    // Overlays
    match app.ui_mode {
        UiMode::Form => render_input_form(f, app, size),
        UiMode::Settings => render_settings_modal(f, app, size),
        UiMode::ConfirmDelete => render_confirm_delete_modal(f, app, size),
        UiMode::Normal | UiMode::Search => {}
    }
}
