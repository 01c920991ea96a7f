use crate::app::AppState;
use crate::domain::{ExpenseView, Mode, Tab, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Form => handle_input_form_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
        UiMode::Search => handle_search_mode(app, key),
    }
}

/// Handle keys in normal mode: global keys first, then the active tab
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        // Tab switching
        KeyCode::Tab => {
            app.next_tab();
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.prev_tab();
            return Ok(false);
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.select_tab(Tab::all()[index]);
            return Ok(false);
        }

        // List navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            return Ok(false);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            return Ok(false);
        }

        _ => {}
    }

    match app.tab {
        Tab::Pomodoro => handle_pomodoro_keys(app, key),
        Tab::Tasks => handle_tasks_keys(app, key),
        Tab::Notes => handle_notes_keys(app, key),
        Tab::Expenses => handle_expenses_keys(app, key),
        Tab::Timetable => handle_timetable_keys(app, key),
    }
    Ok(false)
}

fn handle_pomodoro_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        // Start/pause
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_timer(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),

        // Mode buttons
        KeyCode::Char('f') | KeyCode::Char('F') => app.switch_mode(Mode::Work),
        KeyCode::Char('s') | KeyCode::Char('S') => app.switch_mode(Mode::ShortBreak),
        KeyCode::Char('l') | KeyCode::Char('L') => app.switch_mode(Mode::LongBreak),

        KeyCode::Char('o') | KeyCode::Char('O') => app.open_settings(),
        _ => {}
    }
}

fn handle_tasks_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_task(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.start_add_task_category(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.cycle_task_filter(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn handle_notes_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_note(),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => app.start_edit_note(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.cycle_note_category(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_delete(),
        // Drop the search term
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

fn handle_expenses_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add(),
        KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Char('b') | KeyCode::Char('B') => {
            app.cycle_expense_view()
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            if app.expense_view == ExpenseView::Budget {
                app.start_edit_budget_amount();
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if app.expense_view == ExpenseView::Budget {
                app.start_rename_budget_category();
            }
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn handle_timetable_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_class(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

/// Handle keys in input form mode
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => app.submit_input_form(),

        // Cancel form
        KeyCode::Esc => app.cancel_input_form(),

        // Move between fields
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),

        // Cycle choice fields
        KeyCode::Left => app.form_cycle_choice(-1),
        KeyCode::Right => app.form_cycle_choice(1),

        KeyCode::Backspace => app.form_backspace(),

        // Add character
        KeyCode::Char(c) => app.form_input_char(c),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the pomodoro settings modal
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        5
    } else {
        1
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.settings_move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_move_down(),
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => {
            app.adjust_selected_setting(-step)
        }
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') => {
            app.adjust_selected_setting(step)
        }
        // Toggle rows flip on any step
        KeyCode::Char(' ') => app.adjust_selected_setting(1),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('o') => app.close_settings(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while a delete waits for confirmation
fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing into the notes search box
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
    Ok(false)
}
