use crate::config::AppConfig;
use crate::domain::expense::{
    default_budget_items, rename_expense_category, spent_by_category, FALLBACK_CATEGORY,
};
use crate::domain::fields::{format_currency, parse_amount, parse_date};
use crate::domain::note::filter_notes;
use crate::domain::task::{default_task_categories, filter_tasks, validate_new_category};
use crate::domain::timetable::{parse_slot, sample_classes, slot_label, slot_labels, weekly_order};
use crate::domain::{
    BudgetItem, ClassDay, ClassEvent, Completion, Expense, ExpenseView, Mode, Note, NoteCategory,
    NoteColor, Pomodoro, Priority, SettingField, Tab, Task, TaskFilter, UiMode,
};
use crate::errors::ValidationError;
use crate::notifications;
use crate::persistence::{
    collection_file, keys, load_snapshot, save_snapshot, PomodoroSnapshot, Store,
};
use crate::ticker::SecondTicker;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How long an inline notification stays in the status line
const STATUS_TTL: Duration = Duration::from_secs(4);

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// What an open input form creates or edits
#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    Task,
    TaskCategory,
    Note { editing: Option<Uuid> },
    Expense,
    BudgetCategory,
    BudgetAmount(Uuid),
    BudgetRename(Uuid),
    Class,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Task => " Add Task ",
            FormKind::TaskCategory => " Add Task Category ",
            FormKind::Note { editing: None } => " New Note ",
            FormKind::Note { editing: Some(_) } => " Edit Note ",
            FormKind::Expense => " Add Expense ",
            FormKind::BudgetCategory => " Add Budget Category ",
            FormKind::BudgetAmount(_) => " Set Budget ",
            FormKind::BudgetRename(_) => " Rename Category ",
            FormKind::Class => " Add Class ",
        }
    }
}

/// One labelled field of an input form. Fields with choices cycle instead of taking text.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub choices: Vec<String>,
}

impl FormField {
    fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            choices: Vec::new(),
        }
    }

    fn choice(label: &'static str, choices: Vec<String>, selected: &str) -> Self {
        let value = if choices.iter().any(|c| c == selected) {
            selected.to_string()
        } else {
            choices.first().cloned().unwrap_or_default()
        };
        Self {
            label,
            value,
            choices,
        }
    }

    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    fn cycle(&mut self, step: isize) {
        if self.choices.is_empty() {
            return;
        }
        let len = self.choices.len() as isize;
        let current = self
            .choices
            .iter()
            .position(|c| *c == self.value)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.value = self.choices[next].clone();
    }
}

/// Input form state
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub editing_field: usize,
}

impl InputFormState {
    fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            editing_field: 0,
        }
    }

    /// Current text of field `index`
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Inline notification shown in the status line
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Task(Uuid),
    Note(Uuid),
    Expense(Uuid),
    Budget(Uuid),
    Class(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub target: DeleteTarget,
    pub label: String,
}

/// Main application state
pub struct AppState {
    pub config: AppConfig,
    pub tab: Tab,
    pub ui_mode: UiMode,

    // Pomodoro
    pub pomodoro: Pomodoro,
    pub ticker: SecondTicker,
    pub settings_selected: usize,
    pomodoro_file: Option<PathBuf>,

    // Tasks
    pub tasks: Store<Task>,
    pub task_categories: Store<String>,
    pub task_filter: TaskFilter,
    pub task_selected: usize,

    // Notes
    pub notes: Store<Note>,
    pub note_search: String,
    pub note_category: Option<NoteCategory>,
    pub note_selected: usize,

    // Expenses
    pub expenses: Store<Expense>,
    pub budget: Store<BudgetItem>,
    pub expense_view: ExpenseView,
    pub expense_selected: usize,
    pub budget_selected: usize,
    spent_by_category: Rc<RefCell<BTreeMap<String, f64>>>,

    // Timetable
    pub timetable: Store<ClassEvent>,
    pub class_selected: usize,

    pub input_form: Option<InputFormState>,
    pub pending_delete: Option<PendingDelete>,
    pub status: Option<StatusMessage>,
}

impl AppState {
    /// Load every collection from `data_dir`
    pub fn load(data_dir: &Path, config: AppConfig) -> Self {
        let tasks = Store::load(collection_file(data_dir, keys::TASKS), Vec::new);
        let task_categories = Store::load(
            collection_file(data_dir, keys::TASK_CATEGORIES),
            default_task_categories,
        );
        let notes = Store::load(collection_file(data_dir, keys::NOTES), Vec::new);
        let mut expenses: Store<Expense> =
            Store::load(collection_file(data_dir, keys::EXPENSES), Vec::new);
        let budget = Store::load(
            collection_file(data_dir, keys::BUDGET_ITEMS),
            default_budget_items,
        );
        let timetable = Store::load(
            collection_file(data_dir, keys::TIMETABLE_CLASSES),
            sample_classes,
        );

        // Budget lines read spending from this cache; the expense store keeps it current
        let spent = Rc::new(RefCell::new(spent_by_category(expenses.items())));
        let sink = Rc::clone(&spent);
        expenses.subscribe(move |items| *sink.borrow_mut() = spent_by_category(items));

        let pomodoro_file = config
            .persist_pomodoro
            .then(|| collection_file(data_dir, keys::POMODORO));
        let pomodoro = match &pomodoro_file {
            Some(path) => {
                let snapshot = load_snapshot(path).unwrap_or_else(|e| {
                    warn!(error = %e, "Malformed pomodoro state, starting fresh");
                    PomodoroSnapshot::default()
                });
                Pomodoro::with_completed_sessions(
                    snapshot.settings,
                    snapshot.completed_work_sessions,
                )
            }
            None => Pomodoro::default(),
        };

        info!(
            tasks = tasks.len(),
            notes = notes.len(),
            expenses = expenses.len(),
            classes = timetable.len(),
            persist_pomodoro = config.persist_pomodoro,
            "Collections loaded"
        );

        Self {
            config,
            tab: Tab::Pomodoro,
            ui_mode: UiMode::Normal,
            pomodoro,
            ticker: SecondTicker::new(),
            settings_selected: 0,
            pomodoro_file,
            tasks,
            task_categories,
            task_filter: TaskFilter::All,
            task_selected: 0,
            notes,
            note_search: String::new(),
            note_category: None,
            note_selected: 0,
            expenses,
            budget,
            expense_view: ExpenseView::Tracker,
            expense_selected: 0,
            budget_selected: 0,
            spent_by_category: spent,
            timetable,
            class_selected: 0,
            input_form: None,
            pending_delete: None,
            status: None,
        }
    }

    // ----- Status line -----

    pub fn notify_info(&mut self, text: impl Into<String>) {
        self.set_status(StatusKind::Info, text.into());
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.set_status(StatusKind::Error, text.into());
    }

    fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(StatusMessage {
            kind,
            text,
            shown_at: Instant::now(),
        });
    }

    /// Drop the status message once it has been shown long enough
    pub fn expire_status(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now.saturating_duration_since(status.shown_at) >= STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Surface a failed change: validation errors inline, I/O errors logged too
    fn report_failure(&mut self, err: anyhow::Error) {
        match err.downcast_ref::<ValidationError>() {
            Some(validation) => self.notify_error(validation.to_string()),
            None => {
                warn!(error = %err, "Failed to save collection");
                self.notify_error(format!("Could not save: {}", err));
            }
        }
    }

    // ----- Navigation -----

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Pomodoro => 0,
            Tab::Tasks => self.visible_tasks().len(),
            Tab::Notes => self.visible_notes().len(),
            Tab::Expenses => match self.expense_view {
                ExpenseView::Tracker => self.expenses.len(),
                ExpenseView::Budget => self.budget.len(),
                ExpenseView::Analytics => 0,
            },
            Tab::Timetable => self.timetable.len(),
        }
    }

    fn selected_index_mut(&mut self) -> Option<&mut usize> {
        match self.tab {
            Tab::Pomodoro => None,
            Tab::Tasks => Some(&mut self.task_selected),
            Tab::Notes => Some(&mut self.note_selected),
            Tab::Expenses => match self.expense_view {
                ExpenseView::Tracker => Some(&mut self.expense_selected),
                ExpenseView::Budget => Some(&mut self.budget_selected),
                ExpenseView::Analytics => None,
            },
            Tab::Timetable => Some(&mut self.class_selected),
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if let Some(index) = self.selected_index_mut() {
            *index = index.saturating_sub(1);
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if let Some(index) = self.selected_index_mut() {
            if *index + 1 < len {
                *index += 1;
            }
        }
    }

    /// Keep the selection inside the visible list (after deletes and filter changes)
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if let Some(index) = self.selected_index_mut() {
            *index = (*index).min(len.saturating_sub(1));
        }
    }

    // ----- Pomodoro -----

    /// Start/pause toggle
    pub fn toggle_timer(&mut self) {
        self.pomodoro.toggle();
        if self.pomodoro.is_active() {
            self.ticker.arm(Instant::now());
        } else {
            self.ticker.disarm();
        }
    }

    pub fn reset_timer(&mut self) {
        self.pomodoro.reset();
        self.ticker.disarm();
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.pomodoro.switch_mode(mode);
        self.ticker.disarm();
    }

    /// Feed elapsed whole seconds into the timer.
    /// The ticker is armed only while the timer runs.
    pub fn tick(&mut self, now: Instant) {
        if !self.pomodoro.is_active() {
            self.ticker.disarm();
            return;
        }

        self.ticker.arm(now);
        for _ in 0..self.ticker.due_seconds(now) {
            if let Some(completion) = self.pomodoro.tick() {
                self.on_completion(completion);
            }
            if !self.pomodoro.is_active() {
                self.ticker.disarm();
                break;
            }
        }
    }

    fn on_completion(&mut self, completion: Completion) {
        info!(
            finished = completion.finished.name(),
            next = completion.next.name(),
            sessions = completion.completed_work_sessions,
            "Countdown complete"
        );
        let (_, body) = notifications::completion_message(&completion);
        self.notify_info(format!("{} complete. {}", completion.finished.name(), body));
        notifications::announce_completion(&completion, &self.config);
        self.save_pomodoro();
    }

    pub fn open_settings(&mut self) {
        self.settings_selected = 0;
        self.ui_mode = UiMode::Settings;
    }

    pub fn settings_move_up(&mut self) {
        self.settings_selected = self.settings_selected.saturating_sub(1);
    }

    pub fn settings_move_down(&mut self) {
        if self.settings_selected + 1 < SettingField::all().len() {
            self.settings_selected += 1;
        }
    }

    /// Nudge the highlighted setting; never rescales a running countdown
    pub fn adjust_selected_setting(&mut self, delta: i32) {
        let field = SettingField::all()[self.settings_selected];
        let next = self.pomodoro.settings().adjusted(field, delta);
        self.pomodoro.update_settings(next);
    }

    pub fn close_settings(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.save_pomodoro();
    }

    fn save_pomodoro(&self) {
        let Some(path) = &self.pomodoro_file else {
            return;
        };
        let snapshot = PomodoroSnapshot {
            settings: *self.pomodoro.settings(),
            completed_work_sessions: self.pomodoro.completed_work_sessions(),
        };
        if let Err(e) = save_snapshot(path, &snapshot) {
            warn!(error = %e, "Failed to save pomodoro state");
        }
    }

    /// Stop the ticker and flush anything still pending (called on exit)
    pub fn shutdown(&mut self) {
        self.ticker.disarm();
        self.save_pomodoro();
    }

    // ----- Tasks -----

    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(self.tasks.items(), &self.task_filter, today())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.task_selected).copied()
    }

    pub fn toggle_selected_task(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        let result = self.tasks.update(|tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.toggle_completed();
            }
        });
        match result {
            Ok(()) => self.clamp_selection(),
            Err(e) => self.report_failure(e),
        }
    }

    pub fn cycle_task_filter(&mut self) {
        self.task_filter = self.task_filter.next(self.task_categories.items());
        self.task_selected = 0;
    }

    pub fn start_add_task(&mut self) {
        let priorities = Priority::all().iter().map(|p| p.name().to_string()).collect();
        let categories = self.task_categories.items().to_vec();
        let first_category = categories.first().cloned().unwrap_or_default();
        self.open_form(InputFormState::new(
            FormKind::Task,
            vec![
                FormField::text("Title", ""),
                FormField::text("Due (YYYY-MM-DD)", today().format("%Y-%m-%d").to_string()),
                FormField::choice("Priority", priorities, Priority::default().name()),
                FormField::choice("Category", categories, &first_category),
            ],
        ));
    }

    pub fn start_add_task_category(&mut self) {
        self.open_form(InputFormState::new(
            FormKind::TaskCategory,
            vec![FormField::text("Category name", "")],
        ));
    }

    // ----- Notes -----

    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(self.notes.items(), &self.note_search, self.note_category)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.visible_notes().get(self.note_selected).copied()
    }

    fn note_form(editing: Option<&Note>) -> InputFormState {
        let categories = NoteCategory::all().iter().map(|c| c.name().to_string()).collect();
        let colors = NoteColor::all().iter().map(|c| c.name().to_string()).collect();
        let (title, content, category, color) = match editing {
            Some(note) => (
                note.title.clone(),
                note.content.clone(),
                note.category,
                note.color,
            ),
            None => (
                String::new(),
                String::new(),
                NoteCategory::default(),
                NoteColor::default(),
            ),
        };
        InputFormState::new(
            FormKind::Note {
                editing: editing.map(|n| n.id),
            },
            vec![
                FormField::text("Title", title),
                FormField::text("Content", content),
                FormField::choice("Category", categories, category.name()),
                FormField::choice("Color", colors, color.name()),
            ],
        )
    }

    pub fn start_add_note(&mut self) {
        self.open_form(Self::note_form(None));
    }

    pub fn start_edit_note(&mut self) {
        let Some(form) = self.selected_note().map(|n| Self::note_form(Some(n))) else {
            return;
        };
        self.open_form(form);
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Search;
    }

    pub fn search_push(&mut self, c: char) {
        self.note_search.push(c);
        self.note_selected = 0;
    }

    pub fn search_backspace(&mut self) {
        self.note_search.pop();
        self.note_selected = 0;
    }

    /// Leave search mode, keeping the term
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Leave search mode and clear the term
    pub fn clear_search(&mut self) {
        self.note_search.clear();
        self.note_selected = 0;
        self.ui_mode = UiMode::Normal;
    }

    pub fn cycle_note_category(&mut self) {
        self.note_category = NoteCategory::next_filter(self.note_category);
        self.note_selected = 0;
    }

    // ----- Expenses -----

    pub fn cycle_expense_view(&mut self) {
        self.expense_view = self.expense_view.next();
    }

    /// Amount spent in a budget category, from the expense subscription cache
    pub fn spent_for(&self, category: &str) -> f64 {
        self.spent_by_category
            .borrow()
            .get(category)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn selected_budget_item(&self) -> Option<&BudgetItem> {
        self.budget.items().get(self.budget_selected)
    }

    pub fn start_add_expense(&mut self) {
        let categories = self
            .budget
            .items()
            .iter()
            .map(|b| b.category.clone())
            .collect();
        self.open_form(InputFormState::new(
            FormKind::Expense,
            vec![
                FormField::text("Amount", ""),
                FormField::choice("Category", categories, FALLBACK_CATEGORY),
                FormField::text("Description", ""),
                FormField::text("Date (YYYY-MM-DD)", today().format("%Y-%m-%d").to_string()),
            ],
        ));
    }

    pub fn start_add_budget_category(&mut self) {
        self.open_form(InputFormState::new(
            FormKind::BudgetCategory,
            vec![
                FormField::text("Category name", ""),
                FormField::text("Monthly budget", "0"),
            ],
        ));
    }

    pub fn start_edit_budget_amount(&mut self) {
        let Some((id, current)) = self.selected_budget_item().map(|b| (b.id, b.budgeted)) else {
            return;
        };
        self.open_form(InputFormState::new(
            FormKind::BudgetAmount(id),
            vec![FormField::text("Monthly budget", format!("{:.2}", current))],
        ));
    }

    pub fn start_rename_budget_category(&mut self) {
        let Some((id, name)) = self
            .selected_budget_item()
            .map(|b| (b.id, b.category.clone()))
        else {
            return;
        };
        self.open_form(InputFormState::new(
            FormKind::BudgetRename(id),
            vec![FormField::text("Category name", name)],
        ));
    }

    // ----- Timetable -----

    /// Classes in list order: through the week by day and start time
    pub fn visible_classes(&self) -> Vec<&ClassEvent> {
        weekly_order(self.timetable.items())
    }

    pub fn selected_class(&self) -> Option<&ClassEvent> {
        self.visible_classes().get(self.class_selected).copied()
    }

    pub fn start_add_class(&mut self) {
        let days = ClassDay::all().iter().map(|d| d.name().to_string()).collect();
        let colors = NoteColor::all().iter().map(|c| c.name().to_string()).collect();
        self.open_form(InputFormState::new(
            FormKind::Class,
            vec![
                FormField::text("Class title", ""),
                FormField::choice("Day", days, ClassDay::default().name()),
                FormField::choice("Start time", slot_labels(), &slot_label(9)),
                FormField::choice("End time", slot_labels(), &slot_label(10)),
                FormField::text("Location", ""),
                FormField::choice("Color", colors, NoteColor::Blue.name()),
            ],
        ));
    }

    // ----- Forms -----

    /// Open the add form that fits the current tab
    pub fn start_add(&mut self) {
        match self.tab {
            Tab::Pomodoro => {}
            Tab::Tasks => self.start_add_task(),
            Tab::Notes => self.start_add_note(),
            Tab::Expenses => match self.expense_view {
                ExpenseView::Tracker => self.start_add_expense(),
                ExpenseView::Budget => self.start_add_budget_category(),
                ExpenseView::Analytics => {}
            },
            Tab::Timetable => self.start_add_class(),
        }
    }

    fn open_form(&mut self, form: InputFormState) {
        self.input_form = Some(form);
        self.ui_mode = UiMode::Form;
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % form.fields.len();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            let len = form.fields.len();
            form.editing_field = (form.editing_field + len - 1) % len;
        }
    }

    /// Type into the current field (choice fields ignore text)
    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            if let Some(field) = form.fields.get_mut(form.editing_field) {
                if !field.is_choice() {
                    field.value.push(c);
                }
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            if let Some(field) = form.fields.get_mut(form.editing_field) {
                if !field.is_choice() {
                    field.value.pop();
                }
            }
        }
    }

    /// Step through the options of a choice field
    pub fn form_cycle_choice(&mut self, step: isize) {
        if let Some(form) = &mut self.input_form {
            if let Some(field) = form.fields.get_mut(form.editing_field) {
                field.cycle(step);
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Validate and apply the open form. On failure the form stays open and nothing changes.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        match self.apply_form(&form) {
            Ok(message) => {
                debug!(kind = ?form.kind, "Form applied");
                self.ui_mode = UiMode::Normal;
                self.notify_info(message);
            }
            Err(e) => {
                self.report_failure(e);
                self.input_form = Some(form);
            }
        }
    }

    fn apply_form(&mut self, form: &InputFormState) -> Result<String> {
        match &form.kind {
            FormKind::Task => {
                let due = parse_date(form.value(1), today())?;
                let priority = Priority::parse(form.value(2))?;
                let task = Task::new(form.value(0), due, priority, form.value(3))?;
                self.tasks.insert(task)?;
                Ok("Task added".to_string())
            }
            FormKind::TaskCategory => {
                let name = validate_new_category(self.task_categories.items(), form.value(0))?;
                self.task_categories.update(|categories| categories.push(name))?;
                Ok("Category added".to_string())
            }
            FormKind::Note { editing } => {
                let category = NoteCategory::parse(form.value(2))?;
                let color = NoteColor::parse(form.value(3))?;
                match editing {
                    Some(id) => {
                        let mut note = self
                            .notes
                            .get(*id)
                            .cloned()
                            .ok_or(ValidationError::UnknownRecord(*id))?;
                        note.edit(form.value(0), form.value(1), category, color)?;
                        self.notes.replace(note)?;
                        Ok("Note updated successfully".to_string())
                    }
                    None => {
                        let note = Note::new(form.value(0), form.value(1), category, color)?;
                        self.notes.prepend(note)?;
                        self.note_selected = 0;
                        Ok("Note created successfully".to_string())
                    }
                }
            }
            FormKind::Expense => {
                let amount = parse_amount(form.value(0))?;
                let date = parse_date(form.value(3), today())?;
                let expense = Expense::new(amount, form.value(1), form.value(2), date)?;
                self.expenses.prepend(expense)?;
                self.expense_selected = 0;
                Ok("Expense added".to_string())
            }
            FormKind::BudgetCategory => {
                let amount = parse_amount(form.value(1))?;
                let item = BudgetItem::new(form.value(0), amount, self.budget.items())?;
                self.budget.insert(item)?;
                Ok("Budget category added".to_string())
            }
            FormKind::BudgetAmount(id) => {
                let amount = parse_amount(form.value(0))?;
                let mut item = self
                    .budget
                    .get(*id)
                    .cloned()
                    .ok_or(ValidationError::UnknownRecord(*id))?;
                item.set_budgeted(amount)?;
                self.budget.replace(item)?;
                Ok("Budget updated".to_string())
            }
            FormKind::BudgetRename(id) => {
                let mut item = self
                    .budget
                    .get(*id)
                    .cloned()
                    .ok_or(ValidationError::UnknownRecord(*id))?;
                let old_name = item.category.clone();
                item.rename(form.value(0), self.budget.items())?;
                let new_name = item.category.clone();
                self.budget.replace(item)?;
                if new_name != old_name {
                    // Spent totals follow the category to its new name
                    self.expenses.update(|expenses| {
                        rename_expense_category(expenses, &old_name, &new_name)
                    })?;
                }
                Ok(format!("Category renamed to {}", new_name))
            }
            FormKind::Class => {
                let day = ClassDay::parse(form.value(1))?;
                let start = parse_slot(form.value(2))?;
                let end = parse_slot(form.value(3))?;
                let color = NoteColor::parse(form.value(5))?;
                let class = ClassEvent::new(form.value(0), day, start, end, form.value(4), color)?;
                let message = format!("{} has been added to your timetable", class.title);
                self.timetable.insert(class)?;
                Ok(message)
            }
        }
    }

    // ----- Deletes -----

    /// Ask for confirmation before deleting the selected record
    pub fn request_delete(&mut self) {
        let pending = match self.tab {
            Tab::Pomodoro => None,
            Tab::Tasks => self.selected_task().map(|t| PendingDelete {
                target: DeleteTarget::Task(t.id),
                label: t.title.clone(),
            }),
            Tab::Notes => self.selected_note().map(|n| PendingDelete {
                target: DeleteTarget::Note(n.id),
                label: n.title.clone(),
            }),
            Tab::Expenses => match self.expense_view {
                ExpenseView::Tracker => {
                    self.expenses
                        .items()
                        .get(self.expense_selected)
                        .map(|e| PendingDelete {
                            target: DeleteTarget::Expense(e.id),
                            label: format!("{} {}", format_currency(e.amount), e.category),
                        })
                }
                ExpenseView::Budget => match self.selected_budget_item() {
                    Some(item) => {
                        if let Err(e) = item.ensure_deletable() {
                            self.notify_error(e.to_string());
                            return;
                        }
                        Some(PendingDelete {
                            target: DeleteTarget::Budget(item.id),
                            label: item.category.clone(),
                        })
                    }
                    None => None,
                },
                ExpenseView::Analytics => None,
            },
            Tab::Timetable => self.selected_class().map(|c| PendingDelete {
                target: DeleteTarget::Class(c.id),
                label: format!("{} ({} {})", c.title, c.day.name(), slot_label(c.start_hour)),
            }),
        };

        if let Some(pending) = pending {
            self.pending_delete = Some(pending);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.ui_mode = UiMode::Normal;
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        let result = match pending.target {
            DeleteTarget::Task(id) => self.tasks.remove(id).map(|_| "Task deleted"),
            DeleteTarget::Note(id) => self.notes.remove(id).map(|_| "Note deleted successfully"),
            DeleteTarget::Expense(id) => self.expenses.remove(id).map(|_| "Expense deleted"),
            DeleteTarget::Budget(id) => self.delete_budget_item(id),
            DeleteTarget::Class(id) => self.timetable.remove(id).map(|_| "Class removed"),
        };

        match result {
            Ok(message) => {
                self.notify_info(message);
                self.clamp_selection();
            }
            Err(e) => self.report_failure(e),
        }
    }

    fn delete_budget_item(&mut self, id: Uuid) -> Result<&'static str> {
        if let Some(item) = self.budget.get(id) {
            item.ensure_deletable()?;
        }
        self.budget.remove(id).map(|_| "Budget category deleted")
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Settings;
    use tempfile::TempDir;

    fn quiet_config() -> AppConfig {
        AppConfig {
            persist_pomodoro: false,
            desktop_notifications: false,
            terminal_bell: false,
        }
    }

    fn create_test_app() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let app = AppState::load(dir.path(), quiet_config());
        (dir, app)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.form_input_char(c);
        }
    }

    fn add_expense(app: &mut AppState, amount: &str) {
        app.tab = Tab::Expenses;
        app.start_add_expense();
        type_text(app, amount);
        app.submit_input_form();
    }

    #[test]
    fn test_load_uses_defaults() {
        let (_dir, app) = create_test_app();
        assert_eq!(app.tab, Tab::Pomodoro);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.tasks.is_empty());
        assert_eq!(app.task_categories.len(), 5);
        assert_eq!(app.budget.len(), 9);
        assert_eq!(app.pomodoro.formatted_time(), "25:00");
    }

    #[test]
    fn test_add_task_through_form_persists() {
        let (dir, mut app) = create_test_app();
        app.tab = Tab::Tasks;
        app.start_add();
        assert_eq!(app.ui_mode, UiMode::Form);

        type_text(&mut app, "Problem set 3");
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.items()[0].category, "Homework");
        assert_eq!(app.tasks.items()[0].priority, Priority::Medium);

        let reloaded = AppState::load(dir.path(), quiet_config());
        assert_eq!(reloaded.tasks.items(), app.tasks.items());
    }

    #[test]
    fn test_blank_task_title_keeps_form_open() {
        let (_dir, mut app) = create_test_app();
        app.start_add_task();
        type_text(&mut app, "   ");
        app.submit_input_form();

        assert!(app.tasks.is_empty());
        assert_eq!(app.ui_mode, UiMode::Form);
        assert!(app.input_form.is_some());
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Task title cannot be empty");
    }

    #[test]
    fn test_duplicate_task_category_is_rejected() {
        let (_dir, mut app) = create_test_app();
        app.start_add_task_category();
        type_text(&mut app, "Reading");
        app.submit_input_form();

        assert_eq!(app.task_categories.len(), 5);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);

        app.cancel_input_form();
        app.start_add_task_category();
        type_text(&mut app, "Labs");
        app.submit_input_form();
        assert_eq!(app.task_categories.len(), 6);
    }

    #[test]
    fn test_choice_fields_cycle_and_ignore_typing() {
        let (_dir, mut app) = create_test_app();
        app.start_add_task();
        app.form_next_field();
        app.form_next_field();
        app.form_input_char('x');
        app.form_cycle_choice(1);
        assert_eq!(app.input_form.as_ref().unwrap().value(2), "High");
        app.form_cycle_choice(1);
        assert_eq!(app.input_form.as_ref().unwrap().value(2), "Low");
        app.form_cycle_choice(-1);
        assert_eq!(app.input_form.as_ref().unwrap().value(2), "High");
    }

    #[test]
    fn test_toggle_task_and_filter() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Tasks;
        app.start_add_task();
        type_text(&mut app, "Read ch. 2");
        app.submit_input_form();

        app.toggle_selected_task();
        assert!(app.tasks.items()[0].completed);

        app.cycle_task_filter();
        assert_eq!(app.task_filter, TaskFilter::Active);
        assert!(app.visible_tasks().is_empty());
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_expense_validation_and_budget_spent() {
        let (_dir, mut app) = create_test_app();

        add_expense(&mut app, "0");
        assert!(app.expenses.is_empty());
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Please enter a valid amount greater than zero"
        );
        app.cancel_input_form();

        add_expense(&mut app, "12.50");
        add_expense(&mut app, "7.50");
        assert_eq!(app.expenses.len(), 2);
        assert_eq!(app.expenses.items()[0].amount, 7.5);
        assert_eq!(app.spent_for("Other"), 20.0);
        assert_eq!(app.spent_for("Food"), 0.0);
    }

    #[test]
    fn test_budget_category_and_amount() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Expenses;
        app.expense_view = ExpenseView::Budget;

        app.start_add();
        type_text(&mut app, "food");
        app.submit_input_form();
        assert_eq!(app.budget.len(), 9);
        app.cancel_input_form();

        app.start_add();
        type_text(&mut app, "Books");
        app.submit_input_form();
        assert_eq!(app.budget.len(), 10);

        app.budget_selected = 9;
        app.start_edit_budget_amount();
        let form = app.input_form.as_ref().unwrap();
        assert_eq!(form.value(0), "0.00");
        app.form_backspace();
        app.form_backspace();
        app.form_backspace();
        app.form_backspace();
        type_text(&mut app, "80");
        app.submit_input_form();
        assert_eq!(app.budget.items()[9].budgeted, 80.0);
    }

    #[test]
    fn test_note_create_edit_and_search() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Notes;
        app.start_add();
        type_text(&mut app, "Organic chem");
        app.form_next_field();
        type_text(&mut app, "alkenes and alkynes");
        app.submit_input_form();
        assert_eq!(app.notes.len(), 1);

        app.start_edit_note();
        type_text(&mut app, " II");
        app.submit_input_form();
        assert_eq!(app.notes.items()[0].title, "Organic chem II");
        assert_eq!(app.notes.len(), 1);

        app.start_search();
        for c in "ALKYNE".chars() {
            app.search_push(c);
        }
        assert_eq!(app.visible_notes().len(), 1);
        app.search_push('z');
        assert!(app.visible_notes().is_empty());
        app.clear_search();
        assert_eq!(app.visible_notes().len(), 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Tasks;
        app.start_add_task();
        type_text(&mut app, "Lab report");
        app.submit_input_form();

        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        app.cancel_delete();
        assert_eq!(app.tasks.len(), 1);

        app.request_delete();
        app.confirm_delete();
        assert!(app.tasks.is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.task_selected, 0);
    }

    #[test]
    fn test_tick_drives_countdown() {
        let (_dir, mut app) = create_test_app();
        app.toggle_timer();
        let start = Instant::now();

        app.tick(start);
        app.tick(start + Duration::from_secs(3));
        assert_eq!(app.pomodoro.remaining_seconds(), 25 * 60 - 3);
        assert!(app.ticker.is_armed());
    }

    #[test]
    fn test_start_arms_ticker_immediately() {
        let (_dir, mut app) = create_test_app();
        let before = Instant::now();
        app.toggle_timer();
        assert!(app.ticker.is_armed());

        app.tick(before + Duration::from_millis(200));
        assert_eq!(app.pomodoro.remaining_seconds(), 25 * 60);
        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.pomodoro.remaining_seconds(), 25 * 60 - 1);
    }

    #[test]
    fn test_pause_disarms_ticker() {
        let (_dir, mut app) = create_test_app();
        app.toggle_timer();
        let start = Instant::now();
        app.tick(start);
        app.tick(start + Duration::from_secs(2));

        app.toggle_timer();
        assert!(!app.ticker.is_armed());
        app.tick(start + Duration::from_secs(60));
        assert_eq!(app.pomodoro.remaining_seconds(), 25 * 60 - 2);
    }

    #[test]
    fn test_completion_through_tick() {
        let (_dir, mut app) = create_test_app();
        app.pomodoro.update_settings(Settings {
            work_duration: 1,
            ..Settings::default()
        });
        app.reset_timer();
        app.toggle_timer();

        let start = Instant::now();
        app.tick(start);
        app.tick(start + Duration::from_secs(60));

        assert_eq!(app.pomodoro.mode(), Mode::ShortBreak);
        assert_eq!(app.pomodoro.completed_work_sessions(), 1);
        assert!(app.pomodoro.is_active());
        assert_eq!(app.pomodoro.remaining_seconds(), 5 * 60);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_settings_modal_adjusts_without_rescaling() {
        let (_dir, mut app) = create_test_app();
        app.toggle_timer();
        app.open_settings();
        assert_eq!(app.ui_mode, UiMode::Settings);

        app.adjust_selected_setting(5);
        assert_eq!(app.pomodoro.settings().work_duration, 30);
        assert_eq!(app.pomodoro.remaining_seconds(), 25 * 60);

        app.settings_move_down();
        app.settings_move_down();
        app.settings_move_down();
        app.settings_move_down();
        app.settings_move_down();
        app.adjust_selected_setting(1);
        assert!(!app.pomodoro.settings().auto_start_breaks);

        app.close_settings();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_pomodoro_state_persists_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            persist_pomodoro: true,
            ..quiet_config()
        };

        let mut app = AppState::load(dir.path(), config.clone());
        app.pomodoro.update_settings(Settings {
            work_duration: 1,
            ..Settings::default()
        });
        app.reset_timer();
        app.toggle_timer();
        let start = Instant::now();
        app.tick(start);
        app.tick(start + Duration::from_secs(60));
        app.shutdown();

        let reloaded = AppState::load(dir.path(), config);
        assert_eq!(reloaded.pomodoro.completed_work_sessions(), 1);
        assert_eq!(reloaded.pomodoro.settings().work_duration, 1);
        assert_eq!(reloaded.pomodoro.mode(), Mode::Work);
        assert!(!reloaded.pomodoro.is_active());
    }

    #[test]
    fn test_pomodoro_state_not_persisted_by_default() {
        let (dir, mut app) = create_test_app();
        app.open_settings();
        app.adjust_selected_setting(10);
        app.close_settings();
        app.shutdown();

        let reloaded = AppState::load(dir.path(), quiet_config());
        assert_eq!(reloaded.pomodoro.settings().work_duration, 25);
    }

    #[test]
    fn test_status_expires() {
        let (_dir, mut app) = create_test_app();
        app.notify_info("Saved");
        let shown = app.status.as_ref().unwrap().shown_at;
        app.expire_status(shown + Duration::from_secs(1));
        assert!(app.status.is_some());
        app.expire_status(shown + STATUS_TTL);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_failed_save_leaves_expenses_and_spent_untouched() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();
        let mut app = AppState::load(&data_dir, quiet_config());
        std::fs::remove_dir_all(&data_dir).unwrap();

        add_expense(&mut app, "5");
        assert!(app.expenses.is_empty());
        assert_eq!(app.spent_for("Other"), 0.0);
        assert_eq!(app.ui_mode, UiMode::Form);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("Could not save"));
    }

    #[test]
    fn test_rename_budget_category_moves_spending() {
        let (_dir, mut app) = create_test_app();
        add_expense(&mut app, "12");
        app.expense_view = ExpenseView::Budget;
        app.budget_selected = 8;

        app.start_rename_budget_category();
        assert_eq!(app.input_form.as_ref().unwrap().value(0), "Other");
        for _ in 0.."Other".len() {
            app.form_backspace();
        }
        type_text(&mut app, "Misc");
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.budget.items()[8].category, "Misc");
        assert_eq!(app.expenses.items()[0].category, "Misc");
        assert_eq!(app.spent_for("Misc"), 12.0);
        assert_eq!(app.spent_for("Other"), 0.0);
    }

    #[test]
    fn test_rename_to_existing_category_is_rejected() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Expenses;
        app.expense_view = ExpenseView::Budget;
        app.budget_selected = 0;

        app.start_rename_budget_category();
        for _ in 0.."Food".len() {
            app.form_backspace();
        }
        type_text(&mut app, "housing");
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Form);
        assert_eq!(app.budget.items()[0].category, "Food");
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Category \"housing\" already exists"
        );

        // Same name in a different case is a valid rename of itself
        app.cancel_input_form();
        app.start_rename_budget_category();
        for _ in 0.."Food".len() {
            app.form_backspace();
        }
        type_text(&mut app, "FOOD");
        app.submit_input_form();
        assert_eq!(app.budget.items()[0].category, "FOOD");
    }

    #[test]
    fn test_default_budget_category_cannot_be_deleted() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Expenses;
        app.expense_view = ExpenseView::Budget;
        app.budget_selected = 8;

        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.pending_delete.is_none());
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Default category \"Other\" cannot be deleted"
        );

        // A delete queued for a default line is refused at confirmation too
        let food = app.budget.items()[0].id;
        app.pending_delete = Some(PendingDelete {
            target: DeleteTarget::Budget(food),
            label: "Food".to_string(),
        });
        app.confirm_delete();
        assert_eq!(app.budget.len(), 9);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);

        app.start_add();
        type_text(&mut app, "Books");
        app.submit_input_form();
        app.budget_selected = 9;
        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        app.confirm_delete();
        assert_eq!(app.budget.len(), 9);
        assert_eq!(app.budget_selected, 8);
    }

    #[test]
    fn test_timetable_starts_with_sample_week() {
        let (_dir, app) = create_test_app();
        let titles: Vec<&str> = app
            .visible_classes()
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Computer Science", "Data Structures", "Algorithms"]
        );
    }

    #[test]
    fn test_add_class_through_form_persists() {
        let (dir, mut app) = create_test_app();
        app.tab = Tab::Timetable;
        app.start_add();
        assert_eq!(app.input_form.as_ref().unwrap().kind, FormKind::Class);

        type_text(&mut app, "Physics");
        app.form_next_field();
        app.form_cycle_choice(1);
        app.form_next_field();
        app.form_cycle_choice(5);
        app.form_next_field();
        app.form_cycle_choice(7);
        app.form_next_field();
        type_text(&mut app, "Hall B");
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Physics has been added to your timetable"
        );
        let reloaded = AppState::load(dir.path(), quiet_config());
        let physics = reloaded
            .timetable
            .items()
            .iter()
            .find(|c| c.title == "Physics")
            .unwrap();
        assert_eq!(physics.day, ClassDay::Tuesday);
        assert_eq!(physics.time_range(), "2:00 PM - 5:00 PM");
        assert_eq!(physics.location, "Hall B");
        assert_eq!(physics.color, NoteColor::Blue);
    }

    #[test]
    fn test_invalid_class_keeps_form_open() {
        let (_dir, mut app) = create_test_app();
        app.start_add_class();
        app.submit_input_form();
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Class title cannot be empty"
        );

        type_text(&mut app, "Chemistry");
        app.form_next_field();
        app.form_next_field();
        app.form_cycle_choice(2);
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Form);
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "End time must be after start time"
        );
        assert_eq!(app.timetable.len(), 3);
    }

    #[test]
    fn test_remove_class_with_confirmation() {
        let (_dir, mut app) = create_test_app();
        app.tab = Tab::Timetable;
        app.move_selection_down();
        assert_eq!(app.selected_class().unwrap().title, "Data Structures");

        app.request_delete();
        assert_eq!(
            app.pending_delete.as_ref().unwrap().label,
            "Data Structures (Wednesday 1:00 PM)"
        );
        app.confirm_delete();
        assert_eq!(app.timetable.len(), 2);
        assert_eq!(app.status.as_ref().unwrap().text, "Class removed");
        assert!(app
            .timetable
            .items()
            .iter()
            .all(|c| c.title != "Data Structures"));
    }
}
