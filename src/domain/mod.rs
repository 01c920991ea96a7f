pub mod enums;
pub mod expense;
pub mod fields;
pub mod note;
pub mod pomodoro;
pub mod task;
pub mod timetable;

pub use enums::{ExpenseView, Tab, UiMode};
pub use expense::{BudgetItem, Expense};
pub use note::{Note, NoteCategory, NoteColor};
pub use pomodoro::{Completion, Mode, Pomodoro, SettingField, Settings};
pub use task::{Priority, Task, TaskFilter};
pub use timetable::{ClassDay, ClassEvent};
