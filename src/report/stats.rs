use crate::domain::expense::{budget_progress, monthly_totals, spent_by_category, total_spent};
use crate::domain::{BudgetItem, Expense, Note, NoteCategory, Task};
use chrono::NaiveDate;

/// Task completion statistics
#[derive(Debug, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub completion_percent: f64,
}

/// Per-category task counts
#[derive(Debug, PartialEq)]
pub struct CategoryStats {
    pub category: String,
    pub total: usize,
    pub completed: usize,
}

/// Spending statistics
#[derive(Debug, PartialEq)]
pub struct ExpenseStats {
    pub count: usize,
    pub total_spent: f64,
    pub largest: Option<(String, f64)>,
    pub by_category: Vec<(String, f64)>,
    pub by_month: Vec<(String, f64)>,
}

/// One budget line with its derived spending
#[derive(Debug, PartialEq)]
pub struct BudgetLine {
    pub category: String,
    pub budgeted: f64,
    pub spent: f64,
    pub percent: u16,
}

impl BudgetLine {
    pub fn is_over(&self) -> bool {
        self.budgeted > 0.0 && self.spent > self.budgeted
    }
}

/// Calculate task statistics as of `today`
pub fn calculate_task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();
    let due_today = tasks
        .iter()
        .filter(|t| t.due == today && !t.completed)
        .count();

    let completion_percent = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    TaskStats {
        total,
        completed,
        active: total - completed,
        overdue,
        due_today,
        completion_percent,
    }
}

/// Task counts for every category that has at least one task, in category order
pub fn calculate_category_stats(tasks: &[Task], categories: &[String]) -> Vec<CategoryStats> {
    categories
        .iter()
        .map(|category| {
            let in_category: Vec<&Task> =
                tasks.iter().filter(|t| t.category == *category).collect();
            CategoryStats {
                category: category.clone(),
                total: in_category.len(),
                completed: in_category.iter().filter(|t| t.completed).count(),
            }
        })
        .filter(|stats| stats.total > 0)
        .collect()
}

/// Note counts per category, skipping empty ones
pub fn calculate_note_stats(notes: &[Note]) -> Vec<(NoteCategory, usize)> {
    NoteCategory::all()
        .iter()
        .map(|category| {
            let count = notes.iter().filter(|n| n.category == *category).count();
            (*category, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Calculate spending statistics; categories are sorted by amount, largest first
pub fn calculate_expense_stats(expenses: &[Expense]) -> ExpenseStats {
    let mut by_category: Vec<(String, f64)> = spent_by_category(expenses).into_iter().collect();
    by_category.sort_by(|a, b| b.1.total_cmp(&a.1));

    let largest = expenses
        .iter()
        .max_by(|a, b| a.amount.total_cmp(&b.amount))
        .map(|e| {
            let label = if e.description.is_empty() {
                e.category.clone()
            } else {
                e.description.clone()
            };
            (label, e.amount)
        });

    ExpenseStats {
        count: expenses.len(),
        total_spent: total_spent(expenses),
        largest,
        by_category,
        by_month: monthly_totals(expenses),
    }
}

/// Budget lines with spending derived from `expenses`
pub fn calculate_budget_lines(items: &[BudgetItem], expenses: &[Expense]) -> Vec<BudgetLine> {
    let spent = spent_by_category(expenses);
    items
        .iter()
        .map(|item| {
            let spent = spent.get(&item.category).copied().unwrap_or(0.0);
            BudgetLine {
                category: item.category.clone(),
                budgeted: item.budgeted,
                spent,
                percent: budget_progress(spent, item.budgeted),
            }
        })
        .collect()
}
