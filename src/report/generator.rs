use crate::domain::expense::default_budget_items;
use crate::domain::fields::format_currency;
use crate::domain::task::default_task_categories;
use crate::domain::timetable::{sample_classes, weekly_order};
use crate::domain::{BudgetItem, ClassEvent, Expense, Note, Task};
use crate::persistence::{collection_file, keys, Store};
use crate::report::stats::{
    calculate_budget_lines, calculate_category_stats, calculate_expense_stats,
    calculate_note_stats, calculate_task_stats,
};
use chrono::NaiveDate;
use std::fmt::Write;
use std::path::Path;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Everything the summary reads
pub struct SummaryData {
    pub tasks: Vec<Task>,
    pub task_categories: Vec<String>,
    pub notes: Vec<Note>,
    pub expenses: Vec<Expense>,
    pub budget: Vec<BudgetItem>,
    pub classes: Vec<ClassEvent>,
}

impl SummaryData {
    /// Load the collections from `data_dir`, with the same defaults the TUI uses
    pub fn load(data_dir: &Path) -> Self {
        Self {
            tasks: Store::load(collection_file(data_dir, keys::TASKS), Vec::new).into_items(),
            task_categories: Store::load(
                collection_file(data_dir, keys::TASK_CATEGORIES),
                default_task_categories,
            )
            .into_items(),
            notes: Store::load(collection_file(data_dir, keys::NOTES), Vec::new).into_items(),
            expenses: Store::load(collection_file(data_dir, keys::EXPENSES), Vec::new)
                .into_items(),
            budget: Store::load(
                collection_file(data_dir, keys::BUDGET_ITEMS),
                default_budget_items,
            )
            .into_items(),
            classes: Store::load(
                collection_file(data_dir, keys::TIMETABLE_CLASSES),
                sample_classes,
            )
            .into_items(),
        }
    }
}

/// Load the data directory and render its markdown summary
pub fn generate_summary(data_dir: &Path, today: NaiveDate) -> String {
    render_summary(&SummaryData::load(data_dir), today)
}

/// Render the markdown summary
pub fn render_summary(data: &SummaryData, today: NaiveDate) -> String {
    let tasks = calculate_task_stats(&data.tasks, today);
    let categories = calculate_category_stats(&data.tasks, &data.task_categories);
    let notes = calculate_note_stats(&data.notes);
    let expenses = calculate_expense_stats(&data.expenses);
    let budget = calculate_budget_lines(&data.budget, &data.expenses);

    let mut report = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(report, "# UniVerse Summary - {}\n", today);

    // Tasks Section
    report.push_str("## Tasks\n\n");
    let _ = writeln!(
        report,
        "- **Total Tasks:** {} (Active: {}, Completed: {})",
        tasks.total, tasks.active, tasks.completed
    );
    let _ = writeln!(
        report,
        "- **Completion Rate:** {}",
        format_percent(tasks.completion_percent)
    );
    let _ = writeln!(report, "- **Due Today:** {}", tasks.due_today);
    let _ = writeln!(report, "- **Overdue:** {}\n", tasks.overdue);

    if !categories.is_empty() {
        report.push_str("| Category | Tasks | Completed |\n");
        report.push_str("|----------|-------|-----------|\n");
        for stats in &categories {
            let _ = writeln!(
                report,
                "| {} | {} | {} |",
                stats.category, stats.total, stats.completed
            );
        }
        report.push('\n');
    }

    let overdue: Vec<&Task> = data.tasks.iter().filter(|t| t.is_overdue(today)).collect();
    if !overdue.is_empty() {
        report.push_str("### Overdue\n\n");
        for task in overdue {
            let _ = writeln!(
                report,
                "- {} (due {}, {})",
                task.title,
                task.due,
                task.priority.name()
            );
        }
        report.push('\n');
    }

    // Notes Section
    report.push_str("## Notes\n\n");
    let _ = writeln!(report, "- **Total Notes:** {}", data.notes.len());
    for (category, count) in &notes {
        let _ = writeln!(report, "- **{}:** {}", category.name(), count);
    }
    report.push('\n');

    // Expenses Section
    report.push_str("## Expenses\n\n");
    let _ = writeln!(
        report,
        "- **Total Spent:** {} across {} expenses",
        format_currency(expenses.total_spent),
        expenses.count
    );
    if let Some((label, amount)) = &expenses.largest {
        let _ = writeln!(
            report,
            "- **Largest Expense:** {} ({})",
            label,
            format_currency(*amount)
        );
    }
    report.push('\n');

    if !expenses.by_category.is_empty() {
        report.push_str("### By Category\n\n");
        for (category, amount) in &expenses.by_category {
            let share = if expenses.total_spent > 0.0 {
                amount / expenses.total_spent * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                report,
                "- {}: {} ({})",
                category,
                format_currency(*amount),
                format_percent(share)
            );
        }
        report.push('\n');
    }

    if !expenses.by_month.is_empty() {
        report.push_str("### By Month\n\n");
        for (month, amount) in &expenses.by_month {
            let _ = writeln!(report, "- {}: {}", month, format_currency(*amount));
        }
        report.push('\n');
    }

    // Budget Section
    report.push_str("## Budget\n\n");
    report.push_str("| Category | Spent | Budgeted | Progress |\n");
    report.push_str("|----------|-------|----------|----------|\n");
    for line in &budget {
        let flag = if line.is_over() { " ⚠" } else { "" };
        let _ = writeln!(
            report,
            "| {} | {} | {} | {}%{} |",
            line.category,
            format_currency(line.spent),
            format_currency(line.budgeted),
            line.percent,
            flag
        );
    }
    let total_budget: f64 = budget.iter().map(|l| l.budgeted).sum();
    let _ = writeln!(
        report,
        "\n- **Total Budget:** {}\n- **Remaining:** {}",
        format_currency(total_budget),
        format_currency(total_budget - expenses.total_spent)
    );

    // Timetable Section
    report.push_str("\n## Timetable\n\n");
    if data.classes.is_empty() {
        report.push_str("No classes scheduled.\n");
    }
    for class in weekly_order(&data.classes) {
        let _ = write!(
            report,
            "- **{}** {}: {}",
            class.day.name(),
            class.time_range(),
            class.title
        );
        if !class.location.is_empty() {
            let _ = write!(report, " ({})", class.location);
        }
        report.push('\n');
    }

    report
}
