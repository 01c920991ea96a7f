use crate::app::AppState;
use crate::domain::expense::{
    budget_progress, monthly_totals, spent_by_category, total_budget, total_spent,
};
use crate::domain::fields::format_currency;
use crate::domain::{Expense, ExpenseView};
use crate::ui::styles::{
    border_style, default_style, gauge_style, hint_style, info_style, selected_style, tag_style,
    title_style, warning_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const BAR_WIDTH: usize = 20;

/// Text progress bar, e.g. "██████░░░░" for 60% at width 10
pub fn progress_bar(percent: u16, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn pane_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()))
}

/// Render the Expenses tab: view selector and totals, then the active view
pub fn render_expenses_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_summary(f, app, chunks[0]);

    match app.expense_view {
        ExpenseView::Tracker => render_tracker(f, app, chunks[1]),
        ExpenseView::Budget => render_budget(f, app, chunks[1]),
        ExpenseView::Analytics => render_analytics(f, app, chunks[1]),
    }
}

fn render_summary(f: &mut Frame, app: &AppState, area: Rect) {
    let spent = total_spent(app.expenses.items());
    let budget = total_budget(app.budget.items());
    let remaining = budget - spent;

    let mut spans = Vec::new();
    for view in [
        ExpenseView::Tracker,
        ExpenseView::Budget,
        ExpenseView::Analytics,
    ] {
        let style = if view == app.expense_view {
            selected_style()
        } else {
            hint_style()
        };
        spans.push(Span::styled(format!(" {} ", view.name()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("   Spent "));
    spans.push(Span::styled(format_currency(spent), title_style()));
    spans.push(Span::raw("   Budget "));
    spans.push(Span::styled(format_currency(budget), title_style()));
    spans.push(Span::raw("   Remaining "));
    spans.push(Span::styled(
        format_currency(remaining),
        if remaining < 0.0 {
            warning_style()
        } else {
            info_style()
        },
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(pane_block(" Expenses ".to_string())),
        area,
    );
}

fn create_expense_line(expense: &Expense) -> Line<'static> {
    let description = if expense.description.is_empty() {
        "-".to_string()
    } else {
        expense.description.clone()
    };
    Line::from(vec![
        Span::styled(expense.date.format("%Y-%m-%d  ").to_string(), hint_style()),
        Span::styled(format!("{:<16}", expense.category), tag_style()),
        Span::styled(format!("{:<30}", description), default_style()),
        Span::styled(format!("{:>12}", format_currency(expense.amount)), title_style()),
    ])
}

fn render_tracker(f: &mut Frame, app: &AppState, area: Rect) {
    let expenses = app.expenses.items();
    let items: Vec<ListItem> = if expenses.is_empty() {
        vec![ListItem::new(Line::styled(
            "  No expenses recorded. Press 'a' to add one.",
            hint_style(),
        ))]
    } else {
        expenses
            .iter()
            .map(|e| ListItem::new(create_expense_line(e)))
            .collect()
    };

    let list = List::new(items)
        .block(pane_block(format!(" Recent Expenses ({}) ", expenses.len())))
        .highlight_style(selected_style());
    let mut state = ListState::default();
    if !expenses.is_empty() {
        state.select(Some(app.expense_selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_budget(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .budget
        .items()
        .iter()
        .map(|item| {
            let spent = app.spent_for(&item.category);
            let percent = budget_progress(spent, item.budgeted);
            let over = item.budgeted > 0.0 && spent > item.budgeted;
            let bar_style = if over { warning_style() } else { gauge_style() };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", item.category), tag_style()),
                Span::raw(format!(
                    "{:>11} / {:<11} ",
                    format_currency(spent),
                    format_currency(item.budgeted)
                )),
                Span::styled(progress_bar(percent, BAR_WIDTH), bar_style),
                Span::raw(format!(" {:>3}%", percent)),
                if over {
                    Span::styled("  over budget", warning_style())
                } else {
                    Span::raw("")
                },
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" Monthly Budget ".to_string()))
        .highlight_style(selected_style());
    let mut state = ListState::default();
    if !app.budget.is_empty() {
        state.select(Some(app.budget_selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_analytics(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Spending share per category
    let total = total_spent(app.expenses.items());
    let mut by_category: Vec<(String, f64)> =
        spent_by_category(app.expenses.items()).into_iter().collect();
    by_category.sort_by(|a, b| b.1.total_cmp(&a.1));

    let lines: Vec<Line> = if by_category.is_empty() {
        vec![Line::styled("No spending yet.", hint_style())]
    } else {
        by_category
            .iter()
            .map(|(category, spent)| {
                let share = if total > 0.0 {
                    (spent / total * 100.0).round() as u16
                } else {
                    0
                };
                Line::from(vec![
                    Span::styled(format!("{:<16}", category), tag_style()),
                    Span::styled(progress_bar(share, BAR_WIDTH), gauge_style()),
                    Span::raw(format!(" {:>3}%  {}", share, format_currency(*spent))),
                ])
            })
            .collect()
    };
    f.render_widget(
        Paragraph::new(lines).block(pane_block(" Spending by Category ".to_string())),
        chunks[0],
    );

    // Monthly totals, whole dollars
    let monthly = monthly_totals(app.expenses.items());
    let data: Vec<(&str, u64)> = monthly
        .iter()
        .map(|(label, amount)| (label.as_str(), amount.round().max(0.0) as u64))
        .collect();
    let chart = BarChart::default()
        .block(pane_block(" Monthly Spending ".to_string()))
        .data(data.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, chunks[1]);
}
