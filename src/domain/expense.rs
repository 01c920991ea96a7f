use super::fields::required;
use crate::errors::ValidationError;
use crate::persistence::Record;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 9] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Education",
    "Housing",
    "Utilities",
    "Health",
    "Shopping",
    "Other",
];

/// Category used when the user leaves it blank
pub const FALLBACK_CATEGORY: &str = "Other";

/// Built-in categories stay available; they can be renamed but not deleted
pub fn is_default_category(name: &str) -> bool {
    DEFAULT_EXPENSE_CATEGORIES.contains(&name)
}

/// A single spending record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Build an expense. The amount must be strictly positive.
    pub fn new(
        amount: f64,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ValidationError::NonPositiveAmount);
        }
        let category = match category.trim() {
            "" => FALLBACK_CATEGORY.to_string(),
            name => name.to_string(),
        };
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            category,
            description: description.trim().to_string(),
            date,
        })
    }
}

impl Record for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Planned monthly spending for one category. Spent amounts are derived from expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: Uuid,
    pub category: String,
    #[serde(default)]
    pub budgeted: f64,
}

impl BudgetItem {
    /// Build a budget line, rejecting blank or duplicate (case-insensitive) categories
    pub fn new(
        category: &str,
        budgeted: f64,
        existing: &[BudgetItem],
    ) -> Result<Self, ValidationError> {
        let category = required("Category name", category)?;
        if existing
            .iter()
            .any(|item| item.category.to_lowercase() == category.to_lowercase())
        {
            return Err(ValidationError::DuplicateCategory(category));
        }
        validate_budget_amount(budgeted)?;
        Ok(Self {
            id: Uuid::new_v4(),
            category,
            budgeted,
        })
    }

    /// Rename the category. The new name must be non-blank and not used by any
    /// other line (case-insensitive); keeping the current name is fine.
    pub fn rename(&mut self, name: &str, existing: &[BudgetItem]) -> Result<(), ValidationError> {
        let name = required("Category name", name)?;
        if existing
            .iter()
            .any(|item| item.id != self.id && item.category.to_lowercase() == name.to_lowercase())
        {
            return Err(ValidationError::DuplicateCategory(name));
        }
        self.category = name;
        Ok(())
    }

    /// Default categories cannot be deleted
    pub fn ensure_deletable(&self) -> Result<(), ValidationError> {
        if is_default_category(&self.category) {
            return Err(ValidationError::DefaultCategory(self.category.clone()));
        }
        Ok(())
    }

    pub fn set_budgeted(&mut self, budgeted: f64) -> Result<(), ValidationError> {
        validate_budget_amount(budgeted)?;
        self.budgeted = budgeted;
        Ok(())
    }
}

impl Record for BudgetItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn validate_budget_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(())
}

/// One zero-budget line per default category
pub fn default_budget_items() -> Vec<BudgetItem> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|category| BudgetItem {
            id: Uuid::new_v4(),
            category: category.to_string(),
            budgeted: 0.0,
        })
        .collect()
}

/// Move every expense filed under `from` to `to`
pub fn rename_expense_category(expenses: &mut [Expense], from: &str, to: &str) {
    for expense in expenses.iter_mut().filter(|e| e.category == from) {
        expense.category = to.to_string();
    }
}

pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_budget(items: &[BudgetItem]) -> f64 {
    items.iter().map(|i| i.budgeted).sum()
}

/// Sum of expense amounts per category
pub fn spent_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Sum of expense amounts per calendar month, oldest first, labelled "Mon YYYY"
pub fn monthly_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for expense in expenses {
        *months
            .entry((expense.date.year(), expense.date.month()))
            .or_insert(0.0) += expense.amount;
    }

    months
        .into_iter()
        .filter_map(|((year, month), amount)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some((first.format("%b %Y").to_string(), amount))
        })
        .collect()
}

/// Percentage of the budget spent, capped at 100. Zero budget reads as 0%.
pub fn budget_progress(spent: f64, budgeted: f64) -> u16 {
    if budgeted <= 0.0 {
        return 0;
    }
    ((spent / budgeted) * 100.0).round().clamp(0.0, 100.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, category: &str, when: NaiveDate) -> Expense {
        Expense::new(amount, category, "", when).unwrap()
    }

    #[test]
    fn test_expense_requires_positive_amount() {
        let today = date(2024, 2, 1);
        assert_eq!(
            Expense::new(0.0, "Food", "", today),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            Expense::new(-4.0, "Food", "", today),
            Err(ValidationError::NonPositiveAmount)
        );
        assert!(Expense::new(f64::NAN, "Food", "", today).is_err());
    }

    #[test]
    fn test_blank_category_falls_back_to_other() {
        let e = expense(3.0, "  ", date(2024, 2, 1));
        assert_eq!(e.category, "Other");
    }

    #[test]
    fn test_spent_by_category_and_totals() {
        let expenses = vec![
            expense(12.0, "Food", date(2024, 1, 3)),
            expense(8.5, "Food", date(2024, 1, 9)),
            expense(40.0, "Education", date(2024, 2, 2)),
        ];
        let totals = spent_by_category(&expenses);
        assert_eq!(totals.get("Food"), Some(&20.5));
        assert_eq!(totals.get("Education"), Some(&40.0));
        assert_eq!(total_spent(&expenses), 60.5);
    }

    #[test]
    fn test_monthly_totals_are_chronological() {
        let expenses = vec![
            expense(5.0, "Food", date(2024, 3, 1)),
            expense(10.0, "Food", date(2023, 12, 24)),
            expense(2.5, "Food", date(2024, 3, 30)),
        ];
        assert_eq!(
            monthly_totals(&expenses),
            vec![("Dec 2023".to_string(), 10.0), ("Mar 2024".to_string(), 7.5)]
        );
    }

    #[test]
    fn test_budget_item_validation() {
        let existing = default_budget_items();
        assert_eq!(
            BudgetItem::new("food", 10.0, &existing),
            Err(ValidationError::DuplicateCategory("food".to_string()))
        );
        assert_eq!(
            BudgetItem::new("Books", -1.0, &existing),
            Err(ValidationError::NegativeAmount)
        );
        assert_eq!(
            BudgetItem::new("", 1.0, &existing),
            Err(ValidationError::EmptyField("Category name"))
        );
        let books = BudgetItem::new(" Books ", 0.0, &existing).unwrap();
        assert_eq!(books.category, "Books");
    }

    #[test]
    fn test_rename_skips_itself_when_checking_duplicates() {
        let items = default_budget_items();
        let mut food = items[0].clone();

        food.rename("FOOD", &items).unwrap();
        assert_eq!(food.category, "FOOD");

        assert_eq!(
            food.rename("housing", &items),
            Err(ValidationError::DuplicateCategory("housing".to_string()))
        );
        assert_eq!(
            food.rename("  ", &items),
            Err(ValidationError::EmptyField("Category name"))
        );
        assert_eq!(food.category, "FOOD");

        food.rename(" Groceries ", &items).unwrap();
        assert_eq!(food.category, "Groceries");
    }

    #[test]
    fn test_default_categories_cannot_be_deleted() {
        let items = default_budget_items();
        for item in &items {
            assert_eq!(
                item.ensure_deletable(),
                Err(ValidationError::DefaultCategory(item.category.clone()))
            );
        }
        let books = BudgetItem::new("Books", 0.0, &items).unwrap();
        assert_eq!(books.ensure_deletable(), Ok(()));
        assert!(is_default_category("Other"));
        assert!(!is_default_category("other"));
    }

    #[test]
    fn test_rename_expense_category() {
        let mut expenses = vec![
            expense(4.0, "Food", date(2024, 1, 1)),
            expense(9.0, "Health", date(2024, 1, 2)),
        ];
        rename_expense_category(&mut expenses, "Food", "Groceries");
        assert_eq!(expenses[0].category, "Groceries");
        assert_eq!(expenses[1].category, "Health");
    }

    #[test]
    fn test_set_budgeted_rejects_negative() {
        let mut item = BudgetItem::new("Books", 50.0, &[]).unwrap();
        assert!(item.set_budgeted(-5.0).is_err());
        assert_eq!(item.budgeted, 50.0);
        item.set_budgeted(75.0).unwrap();
        assert_eq!(item.budgeted, 75.0);
    }

    #[test]
    fn test_budget_progress() {
        assert_eq!(budget_progress(50.0, 0.0), 0);
        assert_eq!(budget_progress(25.0, 100.0), 25);
        assert_eq!(budget_progress(33.333, 100.0), 33);
        assert_eq!(budget_progress(250.0, 100.0), 100);
    }

    #[test]
    fn test_default_budget_items() {
        let items = default_budget_items();
        assert_eq!(items.len(), 9);
        assert_eq!(total_budget(&items), 0.0);
        assert_eq!(items[8].category, "Other");
    }
}
