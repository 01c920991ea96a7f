use super::fields::required;
use crate::errors::ValidationError;
use crate::persistence::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories offered before the user adds their own
pub const DEFAULT_TASK_CATEGORIES: [&str; 5] = [
    "Homework",
    "Exam Preparation",
    "Projects",
    "Reading",
    "Miscellaneous",
];

pub fn default_task_categories() -> Vec<String> {
    DEFAULT_TASK_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse from "low" / "medium" / "high" (any case)
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "" | "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::Unparsable {
                field: "priority",
                value: other.to_string(),
            }),
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub due: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    pub category: String,
}

impl Task {
    /// Build a task, rejecting a blank title
    pub fn new(
        title: &str,
        due: NaiveDate,
        priority: Priority,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let title = required("Task title", title)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            completed: false,
            due,
            priority,
            category: category.trim().to_string(),
        })
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Past due and still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due < today && !self.completed
    }
}

impl Record for Task {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Validate a new task category name against the existing list
pub fn validate_new_category(existing: &[String], name: &str) -> Result<String, ValidationError> {
    let name = required("Category name", name)?;
    if existing.iter().any(|c| *c == name) {
        return Err(ValidationError::DuplicateCategory(name));
    }
    Ok(name)
}

/// Which tasks the list shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
    Today,
    /// Due after today
    Upcoming,
    /// Due before today and not completed
    Overdue,
    Category(String),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
            TaskFilter::Today => task.due == today,
            TaskFilter::Upcoming => task.due > today,
            TaskFilter::Overdue => task.is_overdue(today),
            TaskFilter::Category(category) => task.category == *category,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TaskFilter::All => "All".to_string(),
            TaskFilter::Active => "Active".to_string(),
            TaskFilter::Completed => "Completed".to_string(),
            TaskFilter::Today => "Today".to_string(),
            TaskFilter::Upcoming => "Upcoming".to_string(),
            TaskFilter::Overdue => "Overdue".to_string(),
            TaskFilter::Category(category) => category.clone(),
        }
    }

    /// Next filter in the cycle: the fixed filters, then each category, then back to All
    pub fn next(&self, categories: &[String]) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Active,
            TaskFilter::Active => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::Today,
            TaskFilter::Today => TaskFilter::Upcoming,
            TaskFilter::Upcoming => TaskFilter::Overdue,
            TaskFilter::Overdue => categories
                .first()
                .map(|c| TaskFilter::Category(c.clone()))
                .unwrap_or(TaskFilter::All),
            TaskFilter::Category(current) => {
                let position = categories.iter().position(|c| c == current);
                match position.and_then(|i| categories.get(i + 1)) {
                    Some(next) => TaskFilter::Category(next.clone()),
                    None => TaskFilter::All,
                }
            }
        }
    }
}

/// Tasks matching `filter`, in list order
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter, today: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t, today)).collect()
}
