use thiserror::Error;
use uuid::Uuid;

/// User-input failures. Shown inline in the status line; never mutate state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Category \"{0}\" already exists")]
    DuplicateCategory(String),

    #[error("Please enter a valid amount greater than zero")]
    NonPositiveAmount,

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Default category \"{0}\" cannot be deleted")]
    DefaultCategory(String),

    #[error("End time must be after start time")]
    InvalidTimeRange,

    #[error("Could not read {field}: \"{value}\"")]
    Unparsable { field: &'static str, value: String },

    #[error("No record with id {0}")]
    UnknownRecord(Uuid),

    #[error("A record with id {0} already exists")]
    DuplicateId(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::EmptyField("Task title").to_string(),
            "Task title cannot be empty"
        );
        assert_eq!(
            ValidationError::DuplicateCategory("Reading".to_string()).to_string(),
            "Category \"Reading\" already exists"
        );
        assert_eq!(
            ValidationError::DefaultCategory("Food".to_string()).to_string(),
            "Default category \"Food\" cannot be deleted"
        );
        assert_eq!(
            ValidationError::Unparsable {
                field: "amount",
                value: "abc".to_string()
            }
            .to_string(),
            "Could not read amount: \"abc\""
        );
    }
}
