use thiserror::Error;

pub const MISSING_FIELDS: &str = "Please fill in all fields";

/// Business errors for expense workflows. Storage causes are logged by the
/// service and collapsed into one variant per operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    #[error("{0}")]
    Validation(String),
    #[error("Expense not found")]
    NotFound,
    #[error("Not authorized")]
    Unauthorized,
    #[error("Couldn't create expense")]
    CreateFailed,
    #[error("Couldn't fetch expenses")]
    FetchFailed,
    #[error("Couldn't delete expense")]
    DeleteFailed,
}

impl ExpenseError {
    pub fn missing_fields() -> Self { Self::Validation(MISSING_FIELDS.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ExpenseError::Validation(_) => 2001,
            ExpenseError::NotFound => 2002,
            ExpenseError::Unauthorized => 2003,
            ExpenseError::CreateFailed => 2101,
            ExpenseError::FetchFailed => 2102,
            ExpenseError::DeleteFailed => 2103,
        }
    }
}
