use thiserror::Error;

/// Errors that can occur during expense operations.
#[derive(Debug, Clone, Error)]
pub enum ExpenseError {
    /// The expense does not exist or belongs to another user. The two
    /// cases are deliberately indistinguishable.
    #[error("Expense not found or unauthorized")]
    NotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}
