use async_trait::async_trait;

use crate::domain::auth::models::UserId;
use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::ExpenseDraft;
use crate::domain::expense::models::ExpenseId;

/// Port for expense operations.
///
/// Every operation is scoped to an already-authenticated user; callers
/// pass the `UserId` resolved by the authorization layer and can never
/// reach another user's rows.
#[async_trait]
pub trait ExpenseServicePort: Send + Sync + 'static {
    /// List the user's expenses, most recently dated first.
    async fn list(&self, user_id: UserId) -> Result<Vec<Expense>, ExpenseError>;

    /// Record a new expense for the user.
    ///
    /// The service stamps the recording time; the draft carries only the
    /// caller-supplied fields.
    ///
    /// # Returns
    /// The stored expense with its assigned identifier and timestamp.
    async fn create(&self, user_id: UserId, draft: ExpenseDraft) -> Result<Expense, ExpenseError>;

    /// Replace every caller-supplied field of an existing expense and
    /// refresh its timestamp.
    ///
    /// # Errors
    /// * `ExpenseError::NotFound` - No such expense for this user
    async fn update(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseError>;

    /// Delete an expense.
    ///
    /// # Errors
    /// * `ExpenseError::NotFound` - No such expense for this user
    async fn delete(&self, user_id: UserId, expense_id: ExpenseId) -> Result<(), ExpenseError>;
}

/// Repository port for expense persistence.
#[async_trait]
pub trait ExpenseRepository: Send + Sync + 'static {
    /// Fetch all expenses for a user ordered by `date` descending.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Expense>, ExpenseError>;

    /// Insert a new expense row and return it with the assigned id.
    async fn insert(
        &self,
        user_id: UserId,
        draft: &ExpenseDraft,
        date: &str,
    ) -> Result<Expense, ExpenseError>;

    /// Overwrite the row matching both `expense_id` and `user_id`.
    ///
    /// # Errors
    /// * `ExpenseError::NotFound` - No row matched the scoped update
    async fn update(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
        draft: &ExpenseDraft,
        date: &str,
    ) -> Result<Expense, ExpenseError>;

    /// Delete the row matching both `expense_id` and `user_id`.
    ///
    /// # Errors
    /// * `ExpenseError::NotFound` - No row matched the scoped delete
    async fn delete(&self, user_id: UserId, expense_id: ExpenseId) -> Result<(), ExpenseError>;
}
