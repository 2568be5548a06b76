use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;

use crate::domain::auth::models::UserId;
use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::ExpenseDraft;
use crate::domain::expense::models::ExpenseId;
use crate::domain::expense::ports::ExpenseRepository;
use crate::domain::expense::ports::ExpenseServicePort;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Domain service implementation for expense operations.
///
/// Stamps recording times in local time so both create and update carry
/// the moment they hit the server.
pub struct ExpenseService<ER>
where
    ER: ExpenseRepository,
{
    expenses: Arc<ER>,
}

impl<ER> ExpenseService<ER>
where
    ER: ExpenseRepository,
{
    pub fn new(expenses: Arc<ER>) -> Self {
        Self { expenses }
    }

    fn timestamp() -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }
}

#[async_trait]
impl<ER> ExpenseServicePort for ExpenseService<ER>
where
    ER: ExpenseRepository,
{
    async fn list(&self, user_id: UserId) -> Result<Vec<Expense>, ExpenseError> {
        self.expenses.list_for_user(user_id).await
    }

    async fn create(&self, user_id: UserId, draft: ExpenseDraft) -> Result<Expense, ExpenseError> {
        let date = Self::timestamp();
        self.expenses.insert(user_id, &draft, &date).await
    }

    async fn update(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseError> {
        // An update counts as a new recording, so the timestamp moves too
        let date = Self::timestamp();
        self.expenses
            .update(user_id, expense_id, &draft, &date)
            .await
    }

    async fn delete(&self, user_id: UserId, expense_id: ExpenseId) -> Result<(), ExpenseError> {
        self.expenses.delete(user_id, expense_id).await
    }
}
