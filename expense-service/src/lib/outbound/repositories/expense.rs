use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::auth::models::UserId;
use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::ExpenseDraft;
use crate::domain::expense::models::ExpenseId;
use crate::domain::expense::ports::ExpenseRepository;

pub struct SqliteExpenseRepository {
    pool: SqlitePool,
}

impl SqliteExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_expense(row: &SqliteRow) -> Expense {
        Expense {
            id: ExpenseId(row.get("id")),
            user_id: UserId(row.get("user_id")),
            title: row.get("title"),
            amount: row.get("amount"),
            category: row.get("category"),
            description: row.get("description"),
            date: row.get("date"),
        }
    }
}

#[async_trait]
impl ExpenseRepository for SqliteExpenseRepository {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Expense>, ExpenseError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, amount, category, description, date
            FROM expenses
            WHERE user_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_expense).collect())
    }

    async fn insert(
        &self,
        user_id: UserId,
        draft: &ExpenseDraft,
        date: &str,
    ) -> Result<Expense, ExpenseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (user_id, title, amount, category, description, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id.0)
        .bind(&draft.title)
        .bind(draft.amount)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        Ok(Expense {
            id: ExpenseId(result.last_insert_rowid()),
            user_id,
            title: draft.title.clone(),
            amount: draft.amount,
            category: draft.category.clone(),
            description: draft.description.clone(),
            date: date.to_string(),
        })
    }

    async fn update(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
        draft: &ExpenseDraft,
        date: &str,
    ) -> Result<Expense, ExpenseError> {
        // Scoping the WHERE to the owner makes a foreign id and a missing
        // id indistinguishable
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET title = ?, amount = ?, category = ?, description = ?, date = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&draft.title)
        .bind(draft.amount)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(date)
        .bind(expense_id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ExpenseError::NotFound);
        }

        Ok(Expense {
            id: expense_id,
            user_id,
            title: draft.title.clone(),
            amount: draft.amount,
            category: draft.category.clone(),
            description: draft.description.clone(),
            date: date.to_string(),
        })
    }

    async fn delete(&self, user_id: UserId, expense_id: ExpenseId) -> Result<(), ExpenseError> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(expense_id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ExpenseError::NotFound);
        }

        Ok(())
    }
}
