use std::fmt;

use crate::domain::auth::models::UserId;

/// Unique identifier for an expense, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpenseId(pub i64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded expense owned by a single user.
///
/// The `date` field holds the server-stamped recording time formatted as
/// `YYYY-MM-DD HH:MM:SS`, which also gives the lexicographic sort order
/// used for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}

/// Caller-supplied fields for creating or replacing an expense.
///
/// The identifier, owner and timestamp never come from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}
