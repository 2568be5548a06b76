use serde::Deserialize;
use serde::Serialize;

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// A stored expense as the service returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}

/// Caller-supplied fields for creating or updating an expense.
///
/// The service assigns the id and the recording date itself.
#[derive(Debug, Clone, Serialize)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Confirmation body from registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub msg: String,
}

/// Confirmation body from expense deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    pub detail: String,
}
