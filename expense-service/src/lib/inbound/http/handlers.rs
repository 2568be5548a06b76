use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPair;
use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::ExpenseDraft;

pub mod expenses;
pub mod login;
pub mod refresh;
pub mod register;

pub use expenses::create_expense;
pub use expenses::delete_expense;
pub use expenses::list_expenses;
pub use expenses::update_expense;
pub use login::login;
pub use refresh::refresh;
pub use register::register;

/// Standardized API success response.
///
/// Serializes the payload directly as the response body, so collection
/// endpoints produce bare JSON arrays.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UsernameAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::InvalidRefreshToken
            | AuthError::RefreshMismatch => ApiError::Unauthorized(err.to_string()),
            AuthError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::InvalidUsername(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::DatabaseError(msg) | AuthError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NotFound => ApiError::NotFound(err.to_string()),
            ExpenseError::DatabaseError(msg) => ApiError::InternalServerError(msg),
        }
    }
}

/// Response body shared by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<&TokenPair> for TokenResponseData {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
            expires_in: pair.expires_in,
            token_type: "bearer".to_string(),
        }
    }
}

/// HTTP request body carrying the caller-supplied expense fields (raw JSON).
///
/// Extra fields such as a client-chosen id or date are ignored; the server
/// assigns both.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRequestBody {
    title: String,
    amount: f64,
    category: String,
    description: String,
}

impl ExpenseRequestBody {
    pub fn into_draft(self) -> ExpenseDraft {
        ExpenseDraft {
            title: self.title,
            amount: self.amount,
            category: self.category,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseResponseData {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}

impl From<&Expense> for ExpenseResponseData {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.0,
            title: expense.title.clone(),
            amount: expense.amount,
            category: expense.category.clone(),
            description: expense.description.clone(),
            date: expense.date.clone(),
        }
    }
}
