use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::expense::models::ExpenseId;
use crate::domain::expense::ports::ExpenseServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(expense_id): Path<i64>,
) -> Result<ApiSuccess<DeleteResponseData>, ApiError> {
    state
        .expense_service
        .delete(auth_user.user_id, ExpenseId(expense_id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, DeleteResponseData::deleted()))
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponseData {
    pub detail: String,
}

impl DeleteResponseData {
    fn deleted() -> Self {
        Self {
            detail: "Expense deleted successfully".to_string(),
        }
    }
}
