use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::expense::ports::ExpenseServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ExpenseResponseData;
use crate::inbound::http::router::AppState;

pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ExpenseResponseData>>, ApiError> {
    state
        .expense_service
        .list(auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|expenses| {
            let expense_data: Vec<ExpenseResponseData> =
                expenses.iter().map(|e| e.into()).collect();
            ApiSuccess::new(StatusCode::OK, expense_data)
        })
}
