use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::expense::ports::ExpenseServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ExpenseRequestBody;
use crate::inbound::http::handlers::ExpenseResponseData;
use crate::inbound::http::router::AppState;

pub async fn create_expense(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<ExpenseRequestBody>,
) -> Result<ApiSuccess<ExpenseResponseData>, ApiError> {
    state
        .expense_service
        .create(auth_user.user_id, body.into_draft())
        .await
        .map_err(ApiError::from)
        .map(|ref expense| ApiSuccess::new(StatusCode::OK, expense.into()))
}
