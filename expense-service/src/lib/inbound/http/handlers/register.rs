use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, RegisterResponseData::registered()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequestBody {
    username: String,
    password: String,
}

impl RegisterUserRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, AuthError> {
        let username = Username::new(self.username)?;
        Ok(RegisterUserCommand::new(username, self.password))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponseData {
    pub msg: String,
}

impl RegisterResponseData {
    fn registered() -> Self {
        Self {
            msg: "User registered successfully".to_string(),
        }
    }
}
