use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_expense;
use super::handlers::delete_expense;
use super::handlers::list_expenses;
use super::handlers::login;
use super::handlers::refresh;
use super::handlers::register;
use super::handlers::update_expense;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::service::AuthService;
use crate::domain::expense::service::ExpenseService;
use crate::outbound::repositories::SqliteExpenseRepository;
use crate::outbound::repositories::SqliteSessionRepository;
use crate::outbound::repositories::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<SqliteUserRepository, SqliteSessionRepository>>,
    pub expense_service: Arc<ExpenseService<SqliteExpenseRepository>>,
}

pub fn create_router(
    auth_service: Arc<AuthService<SqliteUserRepository, SqliteSessionRepository>>,
    expense_service: Arc<ExpenseService<SqliteExpenseRepository>>,
) -> Router {
    let state = AppState {
        auth_service,
        expense_service,
    };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh));

    // The expense collection answers with and without the trailing slash
    let protected_routes = Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/", get(list_expenses))
        .route("/expenses/", post(create_expense))
        .route("/expenses/:expense_id", put(update_expense))
        .route("/expenses/:expense_id", delete(delete_expense))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Bearer tokens ride in headers, so spans record the request line only
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
