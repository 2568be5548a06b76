use std::str::FromStr;
use std::sync::Arc;

use auth::JwtHandler;
use chrono::Duration;
use expense_service::config::Config;
use expense_service::config::DEV_JWT_SECRET;
use expense_service::domain::auth::service::AuthService;
use expense_service::domain::auth::service::TokenTtls;
use expense_service::domain::expense::service::ExpenseService;
use expense_service::inbound::http::router::create_router;
use expense_service::outbound::repositories::SqliteExpenseRepository;
use expense_service::outbound::repositories::SqliteSessionRepository;
use expense_service::outbound::repositories::SqliteUserRepository;
use jsonwebtoken::Algorithm;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "expense-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        "Configuration loaded"
    );

    if config.jwt.secret == DEV_JWT_SECRET {
        tracing::warn!("Running with the built-in development JWT secret; set JWT__SECRET to override");
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "sqlite",
        "Database connection pool created"
    );

    expense_service::MIGRATOR.run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let algorithm: Algorithm = config.jwt.algorithm.parse()?;
    let jwt = JwtHandler::new(config.jwt.secret.as_bytes()).with_algorithm(algorithm);
    let ttls = TokenTtls {
        access: Duration::minutes(config.jwt.access_ttl_minutes),
        refresh: Duration::days(config.jwt.refresh_ttl_days),
    };

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_repository = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let expense_repository = Arc::new(SqliteExpenseRepository::new(pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        session_repository,
        jwt,
        ttls,
    ));
    let expense_service = Arc::new(ExpenseService::new(expense_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, expense_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
