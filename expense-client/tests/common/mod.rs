use std::path::PathBuf;
use std::sync::Arc;

use auth::JwtHandler;
use chrono::Duration;
use expense_client::ApiClient;
use expense_client::TokenStore;
use expense_service::domain::auth::service::AuthService;
use expense_service::domain::auth::service::TokenTtls;
use expense_service::domain::expense::service::ExpenseService;
use expense_service::inbound::http::router::create_router;
use expense_service::outbound::repositories::SqliteExpenseRepository;
use expense_service::outbound::repositories::SqliteSessionRepository;
use expense_service::outbound::repositories::SqliteUserRepository;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-process expense service plus a scratch directory for token files
pub struct TestService {
    pub address: String,
    dir: TempDir,
}

impl TestService {
    /// Spawn the service with production-like token lifetimes
    pub async fn spawn() -> Self {
        Self::spawn_with_ttls(TokenTtls {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        })
        .await
    }

    /// Spawn the service with custom token lifetimes, for expiry scenarios
    /// that have to play out in wall-clock seconds
    pub async fn spawn_with_ttls(ttls: TokenTtls) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("expenses-test.db");

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");
        expense_service::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let auth_service = Arc::new(AuthService::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool.clone())),
            JwtHandler::new(TEST_JWT_SECRET),
            ttls,
        ));
        let expense_service = Arc::new(ExpenseService::new(Arc::new(
            SqliteExpenseRepository::new(pool),
        )));

        let router = create_router(auth_service, expense_service);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self { address, dir }
    }

    /// Path of the token file clients persist to
    pub fn token_path(&self) -> PathBuf {
        self.dir.path().join("tokens.json")
    }

    /// A client wired to this service, picking up whatever the token file holds
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.address.clone(), TokenStore::open(self.token_path()))
            .expect("Failed to build client")
    }
}
