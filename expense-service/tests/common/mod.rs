use std::sync::Arc;

use auth::JwtHandler;
use chrono::Duration;
use expense_service::domain::auth::service::AuthService;
use expense_service::domain::auth::service::TokenTtls;
use expense_service::domain::expense::service::ExpenseService;
use expense_service::inbound::http::router::create_router;
use expense_service::outbound::repositories::SqliteExpenseRepository;
use expense_service::outbound::repositories::SqliteSessionRepository;
use expense_service::outbound::repositories::SqliteUserRepository;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Test database helper backed by a file in a temporary directory
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    /// Spawn the application with production-like token lifetimes
    pub async fn spawn() -> Self {
        Self::spawn_with_ttls(TokenTtls {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        })
        .await
    }

    /// Spawn the application with custom token lifetimes, for expiry
    /// scenarios that have to play out in wall-clock seconds
    pub async fn spawn_with_ttls(ttls: TokenTtls) -> Self {
        let db = TestDb::new().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(SqliteUserRepository::new(db.pool.clone()));
        let session_repo = Arc::new(SqliteSessionRepository::new(db.pool.clone()));
        let expense_repo = Arc::new(SqliteExpenseRepository::new(db.pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo,
            session_repo,
            JwtHandler::new(TEST_JWT_SECRET),
            ttls,
        ));
        let expense_service = Arc::new(ExpenseService::new(expense_repo));

        let router = create_router(auth_service, expense_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and log in, returning (access_token, refresh_token)
    pub async fn register_and_login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .post("/register")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let response = self
            .post("/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["access_token"]
                .as_str()
                .expect("Missing access_token")
                .to_string(),
            body["refresh_token"]
                .as_str()
                .expect("Missing refresh_token")
                .to_string(),
        )
    }

    /// Look up a user's id directly in the database
    pub async fn user_id(&self, username: &str) -> i64 {
        let (id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.db.pool)
            .await
            .expect("Failed to fetch user id");
        id
    }
}

impl TestDb {
    /// Create a fresh migrated database in its own temporary directory
    pub async fn new() -> Self {
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

        Self { pool, _dir: dir }
    }
}
