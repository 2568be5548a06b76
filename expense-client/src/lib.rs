//! HTTP client for the expense service
//!
//! Wraps the service's REST interface in typed calls:
//! - Registration, login, and token refresh
//! - Expense listing, creation, update, and deletion
//!
//! Tokens persist in a JSON file between runs, so a new process picks up
//! the previous session. When the service rejects an access token, the
//! client refreshes it once and replays the request; only a failed refresh
//! surfaces to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use expense_client::ApiClient;
//! use expense_client::NewExpense;
//! use expense_client::TokenStore;
//!
//! # async fn run() -> Result<(), expense_client::ClientError> {
//! let store = TokenStore::open("tokens.json");
//! let mut client = ApiClient::new("http://localhost:9000", store)?;
//!
//! client.login("alice", "hunter2").await?;
//! client
//!     .add_expense(&NewExpense {
//!         title: "Groceries".to_string(),
//!         amount: 42.50,
//!         category: "Food".to_string(),
//!         description: "Weekly shop".to_string(),
//!     })
//!     .await?;
//!
//! let expenses = client.list_expenses().await?;
//! println!("{} expenses on record", expenses.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod errors;
pub mod models;
pub mod store;

// Re-export commonly used items
pub use api::ApiClient;
pub use errors::ClientError;
pub use models::DeleteResponse;
pub use models::Expense;
pub use models::NewExpense;
pub use models::RegisterResponse;
pub use models::TokenResponse;
pub use store::StoredTokens;
pub use store::TokenStore;
