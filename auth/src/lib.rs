//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the expense service:
//! - Password hashing (Argon2id)
//! - JWT access/refresh token issuing and validation
//!
//! The service defines its own authentication ports and adapts these
//! implementations, keeping domain logic decoupled from crypto plumbing.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::Claims;
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Issue a short-lived access token
//! let signed = handler
//!     .issue(Claims::access("alice"), Duration::minutes(15))
//!     .unwrap();
//!
//! // Validate it
//! let decoded: Claims = handler.decode(&signed.token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice"));
//! assert!(!decoded.is_refresh());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SignedToken;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
