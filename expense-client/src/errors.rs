use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, timeout, bad URL.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No token pair is stored; the caller must log in first.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The token file could not be read or written.
    #[error("Token storage error: {0}")]
    Storage(String),
}
