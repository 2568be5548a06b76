use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username and plain password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials and hand out a token pair.
    ///
    /// Returns the stored pair as long as its access token has not expired,
    /// so repeated logins are idempotent; otherwise discards the stale pair
    /// and mints a fresh one.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<TokenPair, AuthError>;

    /// Trade a refresh token for a new access token.
    ///
    /// The presented token must be a well-signed refresh token and must match
    /// the stored one byte for byte. The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is invalid, expired, or not a refresh token
    /// * `UserNotFound` - The subject no longer exists
    /// * `RefreshMismatch` - Token does not match the stored session
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Resolve a bearer token to the user it was issued to.
    ///
    /// Purely token-based: the stored session is not consulted, so access
    /// tokens stay valid until their own expiry.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, expired, or missing a subject
    /// * `UserNotFound` - The subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn authorize(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Persistence operations for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password_hash` - Password hash in PHC string format
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, username: &Username, password_hash: &str) -> Result<User, AuthError>;

    /// Retrieve a user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Resolve a username to its user id.
    ///
    /// Takes a plain `&str` because the username here comes out of token
    /// claims rather than validated input.
    ///
    /// # Returns
    /// Optional user id (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_id_by_username(&self, username: &str) -> Result<Option<UserId>, AuthError>;
}

/// Persistence operations for stored token pairs.
///
/// One row per user; every operation is a single SQL statement so the store
/// needs no surrounding transactions.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Retrieve the session for a user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Session>, AuthError>;

    /// Insert the session, replacing any existing row for the same user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert(&self, session: &Session) -> Result<(), AuthError>;

    /// Remove the session for a user. Removing a missing row is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, user_id: UserId) -> Result<(), AuthError>;

    /// Update only the access-token fields, leaving the refresh token as is.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_access_token(
        &self,
        user_id: UserId,
        access_token: &str,
        expires_at: i64,
    ) -> Result<(), AuthError>;
}
