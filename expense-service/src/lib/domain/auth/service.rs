use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::SessionRepository;
use crate::domain::auth::ports::UserRepository;

/// Token lifetimes applied when minting new pairs.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtls {
    pub access: Duration,
    pub refresh: Duration,
}

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// The JWT handler and token lifetimes are injected so tests can run with
/// second-scale expirations.
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    jwt: auth::JwtHandler,
    password_hasher: auth::PasswordHasher,
    ttls: TokenTtls,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - Credential persistence implementation
    /// * `sessions` - Token pair persistence implementation
    /// * `jwt` - Configured token signer/verifier
    /// * `ttls` - Access and refresh token lifetimes
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, jwt: auth::JwtHandler, ttls: TokenTtls) -> Self {
        Self {
            users,
            sessions,
            jwt,
            password_hasher: auth::PasswordHasher::new(),
            ttls,
        }
    }

    /// Mint a fresh token pair for `user` and persist it as the single
    /// active session.
    async fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access = self
            .jwt
            .issue(Claims::access(user.username.as_str()), self.ttls.access)
            .map_err(|e| AuthError::Unknown(format!("Token signing failed: {}", e)))?;
        let refresh = self
            .jwt
            .issue(Claims::refresh(user.username.as_str()), self.ttls.refresh)
            .map_err(|e| AuthError::Unknown(format!("Token signing failed: {}", e)))?;

        let session = Session {
            user_id: user.id,
            access_token: access.token,
            refresh_token: refresh.token,
            access_token_expiry: access.expires_at,
        };
        self.sessions.upsert(&session).await?;

        Ok(TokenPair {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: access.expires_at - Utc::now().timestamp(),
        })
    }
}

#[async_trait]
impl<UR, SR> AuthServicePort for AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        // Hash password using auth library
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        self.users.create(&command.username, &password_hash).await
    }

    async fn login(&self, username: &Username, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Any verification failure, including an unparseable stored hash,
        // reads as bad credentials
        let verified = self
            .password_hasher
            .verify(password, &user.password_hash)
            .unwrap_or(false);
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();

        // A still-valid stored pair is returned verbatim, so logging in again
        // does not invalidate tokens already held elsewhere
        if let Some(session) = self.sessions.find_by_user(user.id).await? {
            if session.access_token_expiry > now {
                return Ok(TokenPair {
                    access_token: session.access_token,
                    refresh_token: session.refresh_token,
                    expires_in: session.access_token_expiry - now,
                });
            }
            self.sessions.delete(user.id).await?;
        }

        self.issue_pair(&user).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims: Claims = self
            .jwt
            .decode(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if !claims.is_refresh() {
            return Err(AuthError::InvalidRefreshToken);
        }
        let username = claims.sub.ok_or(AuthError::InvalidRefreshToken)?;

        let user_id = self
            .users
            .find_id_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.clone()))?;

        // The presented token must match the stored one byte for byte; a
        // mismatch means a later login replaced this session
        let session = self
            .sessions
            .find_by_user(user_id)
            .await?
            .filter(|session| session.refresh_token == refresh_token)
            .ok_or(AuthError::RefreshMismatch)?;

        let access = self
            .jwt
            .issue(Claims::access(&username), self.ttls.access)
            .map_err(|e| AuthError::Unknown(format!("Token signing failed: {}", e)))?;

        self.sessions
            .set_access_token(user_id, &access.token, access.expires_at)
            .await?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: session.refresh_token,
            expires_in: access.expires_at - Utc::now().timestamp(),
        })
    }

    async fn authorize(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims: Claims = self
            .jwt
            .decode(token)
            .map_err(|_| AuthError::InvalidToken)?;
        let username = claims.sub.ok_or(AuthError::InvalidToken)?;

        let user_id = self
            .users
            .find_id_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.clone()))?;

        Ok(AuthenticatedUser { user_id, username })
    }
}
