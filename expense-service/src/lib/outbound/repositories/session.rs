use async_trait::async_trait;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::SessionRepository;

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Session>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, access_token, refresh_token, access_token_expiry
            FROM sessions
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| Session {
            user_id: UserId(r.get("user_id")),
            access_token: r.get("access_token"),
            refresh_token: r.get("refresh_token"),
            access_token_expiry: r.get("access_token_expiry"),
        }))
    }

    async fn upsert(&self, session: &Session) -> Result<(), AuthError> {
        // The user_id primary key makes this the single-session-per-user
        // write: a second login replaces the first
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sessions (user_id, access_token, refresh_token, access_token_expiry)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(session.user_id.0)
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(session.access_token_expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn set_access_token(
        &self,
        user_id: UserId,
        access_token: &str,
        expires_at: i64,
    ) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET access_token = ?, access_token_expiry = ?
            WHERE user_id = ?
            "#,
        )
        .bind(access_token)
        .bind(expires_at)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
