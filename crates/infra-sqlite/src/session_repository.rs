// SQLite SessionRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use mindful_core::domain::{Role, Session};
use mindful_core::error::{AppError, Result};
use mindful_core::port::SessionRepository;
use sqlx::SqlitePool;

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
    async fn insert(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, username, role, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(&session.username)
        .bind(session.role.as_str())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>("SELECT * FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now_millis: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now_millis)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    token: String,
    user_id: i64,
    username: String,
    role: String,
    created_at: i64,
    expires_at: i64,
}

impl SessionRow {
    fn into_session(self) -> Result<Session> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| AppError::Database(format!("Unknown role in session row: {}", self.role)))?;

        Ok(Session {
            token: self.token,
            user_id: self.user_id,
            username: self.username,
            role,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}
