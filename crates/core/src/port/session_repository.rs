// Session Repository Port (Interface)

use crate::domain::Session;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<()>;

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>>;

    /// Returns true if a session was removed
    async fn delete(&self, token: &str) -> Result<bool>;

    /// Remove sessions with `expires_at <= now_millis`
    async fn delete_expired(&self, now_millis: i64) -> Result<u64>;
}
