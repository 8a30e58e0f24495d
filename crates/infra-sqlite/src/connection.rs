// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use mindful_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

const MAX_CONNECTIONS: u32 = 10;

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create SQLite connection pool with WAL mode and foreign keys enforced
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Config(format!("Invalid database URL '{}': {}", database_url, e)))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .create_if_missing(true);

    // Every in-memory connection is its own database: keep exactly one alive
    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;

    debug!(database_url = %database_url, "SQLite pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_pool() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        assert!(pool.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://mindful.db"));
    }
}
