// SQLite Maintenance Implementation
use crate::error::map_sqlx_error;
use async_trait::async_trait;
use mindful_core::error::{AppError, Result};
use mindful_core::port::{Maintenance, MaintenanceStats, SessionRepository, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// SQLite maintenance implementation
pub struct SqliteMaintenance {
    pool: SqlitePool,
    sessions: Arc<dyn SessionRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteMaintenance {
    pub fn new(
        pool: SqlitePool,
        sessions: Arc<dyn SessionRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            pool,
            sessions,
            time_provider,
        }
    }

    /// Get DB file size in MB
    async fn get_db_size(&self) -> Result<f64> {
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page count: {}", e)))?;

        let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page size: {}", e)))?;

        let size_bytes = page_count * page_size;
        Ok(size_bytes as f64 / (1024.0 * 1024.0))
    }

    async fn count(&self, table: &str) -> Result<i64> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Maintenance for SqliteMaintenance {
    async fn vacuum(&self) -> Result<f64> {
        info!("Running VACUUM to optimize database...");

        let size_before = self.get_db_size().await?;

        sqlx::query("VACUUM")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("VACUUM failed: {}", e)))?;

        let size_after = self.get_db_size().await?;
        let reclaimed = (size_before - size_after).max(0.0);

        info!(
            size_before_mb = size_before,
            size_after_mb = size_after,
            reclaimed_mb = reclaimed,
            "VACUUM completed"
        );

        Ok(reclaimed)
    }

    async fn purge_expired_sessions(&self) -> Result<u64> {
        let now = self.time_provider.now_millis();
        let deleted = self.sessions.delete_expired(now).await?;

        info!(deleted_sessions = deleted, "Expired session purge completed");
        Ok(deleted)
    }

    async fn get_stats(&self) -> Result<MaintenanceStats> {
        let db_size_mb = self.get_db_size().await?;

        Ok(MaintenanceStats {
            db_size_mb,
            db_size_bytes: (db_size_mb * 1024.0 * 1024.0) as i64,
            patient_count: self.count("patients").await?,
            psychologist_count: self.count("psychologists").await?,
            mood_count: self.count("moods").await?,
            journal_entry_count: self.count("journal_entries").await?,
            appointment_count: self.count("appointments").await?,
            session_count: self.count("sessions").await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{patient, setup_test_db};
    use crate::SqliteSessionRepository;
    use chrono::NaiveDate;
    use mindful_core::domain::{Role, Session};
    use mindful_core::port::time_provider::ManualTimeProvider;
    use mindful_core::port::MaintenanceConfig;

    fn setup(pool: SqlitePool) -> (SqliteMaintenance, Arc<SqliteSessionRepository>, Arc<ManualTimeProvider>) {
        let clock = Arc::new(ManualTimeProvider::new(
            NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ));
        let sessions = Arc::new(SqliteSessionRepository::new(pool.clone()));
        let maintenance = SqliteMaintenance::new(pool, sessions.clone(), clock.clone());
        (maintenance, sessions, clock)
    }

    fn session(token: &str, expires_at: i64) -> Session {
        Session {
            token: token.to_string(),
            user_id: 1,
            username: "alice".to_string(),
            role: Role::Patient,
            created_at: 0,
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_maintenance_stats() {
        let pool = setup_test_db().await;
        patient(&pool, "alice", None).await;
        let (maintenance, _, _) = setup(pool);

        let stats = maintenance.get_stats().await.unwrap();

        assert!(stats.db_size_mb > 0.0);
        assert_eq!(stats.patient_count, 1);
        assert_eq!(stats.psychologist_count, 0);
        assert_eq!(stats.session_count, 0);
    }

    #[tokio::test]
    async fn test_vacuum() {
        let pool = setup_test_db().await;
        let (maintenance, _, _) = setup(pool);

        // VACUUM should not error (even if no space is reclaimed in memory DB)
        let reclaimed = maintenance.vacuum().await.unwrap();
        assert!(reclaimed >= 0.0);
    }

    #[tokio::test]
    async fn test_purge_expired_sessions() {
        let pool = setup_test_db().await;
        let (maintenance, sessions, clock) = setup(pool);
        let now = clock.now_millis();

        sessions.insert(&session("expired", now - 1)).await.unwrap();
        sessions.insert(&session("live", now + 60_000)).await.unwrap();

        assert_eq!(maintenance.purge_expired_sessions().await.unwrap(), 1);

        let stats = maintenance
            .run_full_maintenance(&MaintenanceConfig::default())
            .await
            .unwrap();
        assert_eq!(stats.session_count, 1);
    }
}
