// DB Maintenance port
use crate::error::Result;
use async_trait::async_trait;

/// Database maintenance statistics
#[derive(Debug, Clone, Default)]
pub struct MaintenanceStats {
    pub db_size_mb: f64,
    pub db_size_bytes: i64,
    pub patient_count: i64,
    pub psychologist_count: i64,
    pub mood_count: i64,
    pub journal_entry_count: i64,
    pub appointment_count: i64,
    pub session_count: i64,
}

/// Maintenance configuration
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// DB size above which VACUUM runs (MB)
    pub max_db_size_mb: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            max_db_size_mb: 512.0,
        }
    }
}

/// Database maintenance operations
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Run VACUUM to reclaim space
    ///
    /// # Returns
    /// Space reclaimed in MB
    async fn vacuum(&self) -> Result<f64>;

    /// Delete sessions whose expiry has passed
    ///
    /// # Returns
    /// Number of sessions deleted
    async fn purge_expired_sessions(&self) -> Result<u64>;

    /// Get maintenance statistics
    async fn get_stats(&self) -> Result<MaintenanceStats>;

    /// Run full maintenance (session purge + VACUUM when large)
    async fn run_full_maintenance(&self, config: &MaintenanceConfig) -> Result<MaintenanceStats> {
        let stats_before = self.get_stats().await?;

        let purged_sessions = self.purge_expired_sessions().await?;

        let reclaimed_mb = if stats_before.db_size_mb > config.max_db_size_mb {
            self.vacuum().await?
        } else {
            0.0
        };

        let stats_after = self.get_stats().await?;

        tracing::info!(
            purged_sessions = purged_sessions,
            reclaimed_mb = reclaimed_mb,
            db_size_mb = stats_after.db_size_mb,
            "Maintenance completed"
        );

        Ok(stats_after)
    }
}
