// Maintenance Service
// Scheduled housekeeping: expired sessions, VACUUM, stats logging

use crate::application::shutdown::ShutdownToken;
use crate::port::{Maintenance, MaintenanceConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

/// Maintenance scheduler
///
/// Runs periodic maintenance operations in the background
pub struct MaintenanceScheduler {
    maintenance: Arc<dyn Maintenance>,
    config: MaintenanceConfig,
    period: Duration,
}

impl MaintenanceScheduler {
    /// Create a new maintenance scheduler
    ///
    /// # Arguments
    /// * `maintenance` - Maintenance implementation
    /// * `config` - Maintenance configuration
    /// * `period` - How often to run maintenance
    pub fn new(
        maintenance: Arc<dyn Maintenance>,
        config: MaintenanceConfig,
        period: Duration,
    ) -> Self {
        Self {
            maintenance,
            config,
            period,
        }
    }

    /// Run maintenance loop until shutdown (spawn with tokio::spawn)
    pub async fn run(self, mut shutdown: ShutdownToken) {
        info!(
            period_secs = self.period.as_secs(),
            max_db_size_mb = self.config.max_db_size_mb,
            "Maintenance scheduler started"
        );

        let mut tick = interval(self.period);

        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.wait() => {
                    info!("Maintenance scheduler stopped");
                    return;
                }
            }

            match self.maintenance.run_full_maintenance(&self.config).await {
                Ok(stats) => {
                    info!(
                        db_size_mb = stats.db_size_mb,
                        patients = stats.patient_count,
                        psychologists = stats.psychologist_count,
                        moods = stats.mood_count,
                        journal_entries = stats.journal_entry_count,
                        appointments = stats.appointment_count,
                        sessions = stats.session_count,
                        "Scheduled maintenance completed successfully"
                    );
                }
                Err(e) => {
                    error!(error = ?e, "Scheduled maintenance failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::shutdown::shutdown_channel;
    use crate::error::Result;
    use crate::port::MaintenanceStats;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct CountingMaintenance {
        purges: AtomicU64,
        vacuums: AtomicU64,
        db_size_mb: f64,
    }

    #[async_trait]
    impl Maintenance for CountingMaintenance {
        async fn vacuum(&self) -> Result<f64> {
            self.vacuums.fetch_add(1, Ordering::SeqCst);
            Ok(1.0)
        }

        async fn purge_expired_sessions(&self) -> Result<u64> {
            self.purges.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        }

        async fn get_stats(&self) -> Result<MaintenanceStats> {
            Ok(MaintenanceStats {
                db_size_mb: self.db_size_mb,
                ..Default::default()
            })
        }
    }

    /// Let the loop run its immediate first tick, then stop it
    async fn run_first_tick(maintenance: Arc<CountingMaintenance>) {
        let scheduler = MaintenanceScheduler::new(
            maintenance,
            MaintenanceConfig::default(),
            Duration::from_secs(3600),
        );
        let (tx, rx) = shutdown_channel();

        let handle = tokio::spawn(scheduler.run(rx));
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_purges_without_vacuum_when_small() {
        let maintenance = Arc::new(CountingMaintenance::default());
        run_first_tick(maintenance.clone()).await;

        assert_eq!(maintenance.purges.load(Ordering::SeqCst), 1);
        assert_eq!(maintenance.vacuums.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_vacuum_when_over_threshold() {
        let maintenance = Arc::new(CountingMaintenance {
            db_size_mb: 1024.0,
            ..Default::default()
        });
        run_first_tick(maintenance.clone()).await;

        assert_eq!(maintenance.vacuums.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loop_stops_on_shutdown() {
        let maintenance = Arc::new(CountingMaintenance::default());
        let scheduler = MaintenanceScheduler::new(
            maintenance.clone(),
            MaintenanceConfig::default(),
            Duration::from_secs(3600),
        );
        let (tx, rx) = shutdown_channel();

        let handle = tokio::spawn(scheduler.run(rx));
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        // First tick fires immediately
        assert_eq!(maintenance.purges.load(Ordering::SeqCst), 1);
    }
}
