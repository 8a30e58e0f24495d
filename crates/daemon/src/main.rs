//! Mindful - Server Entry Point
//! REST API + maintenance scheduler over a single SQLite database

mod config;
mod logging;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use mindful_api_http::{AppState, HttpServer, HttpServerConfig};
use mindful_core::application::{
    shutdown_channel, AppointmentService, AuthService, JournalService, MaintenanceScheduler,
    MoodService, PatientService,
};
use mindful_core::port::id_provider::UuidProvider;
use mindful_core::port::password_hasher::Argon2PasswordHasher;
use mindful_core::port::time_provider::SystemTimeProvider;
use mindful_core::port::{MaintenanceConfig, TimeProvider};
use mindful_infra_sqlite::{
    create_pool, run_migrations, SqliteAppointmentRepository, SqliteJournalRepository,
    SqliteMaintenance, SqliteMoodRepository, SqlitePatientRepository,
    SqlitePsychologistRepository, SqliteSessionRepository,
};

use crate::config::DaemonConfig;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging (and OpenTelemetry when enabled)
    let _logging = logging::init_logging()?;

    info!("Mindful v{} starting...", mindful_core::VERSION);

    // 2. Configuration
    let config = DaemonConfig::load()?;

    if let Some(db_file) = config.database_file() {
        if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    info!(database_url = %config.database_url, "Initializing database...");

    // 3. Database
    let pool = create_pool(&config.database_url)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Dependencies (DI wiring)
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let hasher = Arc::new(Argon2PasswordHasher::new());

    let patients = Arc::new(SqlitePatientRepository::new(pool.clone()));
    let psychologists = Arc::new(SqlitePsychologistRepository::new(pool.clone()));
    let sessions = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let moods = Arc::new(SqliteMoodRepository::new(pool.clone()));
    let journals = Arc::new(SqliteJournalRepository::new(pool.clone()));
    let appointments = Arc::new(SqliteAppointmentRepository::new(pool.clone()));

    let auth = AuthService::new(
        patients.clone(),
        psychologists.clone(),
        sessions.clone(),
        hasher,
        id_provider,
        time_provider.clone(),
    )
    .with_session_ttl(config.session_ttl());

    let state = Arc::new(AppState::new(
        Arc::new(auth),
        Arc::new(MoodService::new(
            moods.clone(),
            patients.clone(),
            time_provider.clone(),
        )),
        Arc::new(JournalService::new(
            journals,
            patients.clone(),
            time_provider.clone(),
        )),
        Arc::new(PatientService::new(patients.clone(), moods)),
        Arc::new(AppointmentService::new(
            appointments.clone(),
            appointments,
            patients,
            time_provider.clone(),
        )),
    ));

    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    // 5. Maintenance scheduler
    let maintenance = Arc::new(SqliteMaintenance::new(pool.clone(), sessions, time_provider));
    let maintenance_scheduler = MaintenanceScheduler::new(
        maintenance,
        MaintenanceConfig {
            max_db_size_mb: config.maintenance.max_db_size_mb,
        },
        config.maintenance_period(),
    );
    let maintenance_handle = tokio::spawn(maintenance_scheduler.run(shutdown_rx.clone()));

    // 6. HTTP server
    let http_config = HttpServerConfig {
        host: config.http.host.clone(),
        port: config.http.port,
    };
    let server = HttpServer::bind(&http_config, state)
        .await
        .context("HTTP server start failed")?;
    let server_handle = tokio::spawn(server.run(shutdown_rx));

    info!("System ready. Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 8. Graceful shutdown
    shutdown_tx.shutdown();

    match tokio::time::timeout(SHUTDOWN_GRACE, server_handle).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => error!(error = %e, "HTTP server failed"),
        Ok(Err(e)) => error!(error = %e, "HTTP server task panicked"),
        Err(_) => warn!("HTTP server did not stop within the grace period"),
    }
    let _ = tokio::time::timeout(SHUTDOWN_GRACE, maintenance_handle).await;

    pool.close().await;
    info!("Shutdown complete.");

    Ok(())
}
