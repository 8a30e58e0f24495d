// Mindful Infrastructure - SQLite Adapter
// Implements: every repository port, TransactionalAppointmentRepository, Maintenance

mod appointment_repository;
mod connection;
mod error;
mod journal_repository;
mod maintenance_impl;
mod migration;
mod mood_repository;
mod patient_repository;
mod psychologist_repository;
mod session_repository;
mod transaction;

#[cfg(test)]
mod test_support;

pub use appointment_repository::SqliteAppointmentRepository;
pub use connection::create_pool;
pub use journal_repository::SqliteJournalRepository;
pub use maintenance_impl::SqliteMaintenance;
pub use migration::run_migrations;
pub use mood_repository::SqliteMoodRepository;
pub use patient_repository::SqlitePatientRepository;
pub use psychologist_repository::SqlitePsychologistRepository;
pub use session_repository::SqliteSessionRepository;
pub use transaction::SqliteAppointmentTransaction;

pub use sqlx::SqlitePool;

// Note: sqlx::Error conversion is handled by `error::map_sqlx_error`
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
