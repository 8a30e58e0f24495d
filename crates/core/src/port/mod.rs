// Port Layer - Interfaces for external dependencies

pub mod appointment_repository;
pub mod id_provider; // For deterministic testing
pub mod journal_repository;
pub mod maintenance;
pub mod mood_repository;
pub mod password_hasher;
pub mod patient_repository;
pub mod psychologist_repository;
pub mod session_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use appointment_repository::AppointmentRepository;
pub use id_provider::IdProvider;
pub use journal_repository::JournalRepository;
pub use maintenance::{Maintenance, MaintenanceConfig, MaintenanceStats};
pub use mood_repository::MoodRepository;
pub use password_hasher::PasswordHasher;
pub use patient_repository::PatientRepository;
pub use psychologist_repository::PsychologistRepository;
pub use session_repository::SessionRepository;
pub use time_provider::TimeProvider;
pub use transaction::{
    AppointmentRepositoryTransaction, Transaction, TransactionalAppointmentRepository,
};
