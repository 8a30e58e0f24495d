// Application Layer - Use Cases and Business Logic

pub mod appointment;
pub mod auth;
pub mod journal;
pub mod maintenance;
pub mod mood;
pub mod patient;
pub mod shutdown;

// Re-exports
pub use appointment::AppointmentService;
pub use auth::AuthService;
pub use journal::JournalService;
pub use maintenance::MaintenanceScheduler;
pub use mood::MoodService;
pub use patient::PatientService;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
