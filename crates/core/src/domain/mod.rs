// Domain Layer - Pure business records and rules

pub mod appointment;
pub mod credentials;
pub mod error;
pub mod journal;
pub mod mood;
pub mod patient;
pub mod psychologist;
pub mod session;

// Re-exports
pub use appointment::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentView, NewAppointment, TimeSlot,
};
pub use error::DomainError;
pub use journal::{JournalDraft, JournalEntry, JournalEntryId, NewJournalEntry};
pub use mood::{Mood, MoodId, NewMood, MAX_MOOD_VALUE, MIN_MOOD_VALUE};
pub use patient::{NewPatient, Patient, PatientId, PatientView};
pub use psychologist::{NewPsychologist, Psychologist, PsychologistId, PsychologistView};
pub use session::{Principal, Role, Session, SessionToken};
