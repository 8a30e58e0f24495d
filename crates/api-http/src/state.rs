//! Shared handler state

use mindful_core::application::{
    AppointmentService, AuthService, JournalService, MoodService, PatientService,
};
use std::sync::Arc;
use std::time::Instant;

/// Services injected into every handler
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub moods: Arc<MoodService>,
    pub journals: Arc<JournalService>,
    pub patients: Arc<PatientService>,
    pub appointments: Arc<AppointmentService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        moods: Arc<MoodService>,
        journals: Arc<JournalService>,
        patients: Arc<PatientService>,
        appointments: Arc<AppointmentService>,
    ) -> Self {
        Self {
            auth,
            moods,
            journals,
            patients,
            appointments,
            started_at: Instant::now(),
        }
    }
}

pub type SharedState = Arc<AppState>;
