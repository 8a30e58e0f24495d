//! Shared harness: every service wired over a fresh in-memory database

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use mindful_core::application::auth::{
    LoginRequest, RegisterPatientRequest, RegisterPsychologistRequest,
};
use mindful_core::application::{
    AppointmentService, AuthService, JournalService, MoodService, PatientService,
};
use mindful_core::domain::{PatientId, PsychologistId};
use mindful_core::port::id_provider::SequentialIdProvider;
use mindful_core::port::password_hasher::Argon2PasswordHasher;
use mindful_core::port::time_provider::ManualTimeProvider;
use mindful_infra_sqlite::{
    create_pool, run_migrations, SqliteAppointmentRepository, SqliteJournalRepository,
    SqliteMoodRepository, SqlitePatientRepository, SqlitePsychologistRepository,
    SqliteSessionRepository, SqlitePool,
};

pub const PASSWORD: &str = "Secret#1";

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub struct Harness {
    pub pool: SqlitePool,
    pub clock: Arc<ManualTimeProvider>,
    pub auth: Arc<AuthService>,
    pub moods: Arc<MoodService>,
    pub journals: Arc<JournalService>,
    pub patients: Arc<PatientService>,
    pub appointments: Arc<AppointmentService>,
}

impl Harness {
    /// Clock starts at 2030-01-10 08:00
    pub async fn new() -> Self {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let clock = Arc::new(ManualTimeProvider::new(at(10, 8, 0)));
        let patient_repo = Arc::new(SqlitePatientRepository::new(pool.clone()));
        let psychologist_repo = Arc::new(SqlitePsychologistRepository::new(pool.clone()));
        let session_repo = Arc::new(SqliteSessionRepository::new(pool.clone()));
        let mood_repo = Arc::new(SqliteMoodRepository::new(pool.clone()));
        let journal_repo = Arc::new(SqliteJournalRepository::new(pool.clone()));
        let appointment_repo = Arc::new(SqliteAppointmentRepository::new(pool.clone()));

        let auth = Arc::new(AuthService::new(
            patient_repo.clone(),
            psychologist_repo,
            session_repo,
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(SequentialIdProvider::new("token")),
            clock.clone(),
        ));
        let moods = Arc::new(MoodService::new(
            mood_repo.clone(),
            patient_repo.clone(),
            clock.clone(),
        ));
        let journals = Arc::new(JournalService::new(
            journal_repo,
            patient_repo.clone(),
            clock.clone(),
        ));
        let patients = Arc::new(PatientService::new(patient_repo.clone(), mood_repo));
        let appointments = Arc::new(AppointmentService::new(
            appointment_repo.clone(),
            appointment_repo,
            patient_repo,
            clock.clone(),
        ));

        Self {
            pool,
            clock,
            auth,
            moods,
            journals,
            patients,
            appointments,
        }
    }

    pub async fn register_patient(&self, username: &str) -> PatientId {
        self.auth
            .register_patient(RegisterPatientRequest {
                username: username.to_string(),
                password: PASSWORD.to_string(),
                first_name: "Alex".to_string(),
                last_name: "Moreau".to_string(),
                age: 29,
            })
            .await
            .unwrap()
            .id
    }

    pub async fn register_psychologist(&self, username: &str) -> PsychologistId {
        self.auth
            .register_psychologist(RegisterPsychologistRequest {
                username: username.to_string(),
                password: PASSWORD.to_string(),
                first_name: "Dana".to_string(),
                last_name: "Kowalski".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    /// Raw session token
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .auth
            .login(LoginRequest {
                username: username.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();
        response.token().to_string()
    }

    /// Psychologist with one assigned patient
    pub async fn pair(&self, psychologist: &str, patient: &str) -> (PsychologistId, PatientId) {
        let psy = self.register_psychologist(psychologist).await;
        let pat = self.register_patient(patient).await;
        self.patients.assign_patient(psy, pat).await.unwrap();
        (psy, pat)
    }
}
