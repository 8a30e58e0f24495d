// Auth Service - registration, login and bearer-token sessions

pub mod register;
mod session;

pub use register::{RegisterPatientRequest, RegisterPsychologistRequest};

use crate::domain::{PatientView, Principal, PsychologistView, Role};
use crate::error::Result;
use crate::port::{
    IdProvider, PasswordHasher, PatientRepository, PsychologistRepository, SessionRepository,
    TimeProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Default session lifetime
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Login credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Account data returned at login, shaped by role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserView {
    Psychologist(PsychologistView),
    Patient(PatientView),
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// `Bearer <token>`, ready for the Authorization header
    pub access_token: String,
    pub role: Role,
    pub user_data: UserView,
}

impl AuthResponse {
    pub fn new(token: &str, role: Role, user_data: UserView) -> Self {
        Self {
            access_token: format!("Bearer {}", token),
            role,
            user_data,
        }
    }

    /// Raw token without the scheme prefix
    pub fn token(&self) -> &str {
        self.access_token
            .strip_prefix("Bearer ")
            .unwrap_or(&self.access_token)
    }
}

/// Auth Service
pub struct AuthService {
    patients: Arc<dyn PatientRepository>,
    psychologists: Arc<dyn PsychologistRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    session_ttl: Duration,
    /// Checked against when the username is unknown
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        psychologists: Arc<dyn PsychologistRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            patients,
            psychologists,
            sessions,
            hasher,
            id_provider,
            time_provider,
            session_ttl: DEFAULT_SESSION_TTL,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Override the session lifetime
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Register a new patient account
    pub async fn register_patient(&self, req: RegisterPatientRequest) -> Result<PatientView> {
        register::register_patient(
            self.patients.as_ref(),
            self.psychologists.as_ref(),
            self.hasher.clone(),
            req,
        )
        .await
    }

    /// Register a new psychologist account
    pub async fn register_psychologist(
        &self,
        req: RegisterPsychologistRequest,
    ) -> Result<PsychologistView> {
        register::register_psychologist(
            self.patients.as_ref(),
            self.psychologists.as_ref(),
            self.hasher.clone(),
            req,
        )
        .await
    }

    /// Profile of the authenticated caller
    pub async fn profile(&self, principal: &Principal) -> Result<UserView> {
        use crate::error::AppError;

        match principal.role {
            Role::Psychologist => self
                .psychologists
                .find_by_id(principal.user_id)
                .await?
                .map(|p| UserView::Psychologist(p.view()))
                .ok_or_else(|| AppError::NotFound("Psychologist not found".to_string())),
            Role::Patient => self
                .patients
                .find_by_id(principal.user_id)
                .await?
                .map(|p| UserView::Patient(p.view()))
                .ok_or_else(|| AppError::NotFound("Patient not found".to_string())),
        }
    }
}
