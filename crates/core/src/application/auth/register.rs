// Registration Use Case

use crate::domain::credentials::{
    validate_age, validate_name, validate_password, validate_username,
};
use crate::domain::{NewPatient, NewPsychologist, PatientView, PsychologistView};
use crate::error::{AppError, Result};
use crate::port::password_hasher::hash_blocking;
use crate::port::{PasswordHasher, PatientRepository, PsychologistRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub const USERNAME_TAKEN: &str = "Username is already taken!";

/// Patient registration form
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: i32,
}

/// Psychologist registration form
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPsychologistRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub fn validate_patient_request(req: &RegisterPatientRequest) -> Result<()> {
    validate_username(&req.username)?;
    validate_password(&req.password)?;
    validate_name("firstName", &req.first_name)?;
    validate_name("lastName", &req.last_name)?;
    validate_age(req.age)?;
    Ok(())
}

pub fn validate_psychologist_request(req: &RegisterPsychologistRequest) -> Result<()> {
    validate_username(&req.username)?;
    validate_password(&req.password)?;
    validate_name("firstName", &req.first_name)?;
    validate_name("lastName", &req.last_name)?;
    Ok(())
}

/// Usernames are unique across patients and psychologists
async fn ensure_username_available(
    patients: &dyn PatientRepository,
    psychologists: &dyn PsychologistRepository,
    username: &str,
) -> Result<()> {
    if patients.exists_by_username(username).await?
        || psychologists.exists_by_username(username).await?
    {
        return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
    }
    Ok(())
}

/// A concurrent registration can still win the race; the unique index reports it as Conflict
fn username_taken_on_conflict(err: AppError) -> AppError {
    match err {
        AppError::Conflict(_) => AppError::Conflict(USERNAME_TAKEN.to_string()),
        other => other,
    }
}

pub async fn register_patient(
    patients: &dyn PatientRepository,
    psychologists: &dyn PsychologistRepository,
    hasher: Arc<dyn PasswordHasher>,
    req: RegisterPatientRequest,
) -> Result<PatientView> {
    validate_patient_request(&req)?;
    ensure_username_available(patients, psychologists, &req.username).await?;

    let password_hash = hash_blocking(hasher, req.password).await?;
    let patient = patients
        .insert(&NewPatient {
            username: req.username,
            password_hash,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            age: req.age,
        })
        .await
        .map_err(username_taken_on_conflict)?;

    info!(patient_id = patient.id, "Patient registered");
    Ok(patient.view())
}

pub async fn register_psychologist(
    patients: &dyn PatientRepository,
    psychologists: &dyn PsychologistRepository,
    hasher: Arc<dyn PasswordHasher>,
    req: RegisterPsychologistRequest,
) -> Result<PsychologistView> {
    validate_psychologist_request(&req)?;
    ensure_username_available(patients, psychologists, &req.username).await?;

    let password_hash = hash_blocking(hasher, req.password).await?;
    let psychologist = psychologists
        .insert(&NewPsychologist {
            username: req.username,
            password_hash,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
        })
        .await
        .map_err(username_taken_on_conflict)?;

    info!(psychologist_id = psychologist.id, "Psychologist registered");
    Ok(psychologist.view())
}
