// Patient Service - psychologist-side patient management

use crate::domain::{Mood, PatientId, PatientView, PsychologistId};
use crate::error::{AppError, Result};
use crate::port::{MoodRepository, PatientRepository};
use std::sync::Arc;
use tracing::info;

const ALREADY_ASSIGNED: &str = "Patient is already assigned to another psychologist";

/// Patient Service
pub struct PatientService {
    patients: Arc<dyn PatientRepository>,
    moods: Arc<dyn MoodRepository>,
}

impl PatientService {
    pub fn new(patients: Arc<dyn PatientRepository>, moods: Arc<dyn MoodRepository>) -> Self {
        Self { patients, moods }
    }

    pub async fn unassigned_patients(&self) -> Result<Vec<PatientView>> {
        let patients = self.patients.find_unassigned().await?;
        Ok(patients.iter().map(|p| p.view()).collect())
    }

    pub async fn assigned_patients(&self, psychologist_id: PsychologistId) -> Result<Vec<PatientView>> {
        let patients = self.patients.find_by_psychologist(psychologist_id).await?;
        Ok(patients.iter().map(|p| p.view()).collect())
    }

    /// Take on a patient. Idempotent for the psychologist who already holds them.
    pub async fn assign_patient(
        &self,
        psychologist_id: PsychologistId,
        patient_id: PatientId,
    ) -> Result<PatientView> {
        let patient = self
            .patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

        if patient.is_assigned() && !patient.is_assigned_to(psychologist_id) {
            return Err(AppError::Conflict(ALREADY_ASSIGNED.to_string()));
        }

        if !self
            .patients
            .assign_psychologist(patient_id, psychologist_id)
            .await?
        {
            return Err(AppError::Conflict(ALREADY_ASSIGNED.to_string()));
        }

        info!(
            patient_id = patient_id,
            psychologist_id = psychologist_id,
            "Patient assigned"
        );
        Ok(patient.view())
    }

    /// Mood history of one of the psychologist's own patients
    pub async fn patient_moods(
        &self,
        psychologist_id: PsychologistId,
        patient_id: PatientId,
    ) -> Result<Vec<Mood>> {
        let patient = self
            .patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

        if !patient.is_assigned_to(psychologist_id) {
            return Err(AppError::Forbidden(format!(
                "Patient {} is not assigned to you",
                patient_id
            )));
        }

        self.moods.find_by_patient(patient_id).await
    }
}
