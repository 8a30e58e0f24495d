// Mood Service - one mood per patient per day

use crate::domain::{Mood, NewMood, PatientId};
use crate::error::{AppError, Result};
use crate::port::{MoodRepository, PatientRepository, TimeProvider};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

fn already_submitted(today: NaiveDate) -> AppError {
    AppError::Conflict(format!(
        "You have already submitted your mood for today ({}).",
        today
    ))
}

/// Mood Service
pub struct MoodService {
    moods: Arc<dyn MoodRepository>,
    patients: Arc<dyn PatientRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl MoodService {
    pub fn new(
        moods: Arc<dyn MoodRepository>,
        patients: Arc<dyn PatientRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            moods,
            patients,
            time_provider,
        }
    }

    /// Record today's mood for a patient
    pub async fn submit_mood(&self, patient_id: PatientId, value: i32) -> Result<Mood> {
        let today = self.time_provider.today();
        let new_mood = NewMood::new(patient_id, value, today)?;

        if self
            .moods
            .find_by_patient_and_date(patient_id, today)
            .await?
            .is_some()
        {
            return Err(already_submitted(today));
        }

        self.patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

        // The unique (patient_id, date) index settles concurrent submissions
        let mood = self.moods.insert(&new_mood).await.map_err(|e| match e {
            AppError::Conflict(_) => already_submitted(today),
            other => other,
        })?;

        info!(patient_id = patient_id, mood_id = mood.id, "Mood submitted");
        Ok(mood)
    }

    /// Full mood history, oldest first
    pub async fn mood_history(&self, patient_id: PatientId) -> Result<Vec<Mood>> {
        self.moods.find_by_patient(patient_id).await
    }

    /// Today's mood, if already submitted
    pub async fn today_mood(&self, patient_id: PatientId) -> Result<Option<Mood>> {
        let today = self.time_provider.today();
        self.moods.find_by_patient_and_date(patient_id, today).await
    }
}
