// Mood Repository Port (Interface)

use crate::domain::{Mood, NewMood, PatientId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// Insert a mood. A second mood for the same patient and day fails with `Conflict`.
    async fn insert(&self, mood: &NewMood) -> Result<Mood>;

    /// All moods of a patient, oldest day first
    async fn find_by_patient(&self, patient_id: PatientId) -> Result<Vec<Mood>>;

    async fn find_by_patient_and_date(
        &self,
        patient_id: PatientId,
        date: NaiveDate,
    ) -> Result<Option<Mood>>;
}
