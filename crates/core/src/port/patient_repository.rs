// Patient Repository Port (Interface)

use crate::domain::{NewPatient, Patient, PatientId, PsychologistId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Patient persistence
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Insert a new patient, returning the stored record
    async fn insert(&self, patient: &NewPatient) -> Result<Patient>;

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Patient>>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    /// Patients with no psychologist, ordered by id
    async fn find_unassigned(&self) -> Result<Vec<Patient>>;

    /// Patients assigned to a psychologist, ordered by last/first name
    async fn find_by_psychologist(&self, psychologist_id: PsychologistId) -> Result<Vec<Patient>>;

    /// Assign only if the patient is unassigned or already assigned to the same psychologist.
    ///
    /// Returns false when the patient belongs to someone else (or does not exist).
    async fn assign_psychologist(
        &self,
        patient_id: PatientId,
        psychologist_id: PsychologistId,
    ) -> Result<bool>;
}
