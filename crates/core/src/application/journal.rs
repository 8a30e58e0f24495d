// Journal Service - private entries with opt-in sharing

use crate::domain::{
    JournalDraft, JournalEntry, JournalEntryId, NewJournalEntry, PatientId, PsychologistId,
};
use crate::error::{AppError, Result};
use crate::port::{JournalRepository, PatientRepository, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Journal Service
pub struct JournalService {
    journals: Arc<dyn JournalRepository>,
    patients: Arc<dyn PatientRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl JournalService {
    pub fn new(
        journals: Arc<dyn JournalRepository>,
        patients: Arc<dyn PatientRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            journals,
            patients,
            time_provider,
        }
    }

    pub async fn list_entries(&self, patient_id: PatientId) -> Result<Vec<JournalEntry>> {
        self.journals.find_by_patient(patient_id).await
    }

    pub async fn get_entry(
        &self,
        patient_id: PatientId,
        entry_id: JournalEntryId,
    ) -> Result<JournalEntry> {
        self.owned_entry(patient_id, entry_id).await
    }

    pub async fn create_entry(
        &self,
        patient_id: PatientId,
        draft: JournalDraft,
    ) -> Result<JournalEntry> {
        draft.validate()?;

        self.patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

        let now = self.time_provider.now();
        let entry = self
            .journals
            .insert(&NewJournalEntry::from_draft(patient_id, draft, now))
            .await?;

        info!(patient_id = patient_id, entry_id = entry.id, "Journal entry created");
        Ok(entry)
    }

    pub async fn update_entry(
        &self,
        patient_id: PatientId,
        entry_id: JournalEntryId,
        draft: JournalDraft,
    ) -> Result<JournalEntry> {
        draft.validate()?;

        let mut entry = self.owned_entry(patient_id, entry_id).await?;
        entry.apply(draft, self.time_provider.now());
        self.journals.update_content(&entry).await?;

        info!(entry_id = entry_id, "Journal entry updated");
        Ok(entry)
    }

    pub async fn delete_entry(&self, patient_id: PatientId, entry_id: JournalEntryId) -> Result<()> {
        self.owned_entry(patient_id, entry_id).await?;
        self.journals.delete(entry_id).await?;

        info!(entry_id = entry_id, "Journal entry deleted");
        Ok(())
    }

    /// Let the patient's psychologist read this entry
    pub async fn share_entry(
        &self,
        patient_id: PatientId,
        entry_id: JournalEntryId,
    ) -> Result<JournalEntry> {
        let mut entry = self.owned_entry(patient_id, entry_id).await?;

        let patient = self
            .patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;
        if !patient.is_assigned() {
            return Err(AppError::Validation(
                "Cannot share entry: You are not assigned to a psychologist.".to_string(),
            ));
        }

        self.journals.set_shared(entry_id, true).await?;
        entry.allow_psychologist = true;

        info!(entry_id = entry_id, "Journal entry shared");
        Ok(entry)
    }

    /// Withdraw a previously shared entry
    pub async fn unshare_entry(
        &self,
        patient_id: PatientId,
        entry_id: JournalEntryId,
    ) -> Result<JournalEntry> {
        let mut entry = self.owned_entry(patient_id, entry_id).await?;
        self.journals.set_shared(entry_id, false).await?;
        entry.allow_psychologist = false;

        info!(entry_id = entry_id, "Journal entry unshared");
        Ok(entry)
    }

    /// Entries shared with a psychologist by their assigned patients
    pub async fn shared_entries(&self, psychologist_id: PsychologistId) -> Result<Vec<JournalEntry>> {
        self.journals
            .find_shared_for_psychologist(psychologist_id)
            .await
    }

    async fn owned_entry(
        &self,
        patient_id: PatientId,
        entry_id: JournalEntryId,
    ) -> Result<JournalEntry> {
        let entry = self
            .journals
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Journal entry not found".to_string()))?;

        if !entry.is_owned_by(patient_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to access this entry".to_string(),
            ));
        }
        Ok(entry)
    }
}
