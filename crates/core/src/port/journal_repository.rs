// Journal Repository Port (Interface)

use crate::domain::{JournalEntry, JournalEntryId, NewJournalEntry, PatientId, PsychologistId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn insert(&self, entry: &NewJournalEntry) -> Result<JournalEntry>;

    async fn find_by_id(&self, id: JournalEntryId) -> Result<Option<JournalEntry>>;

    /// Entries of a patient, newest first
    async fn find_by_patient(&self, patient_id: PatientId) -> Result<Vec<JournalEntry>>;

    /// Persist title, text, tags and date (sharing flag is left alone)
    async fn update_content(&self, entry: &JournalEntry) -> Result<()>;

    async fn set_shared(&self, id: JournalEntryId, shared: bool) -> Result<()>;

    async fn delete(&self, id: JournalEntryId) -> Result<()>;

    /// Shared entries of patients currently assigned to the psychologist, newest first
    async fn find_shared_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
    ) -> Result<Vec<JournalEntry>>;
}
