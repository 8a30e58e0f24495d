// Journal Entry Domain Model

use super::error::{DomainError, Result};
use super::patient::PatientId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type JournalEntryId = i64;

pub const MAX_TITLE_LEN: usize = 255;

/// Journal entry; visible to the assigned psychologist only when `allow_psychologist` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub patient_id: PatientId,
    pub title: String,
    pub text: String,
    pub tags: Option<String>,
    pub date: NaiveDateTime,
    pub allow_psychologist: bool,
}

impl JournalEntry {
    pub fn is_owned_by(&self, patient_id: PatientId) -> bool {
        self.patient_id == patient_id
    }

    /// Overwrite content from a draft, refreshing the timestamp
    pub fn apply(&mut self, draft: JournalDraft, now: NaiveDateTime) {
        self.title = draft.title;
        self.text = draft.text;
        self.tags = draft.tags;
        self.date = now;
    }
}

/// Client-supplied content of an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Option<String>,
}

impl JournalDraft {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Journal entry title is required".to_string(),
            ));
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::ValidationError(format!(
                "Journal entry title is too long (max {} characters)",
                MAX_TITLE_LEN
            )));
        }
        if self.text.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Journal entry text is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub patient_id: PatientId,
    pub title: String,
    pub text: String,
    pub tags: Option<String>,
    pub date: NaiveDateTime,
}

impl NewJournalEntry {
    /// New entries always start private
    pub fn from_draft(patient_id: PatientId, draft: JournalDraft, date: NaiveDateTime) -> Self {
        Self {
            patient_id,
            title: draft.title,
            text: draft.text,
            tags: draft.tags,
            date,
        }
    }
}
