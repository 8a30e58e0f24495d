// Mood Domain Model

use super::error::{DomainError, Result};
use super::patient::PatientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type MoodId = i64;

pub const MIN_MOOD_VALUE: i32 = 1;
pub const MAX_MOOD_VALUE: i32 = 10;

/// Daily mood record (at most one per patient and calendar day)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mood {
    pub id: MoodId,
    pub patient_id: PatientId,
    pub value: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewMood {
    pub patient_id: PatientId,
    pub value: i32,
    pub date: NaiveDate,
}

impl NewMood {
    pub fn new(patient_id: PatientId, value: i32, date: NaiveDate) -> Result<Self> {
        validate_value(value)?;
        Ok(Self {
            patient_id,
            value,
            date,
        })
    }
}

pub fn validate_value(value: i32) -> Result<()> {
    if !(MIN_MOOD_VALUE..=MAX_MOOD_VALUE).contains(&value) {
        return Err(DomainError::InvalidMoodValue(value));
    }
    Ok(())
}
