// Psychologist Domain Model

use serde::{Deserialize, Serialize};

pub type PsychologistId = i64;

/// Psychologist account (persisted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psychologist {
    pub id: PsychologistId,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl Psychologist {
    pub fn view(&self) -> PsychologistView {
        PsychologistView {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologistView {
    pub id: PsychologistId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct NewPsychologist {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}
