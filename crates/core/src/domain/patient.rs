// Patient Domain Model

use super::psychologist::PsychologistId;
use serde::{Deserialize, Serialize};

pub type PatientId = i64;

/// Patient account (persisted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub psychologist_id: Option<PsychologistId>,
}

impl Patient {
    pub fn is_assigned(&self) -> bool {
        self.psychologist_id.is_some()
    }

    pub fn is_assigned_to(&self, psychologist_id: PsychologistId) -> bool {
        self.psychologist_id == Some(psychologist_id)
    }

    /// Public projection (never exposes the password hash)
    pub fn view(&self) -> PatientView {
        PatientView {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age,
            username: self.username.clone(),
        }
    }
}

/// Patient as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientView {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub username: String,
}

/// Patient about to be inserted
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}
