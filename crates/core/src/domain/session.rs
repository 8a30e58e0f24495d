// Session Domain Model (opaque bearer tokens)

use serde::{Deserialize, Serialize};

pub type SessionToken = String;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_PATIENT")]
    Patient,
    #[serde(rename = "ROLE_PSYCHOLOGIST")]
    Psychologist,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "ROLE_PATIENT",
            Role::Psychologist => "ROLE_PSYCHOLOGIST",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ROLE_PATIENT" => Some(Role::Patient),
            "ROLE_PSYCHOLOGIST" => Some(Role::Psychologist),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted login session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    /// Patient id or psychologist id, depending on `role`
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub created_at: i64, // epoch ms
    pub expires_at: i64, // epoch ms
}

impl Session {
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis >= self.expires_at
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }

    pub fn is_psychologist(&self) -> bool {
        self.role == Role::Psychologist
    }
}
