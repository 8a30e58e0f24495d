//! REST Request/Response Types

use mindful_core::application::auth::UserView;
use mindful_core::domain::Role;
use serde::{Deserialize, Serialize};

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /mood
#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    #[serde(default)]
    pub value: i32,
}

/// GET /psychologists/me/appointments?status=
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<String>,
}

/// GET /auth/me
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub profile: UserView,
}
