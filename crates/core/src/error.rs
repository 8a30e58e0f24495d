// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message without the variant prefix, suitable for API clients
    pub fn public_message(&self) -> String {
        match self {
            AppError::Domain(e) => e.to_string(),
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::Unauthorized(msg) => msg.clone(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by mapping to AppError::Database / AppError::Conflict
