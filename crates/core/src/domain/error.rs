// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid appointment status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Mood value must be between 1 and 10 (got {0})")]
    InvalidMoodValue(i32),

    #[error("{0}")]
    ValidationError(String),
}

impl DomainError {
    /// True when the error describes bad input rather than a state conflict
    pub fn is_validation(&self) -> bool {
        !matches!(self, DomainError::InvalidStatusTransition { .. })
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
