// Credential rules applied at registration

use super::error::{DomainError, Result};

pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_USERNAME_LEN: usize = 64;
pub const PASSWORD_SPECIAL_CHARS: [char; 3] = ['#', '%', '*'];

pub const PASSWORD_POLICY_MESSAGE: &str = "Password must contain at least one uppercase letter, \
one lowercase letter, and one special character (#, %, or *)";

/// Password complexity: length, both letter cases, one special character
pub fn validate_password(password: &str) -> Result<()> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_special = password.contains(PASSWORD_SPECIAL_CHARS);

    if long_enough && has_upper && has_lower && has_special {
        Ok(())
    } else {
        Err(DomainError::ValidationError(
            PASSWORD_POLICY_MESSAGE.to_string(),
        ))
    }
}

pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "Username is required".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::ValidationError(format!(
            "Username is too long (max {} characters)",
            MAX_USERNAME_LEN
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::ValidationError(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationError(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<()> {
    if !(1..=150).contains(&age) {
        return Err(DomainError::ValidationError(
            "age must be between 1 and 150".to_string(),
        ));
    }
    Ok(())
}
