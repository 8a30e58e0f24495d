// Password Hasher Port

use crate::error::{AppError, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use std::sync::Arc;

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id with default parameters (production)
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Hash on the blocking thread pool
pub async fn hash_blocking(hasher: Arc<dyn PasswordHasher>, password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// Verify on the blocking thread pool
pub async fn verify_blocking(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
    hash: String,
) -> Result<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("Password123*").unwrap();

        assert_ne!(hash, "Password123*");
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("Password123*", &hash).unwrap());
        assert!(!hasher.verify("password123*", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash("Secret#1a").unwrap();
        let b = hasher.hash("Secret#1a").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
        let hash = hash_blocking(hasher.clone(), "Secret#1a".to_string())
            .await
            .unwrap();

        assert!(verify_blocking(hasher.clone(), "Secret#1a".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_blocking(hasher, "Secret#1b".to_string(), hash)
            .await
            .unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("x", "not-a-hash").is_err());
    }
}
