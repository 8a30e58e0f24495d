// Login, token authentication and logout

use super::{AuthResponse, AuthService, LoginRequest, UserView};
use crate::domain::{Principal, Role, Session};
use crate::error::{AppError, Result};
use crate::port::password_hasher::{hash_blocking, verify_blocking};
use tracing::{debug, info};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const DUMMY_PASSWORD: &str = "Dummy#password";

fn invalid_credentials() -> AppError {
    AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
}

impl AuthService {
    /// Verify credentials and open a session.
    ///
    /// Psychologist accounts are checked before patient accounts.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        if let Some(psychologist) = self.psychologists.find_by_username(&req.username).await? {
            if !self
                .verify_password(&req.password, &psychologist.password_hash)
                .await?
            {
                return Err(invalid_credentials());
            }
            let token = self
                .open_session(psychologist.id, &psychologist.username, Role::Psychologist)
                .await?;
            return Ok(AuthResponse::new(
                &token,
                Role::Psychologist,
                UserView::Psychologist(psychologist.view()),
            ));
        }

        if let Some(patient) = self.patients.find_by_username(&req.username).await? {
            if !self
                .verify_password(&req.password, &patient.password_hash)
                .await?
            {
                return Err(invalid_credentials());
            }
            let token = self
                .open_session(patient.id, &patient.username, Role::Patient)
                .await?;
            return Ok(AuthResponse::new(
                &token,
                Role::Patient,
                UserView::Patient(patient.view()),
            ));
        }

        // Unknown usernames cost one verification, same as a wrong password
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| hash_blocking(self.hasher.clone(), DUMMY_PASSWORD.to_string()))
            .await?;
        self.verify_password(&req.password, dummy).await?;

        Err(invalid_credentials())
    }

    /// Resolve a bearer token to the caller. Expired sessions are removed on sight.
    pub async fn authenticate(&self, token: &str) -> Result<Principal> {
        if token.is_empty() {
            return Err(AppError::Unauthorized(
                "Missing authentication token".to_string(),
            ));
        }

        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if session.is_expired(self.time_provider.now_millis()) {
            self.sessions.delete(token).await?;
            debug!(username = %session.username, "Expired session removed");
            return Err(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            ));
        }

        Ok(session.principal())
    }

    /// Revoke a session
    pub async fn logout(&self, token: &str) -> Result<()> {
        if self.sessions.delete(token).await? {
            info!("Session revoked");
        }
        Ok(())
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        verify_blocking(self.hasher.clone(), password.to_string(), hash.to_string()).await
    }

    async fn open_session(&self, user_id: i64, username: &str, role: Role) -> Result<String> {
        let now = self.time_provider.now_millis();
        let ttl_ms = i64::try_from(self.session_ttl.as_millis()).unwrap_or(i64::MAX);

        let session = Session {
            token: self.id_provider.generate_id(),
            user_id,
            username: username.to_string(),
            role,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
        };
        self.sessions.insert(&session).await?;

        info!(user_id = user_id, role = %role, "Session opened");
        Ok(session.token)
    }
}
