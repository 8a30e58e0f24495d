//! Request extractors: JSON/path with API-shaped rejections, bearer authentication

use crate::error::ApiError;
use crate::state::SharedState;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use mindful_core::domain::Principal;
use mindful_core::error::AppError;

/// `axum::Json` whose rejection is an `ApiError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` whose rejection is an `ApiError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` whose rejection is an `ApiError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Malformed Authorization header".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::Unauthorized(
            "Malformed Authorization header".to_string(),
        ));
    }

    Ok(token.trim().to_string())
}

/// Any authenticated caller
pub struct AuthUser {
    pub principal: Principal,
    pub token: String,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let principal = state.auth.authenticate(&token).await?;
        Ok(Self { principal, token })
    }
}

/// Authenticated patient
pub struct PatientAuth(pub Principal);

impl FromRequestParts<SharedState> for PatientAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.principal.is_patient() {
            return Err(AppError::Forbidden("Patient role required".to_string()).into());
        }
        Ok(Self(user.principal))
    }
}

/// Authenticated psychologist
pub struct PsychologistAuth(pub Principal);

impl FromRequestParts<SharedState> for PsychologistAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.principal.is_psychologist() {
            return Err(AppError::Forbidden("Psychologist role required".to_string()).into());
        }
        Ok(Self(user.principal))
    }
}
