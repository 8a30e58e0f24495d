//! Route Handlers

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser, PatientAuth, PsychologistAuth};
use crate::state::SharedState;
use crate::types::{AppointmentFilter, HealthResponse, MeResponse, MessageResponse, MoodRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mindful_core::application::appointment::BookAppointmentRequest;
use mindful_core::application::auth::{
    AuthResponse, LoginRequest, RegisterPatientRequest, RegisterPsychologistRequest,
};
use mindful_core::domain::{
    AppointmentId, AppointmentStatus, AppointmentView, JournalDraft, JournalEntry,
    JournalEntryId, Mood, PatientId, PatientView,
};
use mindful_core::error::AppError;

type Created = (StatusCode, Json<MessageResponse>);

fn created(message: &str) -> Created {
    (StatusCode::CREATED, Json(MessageResponse::new(message)))
}

fn ok(message: &str) -> Json<MessageResponse> {
    Json(MessageResponse::new(message))
}

// ---- health & auth ----

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: mindful_core::VERSION.to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub async fn register_patient(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<RegisterPatientRequest>,
) -> ApiResult<Created> {
    state.auth.register_patient(req).await?;
    Ok(created("Patient registered successfully!"))
}

pub async fn register_psychologist(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<RegisterPsychologistRequest>,
) -> ApiResult<Created> {
    state.auth.register_psychologist(req).await?;
    Ok(created("Psychologist registered successfully!"))
}

pub async fn login(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(state.auth.login(req).await?))
}

pub async fn logout(
    State(state): State<SharedState>,
    user: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.logout(&user.token).await?;
    Ok(ok("Logged out"))
}

pub async fn me(State(state): State<SharedState>, user: AuthUser) -> ApiResult<Json<MeResponse>> {
    let profile = state.auth.profile(&user.principal).await?;
    Ok(Json(MeResponse {
        user_id: user.principal.user_id,
        username: user.principal.username,
        role: user.principal.role,
        profile,
    }))
}

// ---- mood ----

pub async fn submit_mood(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiJson(req): ApiJson<MoodRequest>,
) -> ApiResult<Created> {
    state.moods.submit_mood(patient.user_id, req.value).await?;
    Ok(created("Mood submitted successfully!"))
}

pub async fn mood_history(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
) -> ApiResult<Json<Vec<Mood>>> {
    Ok(Json(state.moods.mood_history(patient.user_id).await?))
}

pub async fn today_mood(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
) -> ApiResult<Json<Mood>> {
    let mood = state
        .moods
        .today_mood(patient.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No mood submitted today".to_string()))?;
    Ok(Json(mood))
}

// ---- journal ----

pub async fn list_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
) -> ApiResult<Json<Vec<JournalEntry>>> {
    Ok(Json(state.journals.list_entries(patient.user_id).await?))
}

pub async fn create_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiJson(draft): ApiJson<JournalDraft>,
) -> ApiResult<Created> {
    state.journals.create_entry(patient.user_id, draft).await?;
    Ok(created("Journal entry created successfully"))
}

pub async fn get_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiPath(id): ApiPath<JournalEntryId>,
) -> ApiResult<Json<JournalEntry>> {
    Ok(Json(state.journals.get_entry(patient.user_id, id).await?))
}

pub async fn update_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiPath(id): ApiPath<JournalEntryId>,
    ApiJson(draft): ApiJson<JournalDraft>,
) -> ApiResult<Json<MessageResponse>> {
    state.journals.update_entry(patient.user_id, id, draft).await?;
    Ok(ok("Journal entry updated successfully"))
}

pub async fn delete_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiPath(id): ApiPath<JournalEntryId>,
) -> ApiResult<Json<MessageResponse>> {
    state.journals.delete_entry(patient.user_id, id).await?;
    Ok(ok("Journal entry deleted successfully"))
}

pub async fn share_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiPath(id): ApiPath<JournalEntryId>,
) -> ApiResult<Json<MessageResponse>> {
    state.journals.share_entry(patient.user_id, id).await?;
    Ok(ok("Journal entry shared with your psychologist."))
}

pub async fn unshare_journal(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiPath(id): ApiPath<JournalEntryId>,
) -> ApiResult<Json<MessageResponse>> {
    state.journals.unshare_entry(patient.user_id, id).await?;
    Ok(ok("Journal entry is no longer shared."))
}

pub async fn shared_journal(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
) -> ApiResult<Json<Vec<JournalEntry>>> {
    Ok(Json(
        state.journals.shared_entries(psychologist.user_id).await?,
    ))
}

// ---- patients (psychologist side) ----

pub async fn unassigned_patients(
    State(state): State<SharedState>,
    PsychologistAuth(_): PsychologistAuth,
) -> ApiResult<Json<Vec<PatientView>>> {
    Ok(Json(state.patients.unassigned_patients().await?))
}

pub async fn assigned_patients(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
) -> ApiResult<Json<Vec<PatientView>>> {
    Ok(Json(
        state.patients.assigned_patients(psychologist.user_id).await?,
    ))
}

pub async fn assign_patient(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
    ApiPath(patient_id): ApiPath<PatientId>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .patients
        .assign_patient(psychologist.user_id, patient_id)
        .await?;
    Ok(ok("Patient assigned successfully"))
}

pub async fn patient_moods(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
    ApiPath(patient_id): ApiPath<PatientId>,
) -> ApiResult<Json<Vec<Mood>>> {
    Ok(Json(
        state
            .patients
            .patient_moods(psychologist.user_id, patient_id)
            .await?,
    ))
}

// ---- appointments ----

pub async fn psychologist_appointments(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
    ApiQuery(filter): ApiQuery<AppointmentFilter>,
) -> ApiResult<Json<Vec<AppointmentView>>> {
    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<AppointmentStatus>)
        .transpose()?;

    Ok(Json(
        state
            .appointments
            .for_psychologist(psychologist.user_id, status)
            .await?,
    ))
}

pub async fn booked_appointments(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
) -> ApiResult<Json<Vec<AppointmentView>>> {
    Ok(Json(
        state
            .appointments
            .booked_for_psychologist(psychologist.user_id)
            .await?,
    ))
}

pub async fn book_appointment(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
    ApiJson(req): ApiJson<BookAppointmentRequest>,
) -> ApiResult<Created> {
    state.appointments.book(psychologist.user_id, req).await?;
    Ok(created("Session successfully booked"))
}

pub async fn psychologist_cancel_appointment(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
    ApiPath(id): ApiPath<AppointmentId>,
) -> ApiResult<Json<MessageResponse>> {
    state.appointments.cancel(&psychologist, id).await?;
    Ok(ok("Appointment cancelled"))
}

pub async fn complete_appointment(
    State(state): State<SharedState>,
    PsychologistAuth(psychologist): PsychologistAuth,
    ApiPath(id): ApiPath<AppointmentId>,
) -> ApiResult<Json<MessageResponse>> {
    state.appointments.complete(psychologist.user_id, id).await?;
    Ok(ok("Appointment completed"))
}

pub async fn patient_appointments(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
) -> ApiResult<Json<Vec<AppointmentView>>> {
    Ok(Json(state.appointments.for_patient(patient.user_id).await?))
}

pub async fn patient_cancel_appointment(
    State(state): State<SharedState>,
    PatientAuth(patient): PatientAuth,
    ApiPath(id): ApiPath<AppointmentId>,
) -> ApiResult<Json<MessageResponse>> {
    state.appointments.cancel(&patient, id).await?;
    Ok(ok("Appointment cancelled"))
}
