// Book Appointment Use Case

use crate::domain::{Appointment, NewAppointment, PatientId, PsychologistId, TimeSlot};
use crate::error::{AppError, Result};
use crate::port::{PatientRepository, TimeProvider, TransactionalAppointmentRepository};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Booking request sent by a psychologist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    #[serde(alias = "id", default)]
    pub patient_id: PatientId,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

/// Validate request shape and produce a future slot
pub fn validate_request(req: &BookAppointmentRequest, now: NaiveDateTime) -> Result<TimeSlot> {
    if req.patient_id <= 0 {
        return Err(AppError::Validation("patientId must be > 0".to_string()));
    }

    let (start, end) = match (req.start_time, req.end_time) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AppError::Validation(
                "startTime and endTime are required".to_string(),
            ))
        }
    };

    Ok(TimeSlot::new(start, end, now)?)
}

/// Execute booking (overlap check and insert share one transaction)
///
/// # Arguments
///
/// * `appointments` - Transactional appointment repository
/// * `patients` - Patient lookup for the assignment check
/// * `time_provider` - Time provider (injected for determinism)
/// * `psychologist_id` - Authenticated psychologist
/// * `req` - Booking request
pub async fn execute(
    appointments: &dyn TransactionalAppointmentRepository,
    patients: &dyn PatientRepository,
    time_provider: &dyn TimeProvider,
    psychologist_id: PsychologistId,
    req: BookAppointmentRequest,
) -> Result<Appointment> {
    let slot = validate_request(&req, time_provider.now())?;

    let patient = patients
        .find_by_id(req.patient_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    if !patient.is_assigned_to(psychologist_id) {
        return Err(AppError::Forbidden(format!(
            "Cannot make an appointment for user with id: {}",
            patient.id
        )));
    }

    let mut tx = appointments.begin_transaction().await?;

    if tx
        .exists_overlap(psychologist_id, slot.start(), slot.end())
        .await?
    {
        tx.rollback().await?;
        warn!(
            psychologist_id = psychologist_id,
            start = %slot.start(),
            end = %slot.end(),
            "Booking rejected: slot overlaps an existing appointment"
        );
        return Err(AppError::Conflict(
            "The requested time slot overlaps an existing appointment".to_string(),
        ));
    }

    let appointment = tx
        .insert(&NewAppointment {
            psychologist_id,
            patient_id: patient.id,
            slot,
        })
        .await?;

    tx.commit().await?;

    info!(
        appointment_id = appointment.id,
        psychologist_id = psychologist_id,
        patient_id = patient.id,
        "Appointment booked"
    );
    Ok(appointment)
}
