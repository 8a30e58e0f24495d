// Appointment Service - booking and lifecycle of sessions with a psychologist

pub mod book;


pub use book::BookAppointmentRequest;

use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentView, PatientId, Principal,
    PsychologistId, Role,
};
use crate::error::{AppError, Result};
use crate::port::{
    AppointmentRepository, PatientRepository, TimeProvider, TransactionalAppointmentRepository,
};
use std::sync::Arc;
use tracing::info;

/// Appointment Service
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    booking: Arc<dyn TransactionalAppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        booking: Arc<dyn TransactionalAppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            appointments,
            booking,
            patients,
            time_provider,
        }
    }

    /// Book a slot for one of the psychologist's patients
    pub async fn book(
        &self,
        psychologist_id: PsychologistId,
        req: BookAppointmentRequest,
    ) -> Result<Appointment> {
        book::execute(
            self.booking.as_ref(),
            self.patients.as_ref(),
            self.time_provider.as_ref(),
            psychologist_id,
            req,
        )
        .await
    }

    pub async fn booked_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
    ) -> Result<Vec<AppointmentView>> {
        self.appointments
            .find_booked_for_psychologist(psychologist_id)
            .await
    }

    pub async fn for_psychologist(
        &self,
        psychologist_id: PsychologistId,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentView>> {
        self.appointments
            .find_for_psychologist(psychologist_id, status)
            .await
    }

    pub async fn for_patient(&self, patient_id: PatientId) -> Result<Vec<AppointmentView>> {
        self.appointments.find_for_patient(patient_id).await
    }

    /// Cancel on behalf of either party
    pub async fn cancel(&self, principal: &Principal, id: AppointmentId) -> Result<Appointment> {
        let mut appointment = self.load(id).await?;

        let is_party = match principal.role {
            Role::Psychologist => appointment.involves_psychologist(principal.user_id),
            Role::Patient => appointment.involves_patient(principal.user_id),
        };
        if !is_party {
            return Err(AppError::Forbidden(
                "You are not a party to this appointment".to_string(),
            ));
        }

        appointment.cancel()?;
        self.appointments
            .update_status(id, AppointmentStatus::Booked, appointment.status)
            .await?;

        info!(appointment_id = id, role = %principal.role, "Appointment cancelled");
        Ok(appointment)
    }

    /// Mark a booked appointment as held
    pub async fn complete(
        &self,
        psychologist_id: PsychologistId,
        id: AppointmentId,
    ) -> Result<Appointment> {
        let mut appointment = self.load(id).await?;

        if !appointment.involves_psychologist(psychologist_id) {
            return Err(AppError::Forbidden(
                "You are not a party to this appointment".to_string(),
            ));
        }

        appointment.complete()?;
        self.appointments
            .update_status(id, AppointmentStatus::Booked, appointment.status)
            .await?;

        info!(appointment_id = id, "Appointment completed");
        Ok(appointment)
    }

    async fn load(&self, id: AppointmentId) -> Result<Appointment> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }
}
