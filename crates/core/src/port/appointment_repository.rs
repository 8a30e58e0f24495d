// Appointment Repository Port (Interface)

use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentView, PatientId, PsychologistId,
};
use crate::error::Result;
use async_trait::async_trait;

/// Read/update side of appointment persistence.
/// Booking goes through `TransactionalAppointmentRepository`.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>>;

    /// Conditional status update (`from` -> `to`).
    ///
    /// Fails with `NotFound` if the appointment is missing and `Conflict`
    /// if its status is no longer `from`.
    async fn update_status(
        &self,
        id: AppointmentId,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<()>;

    /// BOOKED appointments of a psychologist, earliest first
    async fn find_booked_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
    ) -> Result<Vec<AppointmentView>>;

    /// All (or status-filtered) appointments of a psychologist, latest first
    async fn find_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentView>>;

    /// All appointments of a patient, latest first
    async fn find_for_patient(&self, patient_id: PatientId) -> Result<Vec<AppointmentView>>;
}
