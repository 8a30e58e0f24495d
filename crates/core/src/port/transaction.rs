// Transaction port for atomic operations

use crate::domain::{Appointment, NewAppointment, PsychologistId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional appointment operations (check-then-insert booking)
#[async_trait]
pub trait TransactionalAppointmentRepository: Send + Sync {
    /// Begin a new write transaction
    async fn begin_transaction(&self) -> Result<Box<dyn AppointmentRepositoryTransaction>>;
}

/// Appointment operations within a transaction
#[async_trait]
pub trait AppointmentRepositoryTransaction: Transaction {
    /// Any BOOKED appointment of the psychologist intersecting `[start, end)`
    async fn exists_overlap(
        &mut self,
        psychologist_id: PsychologistId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool>;

    /// Insert a BOOKED appointment
    async fn insert(&mut self, appointment: &NewAppointment) -> Result<Appointment>;
}
