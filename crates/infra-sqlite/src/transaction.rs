// SQLite Transaction Implementation (appointment booking)

use crate::appointment_repository::AppointmentRow;
use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use mindful_core::domain::{Appointment, AppointmentStatus, NewAppointment, PsychologistId};
use mindful_core::error::Result;
use mindful_core::port::{AppointmentRepositoryTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

pub struct SqliteAppointmentTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
}

impl SqliteAppointmentTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteAppointmentTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl AppointmentRepositoryTransaction for SqliteAppointmentTransaction {
    async fn exists_overlap(
        &mut self,
        psychologist_id: PsychologistId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool> {
        // Take the write lock before reading so concurrent bookings serialize
        sqlx::query("UPDATE psychologists SET id = id WHERE id = ?")
            .bind(psychologist_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM appointments
            WHERE psychologist_id = ?
              AND status = ?
              AND start_time < ?
              AND end_time > ?
            "#,
        )
        .bind(psychologist_id)
        .bind(AppointmentStatus::Booked.as_str())
        .bind(end)
        .bind(start)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn insert(&mut self, appointment: &NewAppointment) -> Result<Appointment> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (psychologist_id, patient_id, start_time, end_time, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(appointment.psychologist_id)
        .bind(appointment.patient_id)
        .bind(appointment.slot.start())
        .bind(appointment.slot.end())
        .bind(AppointmentStatus::Booked.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        let row = sqlx::query_as::<_, AppointmentRow>(
            "SELECT id, psychologist_id, patient_id, start_time, end_time, status FROM appointments WHERE id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        row.into_appointment()
    }
}
