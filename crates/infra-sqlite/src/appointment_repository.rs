// SQLite AppointmentRepository Implementation

use crate::error::map_sqlx_error;
use crate::SqliteAppointmentTransaction;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use mindful_core::domain::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentView, PatientId, PsychologistId,
};
use mindful_core::error::{AppError, Result};
use mindful_core::port::{
    AppointmentRepository, AppointmentRepositoryTransaction, TransactionalAppointmentRepository,
};
use sqlx::SqlitePool;

const SELECT_VIEW: &str = r#"
    SELECT a.id, a.start_time, a.end_time, a.status,
           a.patient_id, p.first_name AS patient_first_name, p.last_name AS patient_last_name,
           a.psychologist_id, s.first_name AS psychologist_first_name, s.last_name AS psychologist_last_name
    FROM appointments a
    JOIN patients p ON p.id = a.patient_id
    JOIN psychologists s ON s.id = a.psychologist_id
"#;

pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn parse_status(raw: &str) -> Result<AppointmentStatus> {
    raw.parse()
        .map_err(|_| AppError::Database(format!("Unknown appointment status in row: {}", raw)))
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            "SELECT id, psychologist_id, patient_id, start_time, end_time, status FROM appointments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(AppointmentRow::into_appointment).transpose()
    }

    async fn update_status(
        &self,
        id: AppointmentId,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ? AND status = ?")
            .bind(to.as_str())
            .bind(id)
            .bind(from.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // Distinguish missing row from lost race
            let current: Option<String> =
                sqlx::query_scalar("SELECT status FROM appointments WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

            return match current {
                None => Err(AppError::NotFound(format!("Appointment {} not found", id))),
                Some(status) => Err(AppError::Conflict(format!(
                    "Appointment {} is {}, expected {}",
                    id, status, from
                ))),
            };
        }

        Ok(())
    }

    async fn find_booked_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
    ) -> Result<Vec<AppointmentView>> {
        let rows = sqlx::query_as::<_, AppointmentViewRow>(&format!(
            "{} WHERE a.psychologist_id = ? AND a.status = ? ORDER BY a.start_time ASC",
            SELECT_VIEW
        ))
        .bind(psychologist_id)
        .bind(AppointmentStatus::Booked.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(AppointmentViewRow::into_view).collect()
    }

    async fn find_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentView>> {
        let rows = sqlx::query_as::<_, AppointmentViewRow>(&format!(
            "{} WHERE a.psychologist_id = ? AND (? IS NULL OR a.status = ?) ORDER BY a.start_time DESC",
            SELECT_VIEW
        ))
        .bind(psychologist_id)
        .bind(status.map(|s| s.as_str()))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(AppointmentViewRow::into_view).collect()
    }

    async fn find_for_patient(&self, patient_id: PatientId) -> Result<Vec<AppointmentView>> {
        let rows = sqlx::query_as::<_, AppointmentViewRow>(&format!(
            "{} WHERE a.patient_id = ? ORDER BY a.start_time DESC",
            SELECT_VIEW
        ))
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(AppointmentViewRow::into_view).collect()
    }
}

#[async_trait]
impl TransactionalAppointmentRepository for SqliteAppointmentRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn AppointmentRepositoryTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteAppointmentTransaction::new(tx)))
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AppointmentRow {
    id: i64,
    psychologist_id: i64,
    patient_id: i64,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    status: String,
}

impl AppointmentRow {
    pub(crate) fn into_appointment(self) -> Result<Appointment> {
        Ok(Appointment {
            id: self.id,
            psychologist_id: self.psychologist_id,
            patient_id: self.patient_id,
            start_time: self.start_time,
            end_time: self.end_time,
            status: parse_status(&self.status)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AppointmentViewRow {
    id: i64,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    status: String,
    patient_id: i64,
    patient_first_name: String,
    patient_last_name: String,
    psychologist_id: i64,
    psychologist_first_name: String,
    psychologist_last_name: String,
}

impl AppointmentViewRow {
    fn into_view(self) -> Result<AppointmentView> {
        Ok(AppointmentView {
            id: self.id,
            start_time: self.start_time,
            end_time: self.end_time,
            status: parse_status(&self.status)?,
            patient_id: self.patient_id,
            patient_first_name: self.patient_first_name,
            patient_last_name: self.patient_last_name,
            psychologist_id: self.psychologist_id,
            psychologist_first_name: self.psychologist_first_name,
            psychologist_last_name: self.psychologist_last_name,
        })
    }
}
