// SQLite JournalRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use mindful_core::domain::{JournalEntry, JournalEntryId, NewJournalEntry, PatientId, PsychologistId};
use mindful_core::error::{AppError, Result};
use mindful_core::port::JournalRepository;
use sqlx::SqlitePool;

pub struct SqliteJournalRepository {
    pool: SqlitePool,
}

impl SqliteJournalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn not_found(id: JournalEntryId) -> AppError {
    AppError::NotFound(format!("Journal entry {} not found", id))
}

#[async_trait]
impl JournalRepository for SqliteJournalRepository {
    async fn insert(&self, entry: &NewJournalEntry) -> Result<JournalEntry> {
        let result = sqlx::query(
            r#"
            INSERT INTO journal_entries (patient_id, title, text, tags, date, allow_psychologist)
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(entry.patient_id)
        .bind(&entry.title)
        .bind(&entry.text)
        .bind(&entry.tags)
        .bind(entry.date)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(JournalEntry {
            id: result.last_insert_rowid(),
            patient_id: entry.patient_id,
            title: entry.title.clone(),
            text: entry.text.clone(),
            tags: entry.tags.clone(),
            date: entry.date,
            allow_psychologist: false,
        })
    }

    async fn find_by_id(&self, id: JournalEntryId) -> Result<Option<JournalEntry>> {
        let row = sqlx::query_as::<_, JournalRow>("SELECT * FROM journal_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(JournalRow::into_entry))
    }

    async fn find_by_patient(&self, patient_id: PatientId) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, JournalRow>(
            "SELECT * FROM journal_entries WHERE patient_id = ? ORDER BY date DESC, id DESC",
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(JournalRow::into_entry).collect())
    }

    async fn update_content(&self, entry: &JournalEntry) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries
            SET title = ?, text = ?, tags = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.text)
        .bind(&entry.tags)
        .bind(entry.date)
        .bind(entry.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(entry.id));
        }
        Ok(())
    }

    async fn set_shared(&self, id: JournalEntryId, shared: bool) -> Result<()> {
        let result = sqlx::query("UPDATE journal_entries SET allow_psychologist = ? WHERE id = ?")
            .bind(if shared { 1 } else { 0 })
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: JournalEntryId) -> Result<()> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn find_shared_for_psychologist(
        &self,
        psychologist_id: PsychologistId,
    ) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, JournalRow>(
            r#"
            SELECT j.* FROM journal_entries j
            JOIN patients p ON p.id = j.patient_id
            WHERE p.psychologist_id = ? AND j.allow_psychologist = 1
            ORDER BY j.date DESC, j.id DESC
            "#,
        )
        .bind(psychologist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(JournalRow::into_entry).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JournalRow {
    id: i64,
    patient_id: i64,
    title: String,
    text: String,
    tags: Option<String>,
    date: NaiveDateTime,
    allow_psychologist: i32, // SQLite boolean as integer
}

impl JournalRow {
    fn into_entry(self) -> JournalEntry {
        JournalEntry {
            id: self.id,
            patient_id: self.patient_id,
            title: self.title,
            text: self.text,
            tags: self.tags,
            date: self.date,
            allow_psychologist: self.allow_psychologist != 0,
        }
    }
}
