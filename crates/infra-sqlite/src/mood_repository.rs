// SQLite MoodRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::NaiveDate;
use mindful_core::domain::{Mood, NewMood, PatientId};
use mindful_core::error::Result;
use mindful_core::port::MoodRepository;
use sqlx::SqlitePool;

pub struct SqliteMoodRepository {
    pool: SqlitePool,
}

impl SqliteMoodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoodRepository for SqliteMoodRepository {
    async fn insert(&self, mood: &NewMood) -> Result<Mood> {
        // idx_moods_patient_date rejects a second row for the same day
        let result = sqlx::query("INSERT INTO moods (patient_id, value, date) VALUES (?, ?, ?)")
            .bind(mood.patient_id)
            .bind(mood.value)
            .bind(mood.date)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Mood {
            id: result.last_insert_rowid(),
            patient_id: mood.patient_id,
            value: mood.value,
            date: mood.date,
        })
    }

    async fn find_by_patient(&self, patient_id: PatientId) -> Result<Vec<Mood>> {
        let rows = sqlx::query_as::<_, MoodRow>(
            "SELECT id, patient_id, value, date FROM moods WHERE patient_id = ? ORDER BY date ASC",
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(MoodRow::into_mood).collect())
    }

    async fn find_by_patient_and_date(
        &self,
        patient_id: PatientId,
        date: NaiveDate,
    ) -> Result<Option<Mood>> {
        let row = sqlx::query_as::<_, MoodRow>(
            "SELECT id, patient_id, value, date FROM moods WHERE patient_id = ? AND date = ?",
        )
        .bind(patient_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(MoodRow::into_mood))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MoodRow {
    id: i64,
    patient_id: i64,
    value: i32,
    date: NaiveDate,
}

impl MoodRow {
    fn into_mood(self) -> Mood {
        Mood {
            id: self.id,
            patient_id: self.patient_id,
            value: self.value,
            date: self.date,
        }
    }
}
