// SQLite PatientRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use mindful_core::domain::{NewPatient, Patient, PatientId, PsychologistId};
use mindful_core::error::Result;
use mindful_core::port::PatientRepository;
use sqlx::SqlitePool;

const SELECT_PATIENT: &str = "SELECT id, username, password_hash, first_name, last_name, age, psychologist_id FROM patients";

pub struct SqlitePatientRepository {
    pool: SqlitePool,
}

impl SqlitePatientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for SqlitePatientRepository {
    async fn insert(&self, patient: &NewPatient) -> Result<Patient> {
        let result = sqlx::query(
            r#"
            INSERT INTO patients (username, password_hash, first_name, last_name, age)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&patient.username)
        .bind(&patient.password_hash)
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.age)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Patient {
            id: result.last_insert_rowid(),
            username: patient.username.clone(),
            password_hash: patient.password_hash.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            age: patient.age,
            psychologist_id: None,
        })
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>> {
        let row = sqlx::query_as::<_, PatientRow>(&format!("{} WHERE id = ?", SELECT_PATIENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PatientRow::into_patient))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Patient>> {
        let row =
            sqlx::query_as::<_, PatientRow>(&format!("{} WHERE username = ?", SELECT_PATIENT))
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(PatientRow::into_patient))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn find_unassigned(&self) -> Result<Vec<Patient>> {
        let rows = sqlx::query_as::<_, PatientRow>(&format!(
            "{} WHERE psychologist_id IS NULL ORDER BY id",
            SELECT_PATIENT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PatientRow::into_patient).collect())
    }

    async fn find_by_psychologist(&self, psychologist_id: PsychologistId) -> Result<Vec<Patient>> {
        let rows = sqlx::query_as::<_, PatientRow>(&format!(
            "{} WHERE psychologist_id = ? ORDER BY last_name, first_name, id",
            SELECT_PATIENT
        ))
        .bind(psychologist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PatientRow::into_patient).collect())
    }

    async fn assign_psychologist(
        &self,
        patient_id: PatientId,
        psychologist_id: PsychologistId,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE patients
            SET psychologist_id = ?
            WHERE id = ? AND (psychologist_id IS NULL OR psychologist_id = ?)
            "#,
        )
        .bind(psychologist_id)
        .bind(patient_id)
        .bind(psychologist_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PatientRow {
    id: i64,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    age: i32,
    psychologist_id: Option<i64>,
}

impl PatientRow {
    fn into_patient(self) -> Patient {
        Patient {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            psychologist_id: self.psychologist_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{new_patient, psychologist, setup_test_db};
    use mindful_core::error::AppError;

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = setup_test_db().await;
        let repo = SqlitePatientRepository::new(pool);

        let inserted = repo.insert(&new_patient("alice")).await.unwrap();
        assert!(inserted.id > 0);
        assert!(!inserted.is_assigned());

        let by_id = repo.find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(by_id, inserted);

        let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, inserted.id);

        assert!(repo.exists_by_username("alice").await.unwrap());
        assert!(!repo.exists_by_username("bob").await.unwrap());
        assert!(repo.find_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = setup_test_db().await;
        let repo = SqlitePatientRepository::new(pool);

        repo.insert(&new_patient("alice")).await.unwrap();
        let err = repo.insert(&new_patient("alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_assignment_is_exclusive() {
        let pool = setup_test_db().await;
        let repo = SqlitePatientRepository::new(pool.clone());
        let first = psychologist(&pool, "drfirst").await;
        let second = psychologist(&pool, "drsecond").await;

        let patient = repo.insert(&new_patient("alice")).await.unwrap();

        assert!(repo.assign_psychologist(patient.id, first).await.unwrap());
        // Same psychologist again is fine
        assert!(repo.assign_psychologist(patient.id, first).await.unwrap());
        // Someone else is refused
        assert!(!repo.assign_psychologist(patient.id, second).await.unwrap());
        // Unknown patient
        assert!(!repo.assign_psychologist(9999, first).await.unwrap());

        let stored = repo.find_by_id(patient.id).await.unwrap().unwrap();
        assert!(stored.is_assigned_to(first));
    }

    #[tokio::test]
    async fn test_assigned_and_unassigned_lists() {
        let pool = setup_test_db().await;
        let repo = SqlitePatientRepository::new(pool.clone());
        let psy = psychologist(&pool, "drwho").await;

        let mut zed = new_patient("zed");
        zed.last_name = "Zimmer".to_string();
        let zed = repo.insert(&zed).await.unwrap();

        let mut amy = new_patient("amy");
        amy.last_name = "Adams".to_string();
        let amy = repo.insert(&amy).await.unwrap();

        let loner = repo.insert(&new_patient("loner")).await.unwrap();

        repo.assign_psychologist(zed.id, psy).await.unwrap();
        repo.assign_psychologist(amy.id, psy).await.unwrap();

        let assigned = repo.find_by_psychologist(psy).await.unwrap();
        let names: Vec<_> = assigned.iter().map(|p| p.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "zed"]);

        let unassigned = repo.find_unassigned().await.unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, loner.id);
    }
}
