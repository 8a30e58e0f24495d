// Shared fixtures for adapter tests

use crate::{create_pool, run_migrations};
use mindful_core::domain::{NewPatient, PatientId, PsychologistId};
use sqlx::SqlitePool;

pub async fn setup_test_db() -> SqlitePool {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn new_patient(username: &str) -> NewPatient {
    NewPatient {
        username: username.to_string(),
        password_hash: "hash".to_string(),
        first_name: "Pat".to_string(),
        last_name: "Ient".to_string(),
        age: 30,
    }
}

pub async fn psychologist(pool: &SqlitePool, username: &str) -> PsychologistId {
    let result = sqlx::query(
        "INSERT INTO psychologists (username, password_hash, first_name, last_name) VALUES (?, 'hash', 'Psy', 'Chologist')",
    )
    .bind(username)
    .execute(pool)
    .await
    .unwrap();
    result.last_insert_rowid()
}

pub async fn patient(
    pool: &SqlitePool,
    username: &str,
    psychologist_id: Option<PsychologistId>,
) -> PatientId {
    let result = sqlx::query(
        "INSERT INTO patients (username, password_hash, first_name, last_name, age, psychologist_id) VALUES (?, 'hash', 'Pat', 'Ient', 30, ?)",
    )
    .bind(username)
    .bind(psychologist_id)
    .execute(pool)
    .await
    .unwrap();
    result.last_insert_rowid()
}
