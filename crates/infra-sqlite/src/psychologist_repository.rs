// SQLite PsychologistRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use mindful_core::domain::{NewPsychologist, Psychologist, PsychologistId};
use mindful_core::error::Result;
use mindful_core::port::PsychologistRepository;
use sqlx::SqlitePool;

pub struct SqlitePsychologistRepository {
    pool: SqlitePool,
}

impl SqlitePsychologistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PsychologistRepository for SqlitePsychologistRepository {
    async fn insert(&self, psychologist: &NewPsychologist) -> Result<Psychologist> {
        let result = sqlx::query(
            r#"
            INSERT INTO psychologists (username, password_hash, first_name, last_name)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&psychologist.username)
        .bind(&psychologist.password_hash)
        .bind(&psychologist.first_name)
        .bind(&psychologist.last_name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Psychologist {
            id: result.last_insert_rowid(),
            username: psychologist.username.clone(),
            password_hash: psychologist.password_hash.clone(),
            first_name: psychologist.first_name.clone(),
            last_name: psychologist.last_name.clone(),
        })
    }

    async fn find_by_id(&self, id: PsychologistId) -> Result<Option<Psychologist>> {
        let row = sqlx::query_as::<_, PsychologistRow>(
            "SELECT id, username, password_hash, first_name, last_name FROM psychologists WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PsychologistRow::into_psychologist))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Psychologist>> {
        let row = sqlx::query_as::<_, PsychologistRow>(
            "SELECT id, username, password_hash, first_name, last_name FROM psychologists WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PsychologistRow::into_psychologist))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM psychologists WHERE username = ?")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PsychologistRow {
    id: i64,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
}

impl PsychologistRow {
    fn into_psychologist(self) -> Psychologist {
        Psychologist {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = setup_test_db().await;
        let repo = SqlitePsychologistRepository::new(pool);

        let inserted = repo
            .insert(&NewPsychologist {
                username: "drfreud".to_string(),
                password_hash: "hash".to_string(),
                first_name: "Sigmund".to_string(),
                last_name: "Freud".to_string(),
            })
            .await
            .unwrap();

        let found = repo.find_by_username("drfreud").await.unwrap().unwrap();
        assert_eq!(found, inserted);
        assert_eq!(repo.find_by_id(inserted.id).await.unwrap(), Some(inserted));
        assert!(repo.exists_by_username("drfreud").await.unwrap());
        assert!(!repo.exists_by_username("drjung").await.unwrap());
    }
}
