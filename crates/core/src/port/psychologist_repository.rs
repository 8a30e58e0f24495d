// Psychologist Repository Port (Interface)

use crate::domain::{NewPsychologist, Psychologist, PsychologistId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PsychologistRepository: Send + Sync {
    async fn insert(&self, psychologist: &NewPsychologist) -> Result<Psychologist>;

    async fn find_by_id(&self, id: PsychologistId) -> Result<Option<Psychologist>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Psychologist>>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;
}
