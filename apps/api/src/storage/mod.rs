//! Persistence for resumes and job requirements.
//!
//! Handlers only see `Arc<dyn ResumeStore>` / `Arc<dyn JobStore>`; the backend
//! is picked at startup (PostgreSQL when `DATABASE_URL` is set, memory otherwise).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::{JobRecord, JobRequirements};
use crate::models::resume::{ParsedResume, ResumeRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persists a resume, assigning its id and timestamps.
    async fn create(&self, resume: ParsedResume) -> Result<ResumeRecord, StoreError>;
    /// All resumes, newest first.
    async fn list(&self) -> Result<Vec<ResumeRecord>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: JobRequirements) -> Result<JobRecord, StoreError>;
    /// All jobs, newest first.
    async fn list(&self) -> Result<Vec<JobRecord>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<JobRecord>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
