use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::{JobRecord, JobRequirements};
use crate::models::resume::{ParsedResume, ResumeRecord};
use crate::storage::{JobStore, ResumeStore, StoreError};

/// PostgreSQL-backed resume store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, resume: ParsedResume) -> Result<ResumeRecord, StoreError> {
        let record = sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes
                (id, name, email, phone, skills, years_experience, education, raw_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resume.name)
        .bind(&resume.email)
        .bind(&resume.phone)
        .bind(&resume.skills)
        .bind(resume.years_experience)
        .bind(resume.education)
        .bind(&resume.raw_text)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted resume {}", record.id);
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ResumeRecord>, StoreError> {
        let records =
            sqlx::query_as::<_, ResumeRecord>("SELECT * FROM resumes ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(records)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let record = sqlx::query_as::<_, ResumeRecord>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed job requirements store.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, job: JobRequirements) -> Result<JobRecord, StoreError> {
        let record = sqlx::query_as::<_, JobRecord>(
            r#"
            INSERT INTO jobs
                (id, title, must_have_skills, nice_to_have_skills,
                 min_years_experience, required_education, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&job.title)
        .bind(&job.must_have_skills)
        .bind(&job.nice_to_have_skills)
        .bind(job.min_years_experience)
        .bind(job.required_education)
        .bind(&job.description)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted job {} ({})", record.id, record.requirements.title);
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<JobRecord>, StoreError> {
        let records = sqlx::query_as::<_, JobRecord>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRecord>, StoreError> {
        let record = sqlx::query_as::<_, JobRecord>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
