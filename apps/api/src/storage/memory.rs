use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::job::{JobRecord, JobRequirements};
use crate::models::resume::{ParsedResume, ResumeRecord};
use crate::storage::{JobStore, ResumeStore, StoreError};

/// In-memory resume store for local development and tests.
/// Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryResumeStore {
    records: RwLock<Vec<ResumeRecord>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn create(&self, resume: ParsedResume) -> Result<ResumeRecord, StoreError> {
        let now = Utc::now();
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            resume,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        debug!("Stored resume {} in memory", record.id);
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ResumeRecord>, StoreError> {
        Ok(self.records.read().await.iter().rev().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

/// In-memory job store for local development and tests.
#[derive(Default)]
pub struct MemoryJobStore {
    records: RwLock<Vec<JobRecord>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: JobRequirements) -> Result<JobRecord, StoreError> {
        let record = JobRecord {
            id: Uuid::new_v4(),
            requirements: job,
            created_at: Utc::now(),
        };
        self.records.write().await.push(record.clone());
        debug!("Stored job {} in memory", record.id);
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<JobRecord>, StoreError> {
        Ok(self.records.read().await.iter().rev().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(name: &str) -> ParsedResume {
        ParsedResume {
            name: name.to_string(),
            ..ParsedResume::default()
        }
    }

    #[tokio::test]
    async fn test_resume_create_assigns_identity() {
        let store = MemoryResumeStore::new();
        let record = store.create(resume("Ada")).await.unwrap();
        assert_eq!(record.resume.name, "Ada");
        assert_eq!(record.created_at, record.updated_at);
        let fetched = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.resume, record.resume);
    }

    #[tokio::test]
    async fn test_resume_list_newest_first() {
        let store = MemoryResumeStore::new();
        store.create(resume("first")).await.unwrap();
        store.create(resume("second")).await.unwrap();
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.resume.name)
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_resume_delete() {
        let store = MemoryResumeStore::new();
        let record = store.create(resume("Ada")).await.unwrap();
        assert!(store.delete(record.id).await.unwrap());
        assert!(!store.delete(record.id).await.unwrap());
        assert!(store.get(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_job_roundtrip_and_missing() {
        let store = MemoryJobStore::new();
        let job = JobRequirements {
            title: "Data Engineer".to_string(),
            ..JobRequirements::default()
        };
        let record = store.create(job).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(
            store.get(record.id).await.unwrap().unwrap().requirements.title,
            "Data Engineer"
        );
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
