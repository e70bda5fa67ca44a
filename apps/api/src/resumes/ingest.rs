//! Resume intake — the two upload modes.
//!
//! Full pipeline: file → parsing service → normalize → store.
//! Upload only:   file → S3, no parsing.

use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ParsedResume;
use crate::normalize::{extract_interview_questions, normalize};
use crate::pipeline_client::{ResumeFile, ResumePipeline, SUPPORTED_EXTENSIONS};
use crate::storage::ResumeStore;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// `None` when the normalized resume could not be saved.
    pub resume_id: Option<Uuid>,
    pub resume: ParsedResume,
    pub interview_questions: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct UploadReceipt {
    pub file_id: Uuid,
    pub file_name: String,
    pub s3_key: String,
}

/// Rejects files the parsing service cannot read.
pub fn ensure_supported(file: &ResumeFile) -> Result<(), AppError> {
    if file.is_supported() {
        return Ok(());
    }
    let supported: Vec<String> = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect();
    Err(AppError::Validation(format!(
        "Unsupported file type '{}'. Supported: {}",
        file.extension(),
        supported.join(", ")
    )))
}

/// Normalizes a pipeline result and saves it.
///
/// A failed save does not fail the ingest: the normalized resume and questions
/// are still returned, without an id.
pub async fn ingest_payload(store: &dyn ResumeStore, payload: &Value) -> IngestResponse {
    let resume = normalize(payload);
    let interview_questions = extract_interview_questions(payload);

    let resume_id = match store.create(resume.clone()).await {
        Ok(record) => {
            info!(
                "Ingested resume {} ({} skills, education {})",
                record.id,
                record.resume.skills.len(),
                record.resume.education
            );
            Some(record.id)
        }
        Err(e) => {
            warn!("Resume save failed, returning unsaved result: {e}");
            None
        }
    };

    IngestResponse {
        resume_id,
        resume,
        interview_questions,
    }
}

/// Sends a file through the parsing service, then ingests the result.
pub async fn run_full_pipeline(
    pipeline: &dyn ResumePipeline,
    store: &dyn ResumeStore,
    file: &ResumeFile,
) -> Result<IngestResponse, AppError> {
    ensure_supported(file)?;
    info!("Running resume pipeline for {}", file.file_name);
    let payload = pipeline.run(file).await?;
    Ok(ingest_payload(store, &payload).await)
}

/// Object key for a raw upload: `resumes/<uuid><ext>`, extension lowercased.
pub fn upload_key(file_id: Uuid, file: &ResumeFile) -> String {
    format!("resumes/{}{}", file_id, file.extension())
}

/// Stores a raw upload in S3 under [`upload_key`].
pub async fn store_upload(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    file: ResumeFile,
) -> Result<UploadReceipt, AppError> {
    ensure_supported(&file)?;

    let file_id = Uuid::new_v4();
    let s3_key = upload_key(file_id, &file);
    let content_type = file
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(file.bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("S3 upload failed: {e}")))?;

    info!("Uploaded resume to s3://{}/{}", s3_bucket, s3_key);

    Ok(UploadReceipt {
        file_id,
        file_name: file.file_name,
        s3_key,
    })
}
