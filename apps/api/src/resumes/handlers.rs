//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ParsedResume, ResumeRecord};
use crate::normalize::normalize;
use crate::pipeline_client::ResumeFile;
use crate::resumes::ingest::{
    ingest_payload, run_full_pipeline, store_upload, IngestResponse, UploadReceipt,
};
use crate::state::AppState;

/// Pulls the `file` part out of a multipart upload.
async fn read_resume_file(mut multipart: Multipart) -> Result<ResumeFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        return Ok(ResumeFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/resume/normalize
///
/// Normalizes a pipeline result without storing it.
pub async fn handle_normalize(Json(payload): Json<Value>) -> Json<ParsedResume> {
    Json(normalize(&payload))
}

/// POST /api/v1/resume/ingest
///
/// Normalizes an already-decoded pipeline result and stores it.
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Json<IngestResponse> {
    Json(ingest_payload(state.resumes.as_ref(), &payload).await)
}

/// POST /api/v1/resume/full-pipeline
///
/// Upload & parse: forwards the file to the parsing service, then normalizes and stores.
pub async fn handle_full_pipeline(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let file = read_resume_file(multipart).await?;
    let response =
        run_full_pipeline(state.pipeline.as_ref(), state.resumes.as_ref(), &file).await?;
    Ok(Json(response))
}

/// POST /api/v1/resume/upload
///
/// Upload only: stores the raw file in S3.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadReceipt>), AppError> {
    let file = read_resume_file(multipart).await?;
    let receipt = store_upload(&state.s3, &state.config.s3_bucket, file).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// POST /api/v1/resume/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(resume): Json<ParsedResume>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let record = state.resumes.create(resume).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resume/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    Ok(Json(state.resumes.list().await?))
}

/// GET /api/v1/resume/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state
        .resumes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(record))
}

/// DELETE /api/v1/resume/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.resumes.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
