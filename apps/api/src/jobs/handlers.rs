//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRecord, JobRequirements};
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(mut job): Json<JobRequirements>,
) -> Result<(StatusCode, Json<JobRecord>), AppError> {
    job.title = job.title.trim().to_string();
    if job.title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let record = state.jobs.create(job).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRecord>>, AppError> {
    Ok(Json(state.jobs.list().await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRecord>, AppError> {
    let job = state
        .jobs
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.jobs.delete(id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
