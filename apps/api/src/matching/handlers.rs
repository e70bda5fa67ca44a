//! Axum route handlers for the Match API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::scoring::{
    leaderboard, score_against_jobs, score_batch, score_resume, CandidateScore, MatchResponse,
    RoleMatch, SortKey, SortOrder, Weights,
};
use crate::models::job::JobRequirements;
use crate::models::resume::ParsedResume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume: ParsedResume,
    pub job: JobRequirements,
    pub weights: Option<Weights>,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    pub resumes: Vec<ParsedResume>,
    pub job: JobRequirements,
    pub weights: Option<Weights>,
}

#[derive(Debug, Deserialize)]
pub struct RolesMatchRequest {
    pub resume: ParsedResume,
    pub weights: Option<Weights>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardRequest {
    pub resumes: Vec<ParsedResume>,
    pub weights: Option<Weights>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match/score
pub async fn handle_score(Json(request): Json<MatchRequest>) -> Json<MatchResponse> {
    Json(score_resume(
        &request.resume,
        &request.job,
        request.weights.as_ref(),
    ))
}

/// POST /api/v1/match/score/batch
///
/// Results are in the same order as `resumes`.
pub async fn handle_score_batch(Json(request): Json<BatchMatchRequest>) -> Json<Vec<MatchResponse>> {
    Json(score_batch(
        &request.resumes,
        &request.job,
        request.weights.as_ref(),
    ))
}

/// POST /api/v1/match/score/roles
///
/// Scores one resume against every stored job, best match first.
pub async fn handle_score_roles(
    State(state): State<AppState>,
    Json(request): Json<RolesMatchRequest>,
) -> Result<Json<Vec<RoleMatch>>, AppError> {
    let jobs = state.jobs.list().await?;
    Ok(Json(score_against_jobs(
        &request.resume,
        &jobs,
        request.weights.as_ref(),
    )))
}

/// POST /api/v1/match/score/role/:job_id/batch?sort=score|experience&order=asc|desc
pub async fn handle_leaderboard(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<LeaderboardQuery>,
    Json(request): Json<LeaderboardRequest>,
) -> Result<Json<Vec<CandidateScore>>, AppError> {
    let job = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(leaderboard(
        &request.resumes,
        &job.requirements,
        request.weights.as_ref(),
        query.sort,
        query.order,
    )))
}
