pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Resume uploads can exceed axum's 2 MB default body limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resume/normalize", post(resumes::handle_normalize))
        .route("/api/v1/resume/ingest", post(resumes::handle_ingest))
        .route("/api/v1/resume/upload", post(resumes::handle_upload))
        .route(
            "/api/v1/resume/full-pipeline",
            post(resumes::handle_full_pipeline),
        )
        .route(
            "/api/v1/resume/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resume/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        // Jobs API
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        // Match API
        .route("/api/v1/match/score", post(matching::handle_score))
        .route("/api/v1/match/score/batch", post(matching::handle_score_batch))
        .route("/api/v1/match/score/roles", post(matching::handle_score_roles))
        .route(
            "/api/v1/match/score/role/:job_id/batch",
            post(matching::handle_leaderboard),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
