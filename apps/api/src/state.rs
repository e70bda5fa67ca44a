use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::pipeline_client::ResumePipeline;
use crate::storage::{JobStore, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    pub jobs: Arc<dyn JobStore>,
    /// External resume-parsing service. Default: `HttpPipelineClient`.
    pub pipeline: Arc<dyn ResumePipeline>,
    /// Raw uploads ("upload only" mode) land in `config.s3_bucket`.
    pub s3: S3Client,
    pub config: Config,
}
