mod config;
mod db;
mod errors;
mod jobs;
mod matching;
mod models;
mod normalize;
mod pipeline_client;
mod resumes;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::pipeline_client::HttpPipelineClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::memory::{MemoryJobStore, MemoryResumeStore};
use crate::storage::postgres::{PgJobStore, PgResumeStore};
use crate::storage::{JobStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    let (resumes, jobs): (Arc<dyn ResumeStore>, Arc<dyn JobStore>) = match &config.database_url {
        Some(url) => {
            let db = create_pool(url).await?;
            (
                Arc::new(PgResumeStore::new(db.clone())),
                Arc::new(PgJobStore::new(db)),
            )
        }
        None => {
            warn!("DATABASE_URL not set; resumes and jobs are kept in memory only");
            (
                Arc::new(MemoryResumeStore::new()),
                Arc::new(MemoryJobStore::new()),
            )
        }
    };

    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let pipeline = Arc::new(HttpPipelineClient::new(&config.pipeline_url)?);
    info!("Pipeline client initialized ({})", config.pipeline_url);

    let state = AppState {
        resumes,
        jobs,
        pipeline,
        s3,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "screener-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
