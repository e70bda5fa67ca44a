//! Pipeline Client — the single point of entry for the external resume-parsing service.
//!
//! The service runs text extraction, field extraction and question generation in one
//! call (`/api/v1/resume/full-pipeline`) and answers with loosely-shaped JSON. This
//! client only moves bytes; shaping the answer is `crate::normalize`'s job.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

const FULL_PIPELINE_PATH: &str = "/api/v1/resume/full-pipeline";
const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 180;
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// File extensions the parsing service accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "gif", "bmp", "webp"];

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pipeline error (status {status}): {message}")]
    Upstream { status: u16, message: String },
}

impl PipelineError {
    /// Transport failures, 429 and 5xx are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            PipelineError::Http(_) => true,
            PipelineError::Upstream { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// An uploaded resume file on its way to the parsing service.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeFile {
    /// Lowercased extension including the dot, e.g. `.pdf`. Empty when there is none.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default()
    }

    pub fn is_supported(&self) -> bool {
        let ext = self.extension();
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.strip_prefix('.') == Some(*supported))
    }
}

/// The resume pipeline seam. Carried in `AppState` as `Arc<dyn ResumePipeline>`.
#[async_trait]
pub trait ResumePipeline: Send + Sync {
    /// Runs the full pipeline on one file and returns the raw JSON result.
    async fn run(&self, file: &ResumeFile) -> Result<Value, PipelineError>;
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    detail: Value,
}

/// HTTP client for the parsing service, with retry on transport errors, 429 and 5xx.
#[derive(Clone)]
pub struct HttpPipelineClient {
    client: Client,
    base_url: String,
    backoff_base: Duration,
}

impl HttpPipelineClient {
    pub fn new(base_url: &str) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            backoff_base: BACKOFF_BASE,
        })
    }

    /// First retry waits `base`, each later one twice as long.
    #[cfg(test)]
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    fn form(file: &ResumeFile) -> Result<Form, PipelineError> {
        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        Ok(Form::new().part("file", part))
    }

    async fn attempt(&self, url: &str, form: Form) -> Result<Value, PipelineError> {
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PipelineError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        debug!("Pipeline call succeeded ({} bytes returned)", body.len());
        Ok(decode_body(&body))
    }
}

#[async_trait]
impl ResumePipeline for HttpPipelineClient {
    async fn run(&self, file: &ResumeFile) -> Result<Value, PipelineError> {
        let url = format!("{}{}", self.base_url, FULL_PIPELINE_PATH);
        let mut attempt = 1;

        loop {
            // Multipart forms are consumed on send, so each attempt builds its own.
            let form = Self::form(file)?;
            match self.attempt(&url, form).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                    // Exponential backoff: base, 2 × base
                    let delay = self.backoff_base * (1 << (attempt - 1));
                    warn!(
                        "Pipeline call attempt {} for {} failed ({}), retrying after {}ms...",
                        attempt,
                        file.file_name,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Pulls `detail` out of an error body, falling back to the body itself.
fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<UpstreamError>(body) {
        Ok(UpstreamError {
            detail: Value::String(detail),
        }) => detail,
        Ok(UpstreamError { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "<empty>".to_string(),
        Err(_) => body.to_string(),
    }
}

/// A 2xx body that is not JSON is still a successful upload.
fn decode_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(body).unwrap_or_else(|_| json!({ "message": "Uploaded", "raw": body }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Router};

    /// Serves `responses` in order from the full-pipeline path, repeating the
    /// last one. Returns the base URL and a hit counter.
    async fn spawn_pipeline(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            FULL_PIPELINE_PATH,
            post(move |_body: Bytes| {
                let counter = counter.clone();
                let responses = responses.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    let (status, body) = responses[n.min(responses.len() - 1)];
                    (StatusCode::from_u16(status).unwrap(), body)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), hits)
    }

    fn client(base_url: &str) -> HttpPipelineClient {
        HttpPipelineClient::new(base_url)
            .unwrap()
            .with_backoff_base(Duration::from_millis(1))
    }

    fn file(name: &str) -> ResumeFile {
        ResumeFile {
            file_name: name.to_string(),
            content_type: None,
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(file("Resume.PDF").extension(), ".pdf");
        assert_eq!(file("noext").extension(), "");
    }

    #[test]
    fn test_supported_extensions() {
        assert!(file("cv.pdf").is_supported());
        assert!(file("scan.JPEG").is_supported());
        assert!(!file("cv.docx").is_supported());
        assert!(!file("pdf").is_supported());
    }

    #[test]
    fn test_upstream_message_prefers_detail() {
        assert_eq!(upstream_message(r#"{"detail": "Unsupported file type"}"#), "Unsupported file type");
        assert_eq!(
            upstream_message(r#"{"detail": [{"msg": "field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(upstream_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(upstream_message(""), "<empty>");
    }

    #[test]
    fn test_decode_body_tolerates_non_json() {
        assert_eq!(decode_body(r#"{"status": "success"}"#), json!({"status": "success"}));
        assert_eq!(decode_body(""), json!({}));
        assert_eq!(
            decode_body("ok"),
            json!({"message": "Uploaded", "raw": "ok"})
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpPipelineClient::new("http://localhost:8000///").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_run_retries_server_error_then_succeeds() {
        let (url, hits) = spawn_pipeline(vec![(503, "busy"), (200, r#"{"status": "success"}"#)]).await;
        let value = client(&url).run(&file("cv.pdf")).await.unwrap();
        assert_eq!(value, json!({"status": "success"}));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_run_retries_rate_limit() {
        let (url, hits) = spawn_pipeline(vec![(429, ""), (200, "")]).await;
        let value = client(&url).run(&file("cv.pdf")).await.unwrap();
        assert_eq!(value, json!({}));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_run_client_error_fails_without_retry() {
        let (url, hits) = spawn_pipeline(vec![(400, r#"{"detail": "Unsupported file type"}"#)]).await;
        let err = client(&url).run(&file("cv.pdf")).await.unwrap_err();
        assert!(
            matches!(&err, PipelineError::Upstream { status: 400, message } if message == "Unsupported file type"),
            "unexpected error: {err:?}"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_three_attempts() {
        let (url, hits) = spawn_pipeline(vec![(500, r#"{"detail": "model crashed"}"#)]).await;
        let err = client(&url).run(&file("cv.pdf")).await.unwrap_err();
        assert!(
            matches!(&err, PipelineError::Upstream { status: 500, message } if message == "model crashed"),
            "unexpected error: {err:?}"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_retries_transport_errors_with_backoff() {
        // Bind then drop, so nothing listens on the port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let started = tokio::time::Instant::now();
        let err = HttpPipelineClient::new(&format!("http://{addr}"))
            .unwrap()
            .run(&file("cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Http(_)), "unexpected error: {err:?}");
        // Two backoff sleeps: 1s + 2s.
        assert!(started.elapsed() >= Duration::from_secs(3));
    }
}
