use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::api::VerificationApi;
use super::detect::mime_for_path;
use crate::config::ResolvedSettings;
use crate::errors::{
    CredisourceError, GENERIC_SUBMISSION_MESSAGE, MISSING_JOB_ID_MESSAGE, POLL_NETWORK_MESSAGE,
};
use crate::models::{ContentType, JobSnapshot};

const USER_AGENT: &str = concat!("credisource/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body that is written to the log.
const LOGGED_BODY_LIMIT: usize = 512;

/// reqwest-backed client for the verification backend.
pub struct HttpVerificationClient {
    client: Client,
    base_url: String,
}

impl HttpVerificationClient {
    /// `base_url` should be like `http://localhost:8000`; a trailing slash is dropped.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, CredisourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| CredisourceError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &ResolvedSettings) -> Result<Self, CredisourceError> {
        Self::new(&settings.base_url, settings.request_timeout)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /job/{id}` with the id as a single escaped path segment.
    fn job_url(&self, job_id: &str) -> Result<Url, CredisourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CredisourceError::Config(format!("Invalid API base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CredisourceError::Config(format!("API base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("job")
            .push(job_id);
        Ok(url)
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<String, CredisourceError> {
        let url = self.endpoint(path);
        info!(url = %url, "Submitting verification request");
        let resp = self.client.post(&url).json(&body).send().await.map_err(submission_transport_error)?;
        job_id_from_response(resp).await
    }
}

#[async_trait]
impl VerificationApi for HttpVerificationClient {
    async fn submit_text(&self, text: &str) -> Result<String, CredisourceError> {
        self.post_json("/verify/text", json!({ "text": text, "content_type": "text" })).await
    }

    async fn submit_url(&self, url: &str, content_type: ContentType) -> Result<String, CredisourceError> {
        let path = match content_type {
            ContentType::Video => "/verify/video",
            ContentType::Image | ContentType::Text => "/verify/image",
        };
        self.post_json(path, json!({ "url": url, "content_type": content_type.as_str() })).await
    }

    async fn submit_file(&self, path: &Path, content_type: ContentType) -> Result<String, CredisourceError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = mime_for_path(path).unwrap_or("application/octet-stream");
        debug!(file = %file_name, mime, size = bytes.len(), "Building multipart upload");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| CredisourceError::Internal(format!("Invalid MIME type {}: {}", mime, e)))?;
        let form = Form::new()
            .part("file", part)
            .text("content_type", content_type.as_str());

        let url = self.endpoint("/verify/file");
        info!(url = %url, "Uploading file for verification");
        let resp = self.client.post(&url).multipart(form).send().await.map_err(submission_transport_error)?;
        job_id_from_response(resp).await
    }

    async fn get_job(&self, job_id: &str) -> Result<JobSnapshot, CredisourceError> {
        let url = self.job_url(job_id)?;
        let resp = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Job status request failed");
            CredisourceError::Network(POLL_NETWORK_MESSAGE.into())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), body = %truncate(&body), "Job status request rejected");
            return Err(CredisourceError::Network(POLL_NETWORK_MESSAGE.into()));
        }

        let body = resp.json::<Value>().await.map_err(|e| {
            warn!(url = %url, error = %e, "Job status response was not valid JSON");
            CredisourceError::Network(POLL_NETWORK_MESSAGE.into())
        })?;
        Ok(JobSnapshot::from_value(&body))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn submission_transport_error(e: reqwest::Error) -> CredisourceError {
    warn!(error = %e, "Submission request failed");
    CredisourceError::Submission(GENERIC_SUBMISSION_MESSAGE.into())
}

async fn job_id_from_response(resp: reqwest::Response) -> Result<String, CredisourceError> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    if !status.is_success() {
        warn!(status = status.as_u16(), body = %truncate(&body), "Submission rejected by backend");
        let message = parsed
            .as_ref()
            .and_then(server_detail)
            .unwrap_or_else(|| GENERIC_SUBMISSION_MESSAGE.to_string());
        return Err(CredisourceError::Submission(message));
    }

    match parsed.as_ref().and_then(job_id_of) {
        Some(job_id) => {
            info!(job_id = %job_id, "Verification job created");
            Ok(job_id)
        }
        None => {
            warn!(body = %truncate(&body), "Submission response had no job_id");
            Err(CredisourceError::Submission(MISSING_JOB_ID_MESSAGE.into()))
        }
    }
}

fn job_id_of(body: &Value) -> Option<String> {
    match body.get("job_id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The backend's `detail` message: a plain string, or the first `msg` of a
/// validation error list.
pub(crate) fn server_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
