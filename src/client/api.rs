use std::path::Path;

use async_trait::async_trait;

use crate::errors::CredisourceError;
use crate::models::{ContentType, JobSnapshot};

/// Backend operations the submission and polling logic depend on.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// `POST /verify/text`. Returns the job id.
    async fn submit_text(&self, text: &str) -> Result<String, CredisourceError>;

    /// `POST /verify/image` or `POST /verify/video`. Returns the job id.
    async fn submit_url(&self, url: &str, content_type: ContentType) -> Result<String, CredisourceError>;

    /// `POST /verify/file` as multipart. Returns the job id.
    async fn submit_file(&self, path: &Path, content_type: ContentType) -> Result<String, CredisourceError>;

    /// `GET /job/{id}`.
    async fn get_job(&self, job_id: &str) -> Result<JobSnapshot, CredisourceError>;

    /// Backend base URL, for logging.
    fn base_url(&self) -> &str;
}
