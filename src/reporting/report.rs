use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ContentType, RequestKind, VerificationResult};

/// Machine-readable envelope printed by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub job_id: String,
    /// Absent when following a job submitted elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RequestKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    pub checked_at: DateTime<Utc>,
    pub result: VerificationResult,
}

impl VerificationReport {
    pub fn new(job_id: String, result: VerificationResult) -> Self {
        Self {
            job_id,
            kind: None,
            content_type: None,
            checked_at: Utc::now(),
            result,
        }
    }

    pub fn with_request(mut self, kind: RequestKind, content_type: ContentType) -> Self {
        self.kind = Some(kind);
        self.content_type = Some(content_type);
        self
    }
}
