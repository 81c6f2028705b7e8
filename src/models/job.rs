use serde_json::Value;

use crate::normalize::fields;

/// Status of a verification job as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Processing,
    Completed,
    Failed,
    /// Any status string this client does not recognise. Polled like `Processing`.
    Unknown,
}

impl JobStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Unknown,
        }
    }
}

/// One observation of a job from `GET /job/{id}`.
///
/// `result` is kept raw; only the normalizer reads backend result fields.
#[derive(Debug, Clone, Default)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub progress: Option<String>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl JobSnapshot {
    /// Read a status body without failing on odd field types.
    ///
    /// A missing or non-string `status` reads as processing. A numeric
    /// `progress` becomes a percentage; other non-string values are skipped.
    /// A non-string `error` is dropped so the caller falls back to its
    /// generic message.
    pub fn from_value(body: &Value) -> Self {
        let status = fields::text(body.get("status"))
            .map(|s| JobStatus::parse(&s))
            .unwrap_or_default();
        let progress = match body.get("progress") {
            Some(Value::Number(_)) => fields::number(body.get("progress")).map(|n| format!("{}%", n.round() as i64)),
            other => fields::text(other),
        };
        let result = body.get("result").filter(|v| !v.is_null()).cloned();

        Self {
            status,
            progress,
            result,
            error: fields::text(body.get("error")),
        }
    }
}
