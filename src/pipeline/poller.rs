use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::VerificationApi;
use crate::config::ResolvedSettings;
use crate::errors::{CredisourceError, GENERIC_JOB_FAILED_MESSAGE, TIMEOUT_MESSAGE};
use crate::models::{JobStatus, VerificationResult};
use crate::normalize::normalize;

/// Fixed-interval job status poller with a hard attempt ceiling.
///
/// Ticks are strictly sequential: the next status request is issued only
/// after the previous response has been handled, so at most one request per
/// job is ever in flight. A transport error on any tick ends the poll.
#[derive(Debug, Clone)]
pub struct JobPoller {
    interval: Duration,
    max_attempts: u32,
}

impl JobPoller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_settings(settings: &ResolvedSettings) -> Self {
        Self::new(settings.poll_interval, settings.max_attempts)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Poll `job_id` until it completes, fails, or the ceiling is reached.
    ///
    /// `on_progress` receives each new progress message from the backend;
    /// repeats of the previous message are not forwarded.
    pub async fn poll<F>(
        &self,
        api: &dyn VerificationApi,
        job_id: &str,
        mut on_progress: F,
    ) -> Result<VerificationResult, CredisourceError>
    where
        F: FnMut(&str),
    {
        let mut last_progress: Option<String> = None;

        for attempt in 1..=self.max_attempts {
            let job = api.get_job(job_id).await?;

            match job.status {
                JobStatus::Completed => {
                    info!(job_id, attempt, "Verification job completed");
                    return Ok(normalize(job.result.as_ref().unwrap_or(&Value::Null)));
                }
                JobStatus::Failed => {
                    let message = job
                        .error
                        .filter(|e| !e.trim().is_empty())
                        .unwrap_or_else(|| GENERIC_JOB_FAILED_MESSAGE.to_string());
                    warn!(job_id, attempt, error = %message, "Verification job failed");
                    return Err(CredisourceError::JobFailed(message));
                }
                JobStatus::Unknown => {
                    debug!(job_id, attempt, "Unrecognised job status, still waiting");
                }
                JobStatus::Processing => {}
            }

            if let Some(progress) = job.progress.filter(|p| !p.trim().is_empty()) {
                if last_progress.as_deref() != Some(progress.as_str()) {
                    debug!(job_id, attempt, progress = %progress, "Job progress");
                    on_progress(&progress);
                    last_progress = Some(progress);
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        warn!(
            job_id,
            attempts = self.max_attempts,
            interval_ms = self.interval.as_millis() as u64,
            "Verification job timed out"
        );
        Err(CredisourceError::Timeout(TIMEOUT_MESSAGE.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;
    use serde_json::json;
    use tokio::time::Instant;

    fn poller() -> JobPoller {
        JobPoller::new(Duration::from_secs(1), 120)
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_result_is_normalized() {
        let api = FakeApi::new()
            .then(json!({ "status": "processing" }))
            .then(json!({
                "status": "completed",
                "result": { "trust_score": 97, "label": "Highly Credible" }
            }));
        let result = poller().poll(&api, "job-1", |_| {}).await.unwrap();
        assert_eq!(result.score, 97.0);
        assert_eq!(result.label, "Highly Credible");
        assert_eq!(result.confidence.as_deref(), Some("High"));
        assert_eq!(api.job_polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_message_is_exact() {
        let api = FakeApi::new().then(json!({ "status": "failed", "error": "file too large" }));
        let err = poller().poll(&api, "job-1", |_| {}).await.unwrap_err();
        assert!(matches!(err, CredisourceError::JobFailed(_)));
        assert_eq!(err.to_string(), "file too large");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_without_error_uses_generic_message() {
        let api = FakeApi::new().then(json!({ "status": "failed" }));
        let err = poller().poll(&api, "job-1", |_| {}).await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_JOB_FAILED_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_terminal_job_times_out_within_ceiling() {
        let api = FakeApi::new();
        let poller = JobPoller::new(Duration::from_secs(1), 5);
        let start = Instant::now();
        let err = poller.poll(&api, "job-1", |_| {}).await.unwrap_err();
        assert!(matches!(err, CredisourceError::Timeout(_)));
        assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
        assert_eq!(api.job_polls(), 5);
        assert!(start.elapsed() <= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_aborts_immediately() {
        let api = FakeApi::new()
            .then(json!({ "status": "processing" }))
            .then_error(CredisourceError::Network("Failed to check job status".into()))
            .then(json!({ "status": "completed", "result": { "score": 50 } }));
        let err = poller().poll(&api, "job-1", |_| {}).await.unwrap_err();
        assert!(matches!(err, CredisourceError::Network(_)));
        assert_eq!(api.job_polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_forwarded_once_per_change() {
        let api = FakeApi::new()
            .then(json!({ "status": "processing", "progress": "Downloading" }))
            .then(json!({ "status": "processing", "progress": "Downloading" }))
            .then(json!({ "status": "processing" }))
            .then(json!({ "status": "queued", "progress": "Running detectors" }))
            .then(json!({ "status": "completed", "result": { "score": 10 } }));
        let mut seen = Vec::new();
        poller().poll(&api, "job-1", |m| seen.push(m.to_string())).await.unwrap();
        assert_eq!(seen, vec!["Downloading", "Running detectors"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_without_result_defaults() {
        let api = FakeApi::new().then(json!({ "status": "completed" }));
        let result = poller().poll(&api, "job-1", |_| {}).await.unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, "Likely AI-Generated");
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        assert_eq!(JobPoller::new(Duration::from_millis(100), 0).max_attempts(), 1);
    }
}
