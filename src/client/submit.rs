use tracing::info;

use super::api::VerificationApi;
use crate::errors::CredisourceError;
use crate::models::VerificationRequest;

/// Validate the request and dispatch it to the matching backend endpoint.
///
/// Validation failures return before any network call is made.
pub async fn submit(
    api: &dyn VerificationApi,
    request: &VerificationRequest,
) -> Result<String, CredisourceError> {
    request.validate()?;

    info!(
        kind = %request.kind(),
        content_type = %request.content_type(),
        base_url = api.base_url(),
        "Submitting content for verification"
    );

    match request {
        VerificationRequest::Text { text } => api.submit_text(text).await,
        VerificationRequest::Url { url, content_type } => api.submit_url(url.trim(), *content_type).await,
        VerificationRequest::File { path, content_type } => api.submit_file(path, *content_type).await,
    }
}

/// Status line shown while the submission is in flight.
pub fn submission_message(request: &VerificationRequest) -> String {
    match request {
        VerificationRequest::Text { .. } => "Analyzing text for AI patterns...".to_string(),
        VerificationRequest::Url { content_type, .. } => {
            format!("Downloading and analyzing {}...", content_type)
        }
        VerificationRequest::File { content_type, .. } => {
            format!("Uploading and analyzing {}...", content_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeApi, FakeCall};
    use crate::models::{ContentType, MIN_TEXT_CHARS};

    #[tokio::test]
    async fn test_text_at_minimum_is_submitted() {
        let api = FakeApi::new().with_job_id("job-1");
        let req = VerificationRequest::text("x".repeat(MIN_TEXT_CHARS));
        let job_id = submit(&api, &req).await.unwrap();
        assert_eq!(job_id, "job-1");
        assert_eq!(api.calls(), vec![FakeCall::Text(MIN_TEXT_CHARS)]);
    }

    #[tokio::test]
    async fn test_short_text_never_reaches_network() {
        let api = FakeApi::new().with_job_id("job-1");
        let req = VerificationRequest::text("x".repeat(MIN_TEXT_CHARS - 1));
        let err = submit(&api, &req).await.unwrap_err();
        assert!(matches!(err, CredisourceError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_url_routes_with_detected_type() {
        let api = FakeApi::new().with_job_id("job-2");
        submit(&api, &VerificationRequest::url("https://www.youtube.com/watch?v=1")).await.unwrap();
        submit(&api, &VerificationRequest::url(" https://cdn.example.com/p.png ")).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![
                FakeCall::Url("https://www.youtube.com/watch?v=1".into(), ContentType::Video),
                FakeCall::Url("https://cdn.example.com/p.png".into(), ContentType::Image),
            ]
        );
    }

    #[tokio::test]
    async fn test_submission_error_passes_through() {
        let api = FakeApi::new().with_submit_error("Unsupported media");
        let err = submit(&api, &VerificationRequest::url("https://example.com/a.gif")).await.unwrap_err();
        assert_eq!(err.to_string(), "Unsupported media");
    }

    #[test]
    fn test_submission_messages() {
        assert_eq!(
            submission_message(&VerificationRequest::text("abc")),
            "Analyzing text for AI patterns..."
        );
        assert_eq!(
            submission_message(&VerificationRequest::url("https://tiktok.com/@a/video/1")),
            "Downloading and analyzing video..."
        );
        assert_eq!(
            submission_message(&VerificationRequest::file("cat.png")),
            "Uploading and analyzing image..."
        );
    }
}
