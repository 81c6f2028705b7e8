use std::path::PathBuf;

use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use super::commands::{OutputArgs, VerifyCommand};
use super::progress::VerifyProgress;
use super::{load_settings, print_report, GlobalArgs};
use crate::client::HttpVerificationClient;
use crate::errors::CredisourceError;
use crate::models::{ContentType, VerificationRequest};
use crate::pipeline::{JobPoller, VerificationOrchestrator, VerificationSession};
use crate::reporting::VerificationReport;

pub async fn handle_verify(command: VerifyCommand, globals: &GlobalArgs) -> Result<(), CredisourceError> {
    let (request, output) = build_request(command).await?;
    let settings = load_settings(globals, &output).await?;

    info!(kind = %request.kind(), content_type = %request.content_type(), "Starting verification");

    let client = HttpVerificationClient::from_settings(&settings)?;
    let orchestrator = VerificationOrchestrator::new(&client, JobPoller::from_settings(&settings));
    let mut session = VerificationSession::new();
    let progress = VerifyProgress::new(globals.quiet || output.json);

    let kind = request.kind();
    let content_type = request.content_type();
    let outcome = orchestrator
        .run(&mut session, request, |status| progress.set_status(status))
        .await;

    match outcome {
        Ok(outcome) => {
            progress.finish_success();
            let report = VerificationReport::new(outcome.job_id, outcome.result).with_request(kind, content_type);
            print_report(&report, output.json)
        }
        Err(e) => {
            progress.abandon();
            debug!(
                phase = session.phase().name(),
                reason = session.error_message().unwrap_or_default(),
                retryable = session.retry_request().is_some(),
                "Verification did not complete"
            );
            Err(e)
        }
    }
}

async fn build_request(command: VerifyCommand) -> Result<(VerificationRequest, OutputArgs), CredisourceError> {
    match command {
        VerifyCommand::Text(args) => {
            let text = match (args.text.as_deref(), args.file.as_deref()) {
                (_, Some(path)) => tokio::fs::read_to_string(path).await?,
                (Some("-"), None) => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
                (Some(text), None) => text.to_string(),
                (None, None) => {
                    return Err(CredisourceError::Validation(
                        "Provide the text to verify, --file PATH, or - to read stdin".into(),
                    ))
                }
            };
            Ok((VerificationRequest::text(text), args.output))
        }
        VerifyCommand::Url(args) => {
            let request = with_override(VerificationRequest::url(args.url), args.media.map(Into::into));
            Ok((request, args.output))
        }
        VerifyCommand::File(args) => {
            let request = with_override(
                VerificationRequest::file(PathBuf::from(args.path)),
                args.media.map(Into::into),
            );
            Ok((request, args.output))
        }
    }
}

fn with_override(request: VerificationRequest, forced: Option<ContentType>) -> VerificationRequest {
    match forced {
        Some(content_type) => request.with_content_type(content_type),
        None => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{MediaArg, TextArgs, UrlArgs};

    #[tokio::test]
    async fn test_text_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("essay.txt");
        tokio::fs::write(&path, "word ".repeat(80)).await.unwrap();
        let (request, _) = build_request(VerifyCommand::Text(TextArgs {
            text: None,
            file: Some(path.display().to_string()),
            output: OutputArgs::default(),
        }))
        .await
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[tokio::test]
    async fn test_text_missing_source_is_validation_error() {
        let err = build_request(VerifyCommand::Text(TextArgs {
            text: None,
            file: None,
            output: OutputArgs::default(),
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, CredisourceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_url_override_applies() {
        let (request, _) = build_request(VerifyCommand::Url(UrlArgs {
            url: "https://example.com/photo.png".into(),
            media: Some(MediaArg::Video),
            output: OutputArgs::default(),
        }))
        .await
        .unwrap();
        assert_eq!(request.content_type(), ContentType::Video);
    }
}
