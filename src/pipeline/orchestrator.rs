use tracing::{info, warn};

use super::poller::JobPoller;
use super::state::{SessionEvent, VerificationSession, PROCESSING_MESSAGE};
use crate::client::{submission_message, submit, VerificationApi};
use crate::errors::CredisourceError;
use crate::models::{VerificationRequest, VerificationResult};

pub const STARTING_MESSAGE: &str = "Starting verification...";

/// A finished verification: the backend job and its normalized result.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub job_id: String,
    pub result: VerificationResult,
}

/// Drives submit → poll → normalize for one request, recording every step in
/// `session` and reporting status lines through `on_status`.
pub struct VerificationOrchestrator<'a> {
    api: &'a dyn VerificationApi,
    poller: JobPoller,
}

impl<'a> VerificationOrchestrator<'a> {
    pub fn new(api: &'a dyn VerificationApi, poller: JobPoller) -> Self {
        Self { api, poller }
    }

    pub async fn run<F>(
        &self,
        session: &mut VerificationSession,
        request: VerificationRequest,
        mut on_status: F,
    ) -> Result<VerificationOutcome, CredisourceError>
    where
        F: FnMut(&str),
    {
        let ticket = session.begin(request.clone());
        on_status(STARTING_MESSAGE);
        on_status(&submission_message(&request));

        let job_id = match submit(self.api, &request).await {
            Ok(job_id) => job_id,
            Err(e) => {
                warn!(error = %e, kind = %request.kind(), "Submission failed");
                session.fail(ticket, &e);
                return Err(e);
            }
        };

        session.apply(ticket, SessionEvent::Submitted { job_id: job_id.clone() });
        on_status(PROCESSING_MESSAGE);

        let polled = self
            .poller
            .poll(self.api, &job_id, |progress| {
                session.apply(ticket, SessionEvent::Progress(progress.to_string()));
                on_status(progress);
            })
            .await;

        match polled {
            Ok(result) => {
                info!(job_id = %job_id, score = result.score, label = %result.label, "Verification finished");
                session.apply(ticket, SessionEvent::Completed(result.clone()));
                Ok(VerificationOutcome { job_id, result })
            }
            Err(e) => {
                session.fail(ticket, &e);
                Err(e)
            }
        }
    }

    /// Poll a job that was submitted elsewhere. Starts a fresh poll loop.
    pub async fn follow<F>(&self, job_id: &str, mut on_status: F) -> Result<VerificationOutcome, CredisourceError>
    where
        F: FnMut(&str),
    {
        on_status(PROCESSING_MESSAGE);
        let result = self.poller.poll(self.api, job_id, |progress| on_status(progress)).await?;
        info!(job_id, score = result.score, "Job finished");
        Ok(VerificationOutcome {
            job_id: job_id.to_string(),
            result,
        })
    }
}
