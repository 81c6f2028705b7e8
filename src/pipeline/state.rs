use tracing::debug;

use crate::errors::CredisourceError;
use crate::models::{VerificationRequest, VerificationResult};

/// Status line shown once the backend has accepted a submission.
pub const PROCESSING_MESSAGE: &str = "Processing your content...";

/// Identifies the verification attempt an update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum VerifyPhase {
    Idle,
    Submitting,
    Polling { job_id: String, progress: String },
    Completed(Box<VerificationResult>),
    Failed(String),
    TimedOut(String),
}

impl VerifyPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed(_) | Self::TimedOut(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Polling { .. } => "polling",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
            Self::TimedOut(_) => "timed-out",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Submitted { job_id: String },
    Progress(String),
    Completed(VerificationResult),
    Failed(String),
    TimedOut(String),
}

/// State container for one user-facing verification flow.
///
/// Each `begin` starts a new generation; updates carrying an older ticket are
/// dropped, so an abandoned poll loop cannot overwrite a newer attempt.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    generation: u64,
    phase: VerifyPhase,
    request: Option<VerificationRequest>,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self {
            generation: 0,
            phase: VerifyPhase::Idle,
            request: None,
        }
    }

    pub fn begin(&mut self, request: VerificationRequest) -> Ticket {
        self.generation += 1;
        self.phase = VerifyPhase::Submitting;
        self.request = Some(request);
        Ticket(self.generation)
    }

    /// Apply an event. Returns false when it was stale or not a legal transition.
    pub fn apply(&mut self, ticket: Ticket, event: SessionEvent) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "Dropping stale session update");
            return false;
        }

        let next = match (&self.phase, event) {
            (VerifyPhase::Submitting, SessionEvent::Submitted { job_id }) => VerifyPhase::Polling {
                job_id,
                progress: PROCESSING_MESSAGE.to_string(),
            },
            (VerifyPhase::Submitting, SessionEvent::Failed(message)) => VerifyPhase::Failed(message),
            (VerifyPhase::Polling { job_id, .. }, SessionEvent::Progress(progress)) => VerifyPhase::Polling {
                job_id: job_id.clone(),
                progress,
            },
            (VerifyPhase::Polling { .. }, SessionEvent::Completed(result)) => {
                VerifyPhase::Completed(Box::new(result))
            }
            (VerifyPhase::Polling { .. }, SessionEvent::Failed(message)) => VerifyPhase::Failed(message),
            (VerifyPhase::Polling { .. }, SessionEvent::TimedOut(message)) => VerifyPhase::TimedOut(message),
            (phase, event) => {
                debug!(phase = phase.name(), event = ?event, "Ignoring illegal session transition");
                return false;
            }
        };

        self.phase = next;
        true
    }

    /// Record an error against the attempt. Timeouts get their own phase.
    pub fn fail(&mut self, ticket: Ticket, err: &CredisourceError) -> bool {
        let event = match err {
            CredisourceError::Timeout(message) => SessionEvent::TimedOut(message.clone()),
            other => SessionEvent::Failed(other.to_string()),
        };
        self.apply(ticket, event)
    }

    pub fn phase(&self) -> &VerifyPhase {
        &self.phase
    }

    /// True when no attempt is in flight and a new one may be started.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, VerifyPhase::Idle) || self.phase.is_terminal()
    }

    /// The last request, kept after a failure so it can be retried as-is.
    pub fn retry_request(&self) -> Option<&VerificationRequest> {
        match self.phase {
            VerifyPhase::Failed(_) | VerifyPhase::TimedOut(_) => self.request.as_ref(),
            _ => None,
        }
    }

    pub fn job_id(&self) -> Option<&str> {
        match &self.phase {
            VerifyPhase::Polling { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            VerifyPhase::Failed(message) | VerifyPhase::TimedOut(message) => Some(message),
            _ => None,
        }
    }
}

impl Default for VerificationSession {
    fn default() -> Self {
        Self::new()
    }
}
