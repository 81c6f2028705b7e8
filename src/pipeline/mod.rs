pub mod orchestrator;
pub mod poller;
pub mod state;

pub use orchestrator::{VerificationOrchestrator, VerificationOutcome};
pub use poller::JobPoller;
pub use state::{SessionEvent, Ticket, VerificationSession, VerifyPhase};
