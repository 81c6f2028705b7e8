use thiserror::Error;

/// Message shown when a submission fails without a usable server detail.
pub const GENERIC_SUBMISSION_MESSAGE: &str = "Verification failed. Please try again.";
/// Message shown when the backend accepted a request but returned no job id.
pub const MISSING_JOB_ID_MESSAGE: &str = "Failed to start verification";
/// Message shown when the backend reports failure without an error string.
pub const GENERIC_JOB_FAILED_MESSAGE: &str = "Verification failed";
/// Message shown when polling exceeds the attempt ceiling.
pub const TIMEOUT_MESSAGE: &str = "Verification timed out. Please try again.";
/// Message shown when a status tick fails at the transport layer.
pub const POLL_NETWORK_MESSAGE: &str = "Failed to check job status";

#[derive(Debug, Error)]
pub enum CredisourceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Submission(String),

    #[error("{0}")]
    JobFailed(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
