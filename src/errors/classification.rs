use super::types::CredisourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Whether the message is meant for the end user verbatim.
    pub user_facing: bool,
    pub exit_code: i32,
}

impl CredisourceError {
    /// Classify this error for reporting and process exit status.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            CredisourceError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                user_facing: true,
                exit_code: 2,
            },
            CredisourceError::Submission(_) => ErrorClassification {
                error_type: "SubmissionError",
                user_facing: true,
                exit_code: 3,
            },
            CredisourceError::JobFailed(_) => ErrorClassification {
                error_type: "JobFailedError",
                user_facing: true,
                exit_code: 4,
            },
            CredisourceError::Validation(_) => ErrorClassification {
                error_type: "ValidationError",
                user_facing: true,
                exit_code: 5,
            },
            CredisourceError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                user_facing: true,
                exit_code: 6,
            },
            CredisourceError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                user_facing: true,
                exit_code: 1,
            },
            CredisourceError::Io(_) => ErrorClassification {
                error_type: "IoError",
                user_facing: false,
                exit_code: 1,
            },
            CredisourceError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                user_facing: false,
                exit_code: 1,
            },
            CredisourceError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                user_facing: false,
                exit_code: 2,
            },
            CredisourceError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                user_facing: false,
                exit_code: 1,
            },
        }
    }
}
