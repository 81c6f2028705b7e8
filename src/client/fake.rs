//! Scripted in-memory backend for unit tests.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::api::VerificationApi;
use crate::errors::CredisourceError;
use crate::models::{ContentType, JobSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    /// Character count of the submitted text.
    Text(usize),
    Url(String, ContentType),
    File(String, ContentType),
    GetJob(String),
}

/// Each `get_job` pops the next scripted response; an exhausted script keeps
/// answering `processing`.
pub struct FakeApi {
    job_id: Option<String>,
    submit_error: Option<String>,
    script: Mutex<VecDeque<Result<JobSnapshot, CredisourceError>>>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            job_id: None,
            submit_error: None,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_job_id(mut self, job_id: &str) -> Self {
        self.job_id = Some(job_id.to_string());
        self
    }

    pub fn with_submit_error(mut self, message: &str) -> Self {
        self.submit_error = Some(message.to_string());
        self
    }

    pub fn then(self, snapshot: serde_json::Value) -> Self {
        self.script.lock().unwrap().push_back(Ok(JobSnapshot::from_value(&snapshot)));
        self
    }

    pub fn then_error(self, err: CredisourceError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn job_polls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, FakeCall::GetJob(_))).count()
    }

    fn submitted(&self, call: FakeCall) -> Result<String, CredisourceError> {
        self.calls.lock().unwrap().push(call);
        if let Some(message) = &self.submit_error {
            return Err(CredisourceError::Submission(message.clone()));
        }
        self.job_id
            .clone()
            .ok_or_else(|| CredisourceError::Submission("no job id scripted".into()))
    }
}

#[async_trait]
impl VerificationApi for FakeApi {
    async fn submit_text(&self, text: &str) -> Result<String, CredisourceError> {
        self.submitted(FakeCall::Text(text.chars().count()))
    }

    async fn submit_url(&self, url: &str, content_type: ContentType) -> Result<String, CredisourceError> {
        self.submitted(FakeCall::Url(url.to_string(), content_type))
    }

    async fn submit_file(&self, path: &Path, content_type: ContentType) -> Result<String, CredisourceError> {
        self.submitted(FakeCall::File(path.display().to_string(), content_type))
    }

    async fn get_job(&self, job_id: &str) -> Result<JobSnapshot, CredisourceError> {
        self.calls.lock().unwrap().push(FakeCall::GetJob(job_id.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(JobSnapshot::default()))
    }

    fn base_url(&self) -> &str {
        "http://fake.invalid"
    }
}
