use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use credisource::client::HttpVerificationClient;
use credisource::pipeline::JobPoller;

/// Scripted stand-in for the verification backend.
pub struct MockBackend {
    submit_status: StatusCode,
    submit_body: Option<String>,
    jobs: Mutex<VecDeque<(StatusCode, Value)>>,
    pub received: Mutex<Vec<(String, Value)>>,
    pub polled: Mutex<Vec<String>>,
    pub user_agents: Mutex<Vec<String>>,
    job_delay: Option<Duration>,
}

impl MockBackend {
    pub fn accepting(job_id: &str) -> Self {
        Self::responding(StatusCode::OK, Some(json!({ "job_id": job_id }).to_string()))
    }

    pub fn responding(status: StatusCode, body: Option<String>) -> Self {
        Self {
            submit_status: status,
            submit_body: body,
            jobs: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
            polled: Mutex::new(Vec::new()),
            user_agents: Mutex::new(Vec::new()),
            job_delay: None,
        }
    }

    /// Hold every job status response for `delay` before answering.
    pub fn with_job_delay(mut self, delay: Duration) -> Self {
        self.job_delay = Some(delay);
        self
    }

    pub fn then(self, job: Value) -> Self {
        self.jobs.lock().unwrap().push_back((StatusCode::OK, job));
        self
    }

    pub fn then_status(self, status: StatusCode) -> Self {
        self.jobs.lock().unwrap().push_back((status, json!({ "detail": "Not Found" })));
        self
    }

    pub fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }

    fn record_agent(&self, headers: &HeaderMap) {
        let agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.user_agents.lock().unwrap().push(agent);
    }

    pub fn poll_count(&self) -> usize {
        self.polled.lock().unwrap().len()
    }

    fn submit_response(&self) -> Response {
        match &self.submit_body {
            Some(body) => (
                self.submit_status,
                [(header::CONTENT_TYPE, "application/json")],
                body.clone(),
            )
                .into_response(),
            None => self.submit_status.into_response(),
        }
    }
}

async fn verify_json(
    State(mock): State<Arc<MockBackend>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record_agent(&headers);
    mock.received.lock().unwrap().push((format!("/verify/{}", kind), body));
    mock.submit_response()
}

async fn verify_file(
    State(mock): State<Arc<MockBackend>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    mock.record_agent(&headers);
    let mut fields = serde_json::Map::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        let value = match file_name {
            Some(file_name) => json!({ "file_name": file_name, "mime": mime, "len": bytes.len() }),
            None => Value::String(String::from_utf8_lossy(&bytes).to_string()),
        };
        fields.insert(name, value);
    }
    mock.received.lock().unwrap().push(("/verify/file".to_string(), Value::Object(fields)));
    mock.submit_response()
}

async fn job_status(
    State(mock): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    mock.record_agent(&headers);
    mock.polled.lock().unwrap().push(id);
    if let Some(delay) = mock.job_delay {
        tokio::time::sleep(delay).await;
    }
    let next = mock.jobs.lock().unwrap().pop_front();
    let (status, body) = next.unwrap_or((StatusCode::OK, json!({ "status": "processing" })));
    (status, Json(body)).into_response()
}

/// Serve `mock` on an ephemeral local port and return its base URL.
pub async fn spawn(mock: Arc<MockBackend>) -> String {
    let router = Router::new()
        .route("/verify/file", post(verify_file))
        .route("/verify/:kind", post(verify_json))
        .route("/job/:id", get(job_status))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client(base_url: &str) -> HttpVerificationClient {
    HttpVerificationClient::new(base_url, Duration::from_secs(5)).unwrap()
}

pub fn fast_poller(max_attempts: u32) -> JobPoller {
    JobPoller::new(Duration::from_millis(10), max_attempts)
}
