//! Mock transcription backend for integration tests
//!
//! Implements the `OpenAI` `/v1/audio/transcriptions` endpoint and records
//! every request it receives

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// A transcription request as the provider saw it
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ReceivedRequest {
    pub authorization: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub audio: Vec<u8>,
}

enum Reply {
    Text(String),
    Status(StatusCode, String),
}

struct MockSttState {
    reply: Reply,
    requests: Mutex<Vec<ReceivedRequest>>,
}

/// Mock transcription provider that returns a canned reply
pub struct MockStt {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSttState>,
}

impl MockStt {
    /// Start a mock that transcribes every file as `text`
    pub async fn start_with_text(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(Reply::Text(text.to_owned())).await
    }

    /// Start a mock that answers every request with `status`
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(Reply::Status(StatusCode::from_u16(status)?, body.to_owned())).await
    }

    async fn start_inner(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockSttState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the client appends `/audio/transcriptions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

impl Drop for MockStt {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(state): State<Arc<MockSttState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut received = ReceivedRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        model: None,
        language: None,
        filename: None,
        content_type: None,
        audio: Vec::new(),
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or_default() {
            "file" => {
                received.filename = field.file_name().map(str::to_owned);
                received.content_type = field.content_type().map(str::to_owned);
                received.audio = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            "model" => received.model = field.text().await.ok(),
            "language" => received.language = field.text().await.ok(),
            _ => {}
        }
    }

    state.requests.lock().unwrap().push(received);

    match &state.reply {
        Reply::Text(text) => Json(serde_json::json!({ "text": text })).into_response(),
        Reply::Status(status, body) => (*status, body.clone()).into_response(),
    }
}
