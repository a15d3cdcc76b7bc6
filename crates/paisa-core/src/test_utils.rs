//! Test utilities for paisa-core
//!
//! This module provides a mock OpenAI-compatible chat completions server that
//! records every request it receives, so tests can assert both on what was
//! sent and on whether anything was sent at all.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

use crate::ai::ChatMessage;

/// How the mock server answers chat completion requests
#[derive(Debug, Clone)]
enum Mode {
    Reply(String),
    Fail(u16),
    EmptyChoices,
}

/// A chat completion request as seen by the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

struct ServerState {
    mode: Mode,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Deserialize)]
struct IncomingRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// Mock chat completions server for testing
pub struct MockChatServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockChatServer {
    /// Start a server that answers every request with `reply`
    pub async fn start(reply: &str) -> Self {
        Self::spawn(Mode::Reply(reply.to_string())).await
    }

    /// Start a server that answers every request with an error status
    pub async fn failing(status: u16) -> Self {
        Self::spawn(Mode::Fail(status)).await
    }

    /// Start a server that answers with an empty `choices` array
    pub async fn empty_choices() -> Self {
        Self::spawn(Mode::EmptyChoices).await
    }

    async fn spawn(mode: Mode) -> Self {
        let state = Arc::new(ServerState {
            mode,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockChatServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Model listing endpoint (health check)
async fn handle_models() -> Json<serde_json::Value> {
    Json(json!({
        "object": "list",
        "data": [{"id": "llama3-8b-8192", "object": "model"}]
    }))
}

/// Chat completions endpoint
async fn handle_chat(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(request): Json<IncomingRequest>,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(RecordedRequest {
        authorization,
        model: request.model.clone(),
        messages: request.messages,
    });

    match &state.mode {
        Mode::Reply(text) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": request.model,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        Mode::Fail(status) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({"error": {"message": "mock failure"}})),
        )
            .into_response(),
        Mode::EmptyChoices => Json(json!({"choices": []})).into_response(),
    }
}
