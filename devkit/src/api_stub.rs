/*!
In-process stub of the virtlab node service

Serves the same routes as the real service on an ephemeral local port and
records every request it sees. List replies can be scripted one by one
(status, body, artificial latency); unscripted list requests fall back to a
configurable default node set. Command routes succeed until a failure is
installed.
*/

use anyhow::Result;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// One request observed by the stub, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

/// One scripted reply to `GET /nodes`. Consumed in push order; when the
/// queue is empty the stub serves the default node set with status 200.
#[derive(Debug, Clone)]
pub struct ListReply {
    pub status: u16,
    pub body: Value,
    pub delay: Option<Duration>,
}

impl ListReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: json!({}),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
struct CommandFailure {
    status: u16,
    detail: Option<String>,
}

#[derive(Default)]
struct StubState {
    requests: Mutex<Vec<RecordedRequest>>,
    list_replies: Mutex<VecDeque<ListReply>>,
    default_nodes: Mutex<Value>,
    command_failure: Mutex<Option<CommandFailure>>,
}

type StubShared = Arc<StubState>;

/// Running stub server. Dropping it stops the server.
pub struct NodeApiStub {
    addr: SocketAddr,
    state: StubShared,
    server: tokio::task::JoinHandle<()>,
}

impl NodeApiStub {
    /// Bind an ephemeral local port and start serving.
    pub async fn start() -> Result<Self> {
        let state: StubShared = Arc::new(StubState {
            default_nodes: Mutex::new(json!([])),
            ..StubState::default()
        });

        let router = Router::new()
            .route("/nodes", get(list_nodes).post(create_node))
            .route("/nodes/{id}/run", post(node_command))
            .route("/nodes/{id}/stop", post(node_command))
            .route("/nodes/{id}/wipe", post(node_command))
            .route("/nodes/{id}", delete(node_command))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                record_request,
            ))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                log::error!("stub server stopped: {}", e);
            }
        });

        log::info!("node api stub listening on {}", addr);
        Ok(Self {
            addr,
            state,
            server,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Replace the default node set served when no reply is scripted.
    pub fn set_nodes(&self, nodes: Value) {
        *self.state.default_nodes.lock() = nodes;
    }

    /// Queue one scripted reply for the next `GET /nodes`.
    pub fn push_list_reply(&self, reply: ListReply) {
        self.state.list_replies.lock().push_back(reply);
    }

    /// Make every command route answer with this failure until restored.
    pub fn fail_commands(&self, status: u16, detail: Option<&str>) {
        *self.state.command_failure.lock() = Some(CommandFailure {
            status,
            detail: detail.map(str::to_string),
        });
    }

    /// Let command routes succeed again.
    pub fn restore_commands(&self) {
        *self.state.command_failure.lock() = None;
    }

    /// All requests seen so far, in arrival order.
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Count of recorded requests matching method and path exactly.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().clear();
    }
}

impl Drop for NodeApiStub {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn record_request(State(state): State<StubShared>, request: Request, next: Next) -> Response {
    state.requests.lock().push(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
    });
    next.run(request).await
}

async fn list_nodes(State(state): State<StubShared>) -> Response {
    let scripted = state.list_replies.lock().pop_front();

    match scripted {
        Some(reply) => {
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            let status =
                StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(reply.body)).into_response()
        }
        None => Json(state.default_nodes.lock().clone()).into_response(),
    }
}

async fn create_node(State(state): State<StubShared>) -> Response {
    command_response(&state, StatusCode::CREATED)
}

async fn node_command(State(state): State<StubShared>, Path(id): Path<String>) -> Response {
    log::debug!("stub command for node {}", id);
    command_response(&state, StatusCode::OK)
}

fn command_response(state: &StubState, success: StatusCode) -> Response {
    match state.command_failure.lock().clone() {
        Some(failure) => {
            let status =
                StatusCode::from_u16(failure.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = match failure.detail {
                Some(detail) => json!({ "detail": detail }),
                None => json!({}),
            };
            (status, Json(body)).into_response()
        }
        None => (success, Json(json!({}))).into_response(),
    }
}
