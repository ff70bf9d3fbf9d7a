//! HTTP client towards the node service
//!
//! Thin wrapper over reqwest holding the configured base origin:
//! - `list_nodes` reads the full node collection
//! - `command` sends one mutating request (create/run/stop/wipe/delete)
//! - failure bodies may carry a server-supplied `detail` message

use crate::models::Node;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

/// Failure of one request against the node service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    Status(StatusCode),
    /// Non-success response to a command. `Display` is the server detail
    /// verbatim when one was provided, so it can be shown to the user as-is.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("invalid node list payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Error body shape of the node service: `{"detail": "..."}`, all optional.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the complete ordered node collection.
    ///
    /// Non-success statuses are reported without reading the body; the list
    /// endpoint does not send structured error details.
    pub async fn list_nodes(&self) -> Result<Vec<Node>, ApiError> {
        let response = self.http.get(self.url("/nodes")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        response.json::<Vec<Node>>().await.map_err(ApiError::Decode)
    }

    /// Send one mutating command. The success body is ignored; the refreshed
    /// node list is the only state the client trusts.
    pub async fn command(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.http.request(method, self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("HTTP error: status {status}"));

        Err(ApiError::Rejected { status, detail })
    }
}
