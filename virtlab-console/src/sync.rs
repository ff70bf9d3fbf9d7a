//! State synchronization against the node service
//!
//! One synchronization is a full-replacement fetch: the node list from a
//! successful `GET /nodes` overwrites the local view wholesale. Overlapping
//! synchronizations are allowed; whichever completes last wins.

use crate::api::ApiClient;
use crate::state::SharedView;
use time::OffsetDateTime;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Synchronizer {
    view: SharedView,
    api: ApiClient,
}

impl Synchronizer {
    pub fn new(view: SharedView, api: ApiClient) -> Self {
        Self { view, api }
    }

    /// Pull the authoritative node list into the shared view.
    ///
    /// `loading` is raised before the fetch and dropped on every exit path.
    /// On failure the previous node list is kept untouched and only `error`
    /// is updated; a stale error from an earlier failure is not cleared by a
    /// later success.
    pub async fn synchronize(&self) {
        self.view.lock().loading = true;

        let outcome = self.api.list_nodes().await;

        let mut view = self.view.lock();
        match outcome {
            Ok(nodes) => {
                debug!("node list refreshed ({} nodes)", nodes.len());
                view.nodes = nodes;
                view.last_synced = Some(OffsetDateTime::now_utc());
            }
            Err(e) => {
                warn!("failed to fetch nodes: {}", e);
                view.error = Some(e.to_string());
            }
        }
        view.loading = false;
    }
}
