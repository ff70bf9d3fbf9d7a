//! Command dispatch towards the node service
//!
//! One dispatch is a single mutating request followed, on success, by exactly
//! one re-synchronization. The dispatcher never assumes a command's effect
//! and never touches the node list itself; the refreshed fetch is the only
//! way server state reaches the view.
//!
//! Per invocation: idle -> confirming (delete only) -> in-flight ->
//! success (re-sync) or failure (record error + blocking notification) -> idle.
//! No automatic retries.

use crate::api::ApiClient;
use crate::notify::{ConfirmGate, Notifier};
use crate::state::SharedView;
use crate::sync::Synchronizer;
use reqwest::Method;
use std::sync::Arc;
use tracing::{error, info};

pub struct Dispatcher {
    view: SharedView,
    api: ApiClient,
    sync: Synchronizer,
    notifier: Arc<dyn Notifier + Send + Sync>,
    confirm: Arc<dyn ConfirmGate + Send + Sync>,
}

impl Dispatcher {
    pub fn new(
        view: SharedView,
        api: ApiClient,
        sync: Synchronizer,
        notifier: Arc<dyn Notifier + Send + Sync>,
        confirm: Arc<dyn ConfirmGate + Send + Sync>,
    ) -> Self {
        Self {
            view,
            api,
            sync,
            notifier,
            confirm,
        }
    }

    pub async fn create_node(&self) {
        self.dispatch(Method::POST, "/nodes".to_string()).await;
    }

    pub async fn run_node(&self, id: &str) {
        self.dispatch(Method::POST, format!("/nodes/{id}/run")).await;
    }

    pub async fn stop_node(&self, id: &str) {
        self.dispatch(Method::POST, format!("/nodes/{id}/stop")).await;
    }

    pub async fn wipe_node(&self, id: &str) {
        self.dispatch(Method::POST, format!("/nodes/{id}/wipe")).await;
    }

    /// Permanent deletion; asks the confirm gate first and sends nothing at
    /// all when the user declines.
    pub async fn delete_node(&self, id: &str) {
        let prompt = format!("Permanently delete node {id}?");
        if !self.confirm.confirm(&prompt) {
            info!("deletion of node {} cancelled by user", id);
            return;
        }
        self.dispatch(Method::DELETE, format!("/nodes/{id}")).await;
    }

    async fn dispatch(&self, method: Method, path: String) {
        let verb = method.to_string();

        match self.api.command(method, &path).await {
            Ok(()) => {
                info!("{} {} accepted, refreshing node list", verb, path);
                self.sync.synchronize().await;
            }
            Err(e) => {
                error!("{} {} failed: {}", verb, path, e);
                let message = e.to_string();
                self.view.lock().error = Some(message.clone());
                self.notifier.notify(&message);
            }
        }
    }
}
