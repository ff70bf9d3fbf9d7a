//! Console session lifetime
//!
//! A session owns the shared view, the background polling task and the
//! dispatcher. The polling task fires immediately on start and then on a
//! fixed interval; every tick is one full synchronization. Shutting the
//! session down stops the polling; in-flight requests are simply dropped.

use crate::api::ApiClient;
use crate::dispatch::Dispatcher;
use crate::notify::{ConfirmGate, Notifier};
use crate::state::{new_state, SharedView, ViewState};
use crate::sync::Synchronizer;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

pub struct ConsoleSession {
    view: SharedView,
    dispatcher: Dispatcher,
    sync: Synchronizer,
    poll_task: JoinHandle<()>,
}

impl ConsoleSession {
    /// Build the shared view, wire up the synchronizer and dispatcher, and
    /// spawn the polling task. The first synchronization happens right away,
    /// before the first interval elapses.
    pub fn start(
        api: ApiClient,
        poll_interval: Duration,
        notifier: Arc<dyn Notifier + Send + Sync>,
        confirm: Arc<dyn ConfirmGate + Send + Sync>,
    ) -> Self {
        let view = new_state(ViewState::default());
        let sync = Synchronizer::new(view.clone(), api.clone());
        let dispatcher = Dispatcher::new(view.clone(), api, sync.clone(), notifier, confirm);

        let poll_sync = sync.clone();
        let poll_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                poll_sync.synchronize().await;
            }
        });
        info!("session started, polling every {:?}", poll_interval);

        Self {
            view,
            dispatcher,
            sync,
            poll_task,
        }
    }

    /// Copy of the current view. Callers never hold the lock.
    pub fn snapshot(&self) -> ViewState {
        self.view.lock().clone()
    }

    /// One extra synchronization outside the polling cadence.
    pub async fn refresh(&self) {
        self.sync.synchronize().await;
    }

    pub async fn create_node(&self) {
        self.dispatcher.create_node().await;
    }

    pub async fn run_node(&self, id: &str) {
        self.dispatcher.run_node(id).await;
    }

    pub async fn stop_node(&self, id: &str) {
        self.dispatcher.stop_node(id).await;
    }

    pub async fn wipe_node(&self, id: &str) {
        self.dispatcher.wipe_node(id).await;
    }

    pub async fn delete_node(&self, id: &str) {
        self.dispatcher.delete_node(id).await;
    }

    /// Stop the background polling. Idempotent.
    pub fn shutdown(&self) {
        self.poll_task.abort();
        info!("session polling stopped");
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        self.poll_task.abort();
    }
}
