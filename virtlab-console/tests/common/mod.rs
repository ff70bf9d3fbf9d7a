//! Shared harness for the console integration tests
//!
//! Wires a real client against the in-process node service stub and injects
//! recording stand-ins for the two presentation seams.

use parking_lot::Mutex;
use std::sync::Arc;
use virtlab_console::dispatch::Dispatcher;
use virtlab_console::state::{new_state, SharedView, ViewState};
use virtlab_console::{ApiClient, ConfirmGate, Notifier, Synchronizer};
use virtlab_devkit::{init_test_logging, NodeApiStub};

/// Notifier that records messages instead of blocking a terminal.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Confirm gate with a scripted answer; records every prompt it was asked.
pub struct ScriptedGate {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGate {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl ConfirmGate for ScriptedGate {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().push(prompt.to_string());
        self.answer
    }
}

pub struct Harness {
    pub stub: NodeApiStub,
    pub view: SharedView,
    pub sync: Synchronizer,
    pub dispatcher: Dispatcher,
    pub notifier: Arc<RecordingNotifier>,
    pub gate: Arc<ScriptedGate>,
}

/// Start a stub and a fully wired client against it.
pub async fn harness(confirm_answer: bool) -> Harness {
    init_test_logging();

    let stub = NodeApiStub::start().await.unwrap();
    let api = ApiClient::new(stub.base_url());
    let view = new_state(ViewState::default());
    let sync = Synchronizer::new(view.clone(), api.clone());

    let notifier = Arc::new(RecordingNotifier::default());
    let gate = Arc::new(ScriptedGate::new(confirm_answer));
    let dispatcher = Dispatcher::new(
        view.clone(),
        api,
        sync.clone(),
        notifier.clone(),
        gate.clone(),
    );

    Harness {
        stub,
        view,
        sync,
        dispatcher,
        notifier,
        gate,
    }
}
