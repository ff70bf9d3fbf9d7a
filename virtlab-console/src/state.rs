use crate::models::Node;
use parking_lot::Mutex;
use std::sync::Arc;
use time::OffsetDateTime;

pub type Shared<T> = Arc<Mutex<T>>;

pub fn new_state<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Client-local view of the node service, shared between the synchronizer,
/// the dispatcher and the presentation layer.
///
/// Single writer discipline: the lock is never held across a suspension
/// point, so overlapping fetches interleave at whole-update granularity.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Complete node list from the last successful fetch; replaced wholesale,
    /// never patched.
    pub nodes: Vec<Node>,
    /// True only while a synchronization fetch is in flight.
    pub loading: bool,
    /// Last error message from any failed operation. Not cleared on success.
    pub error: Option<String>,
    /// Timestamp of the last successful synchronization.
    pub last_synced: Option<OffsetDateTime>,
}

pub type SharedView = Shared<ViewState>;
