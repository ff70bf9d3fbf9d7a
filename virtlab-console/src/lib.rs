//! Terminal console for a fleet of remotely managed VM nodes
//!
//! The console keeps a local view of the node service in sync by polling and
//! sends lifecycle commands (create, run, stop, wipe, delete) on request.
//! Server state is authoritative; every successful command is followed by a
//! fresh fetch instead of a local guess at the effect.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod models;
pub mod notify;
pub mod session;
pub mod state;
pub mod sync;
pub mod ui;

pub use api::{ApiClient, ApiError};
pub use config::ConsoleConfig;
pub use models::{Node, NodeStatus};
pub use notify::{ConfirmGate, Notifier};
pub use session::ConsoleSession;
pub use state::{new_state, SharedView, ViewState};
pub use sync::Synchronizer;
