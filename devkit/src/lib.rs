/*!
# Virtlab DevKit - Stubs and Test Utilities

Support library for developing against the virtlab node service without a
real deployment:
- In-process HTTP stub of the node service with request recording
- Scriptable list replies (status, body, artificial latency)
- Helpers for building node payloads in tests
*/

pub mod api_stub;
pub mod test_utils;

pub use api_stub::{ListReply, NodeApiStub, RecordedRequest};
pub use test_utils::{init_test_logging, node_id, node_json, node_json_full};
