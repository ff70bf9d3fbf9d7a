/*!
Small helpers shared by tests

Payload builders mirror the wire shape of the node service so tests do not
hand-write JSON, plus one-line logging setup.
*/

use serde_json::{json, Value};

/// Init logging for tests. Safe to call from every test; only the first
/// call wins.
pub fn init_test_logging() {
    env_logger::try_init().ok();
}

/// Fresh random node id in the service's format.
pub fn node_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Minimal node payload, as returned for a node that never ran.
pub fn node_json(id: &str, status: &str) -> Value {
    json!({ "id": id, "status": status })
}

/// Node payload with the console fields a running node carries.
pub fn node_json_full(id: &str, status: &str, vnc_port: u16, guac_url: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "vnc_port": vnc_port,
        "guac_url": guac_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_json_shapes() {
        let minimal = node_json("abc", "created");
        assert_eq!(minimal["status"], "created");
        assert!(minimal.get("vnc_port").is_none());

        let full = node_json_full("abc", "running", 5901, "http://127.0.0.1/guac");
        assert_eq!(full["vnc_port"], 5901);
    }

    #[test]
    fn test_node_ids_are_unique() {
        assert_ne!(node_id(), node_id());
    }
}
