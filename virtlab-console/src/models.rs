use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status as reported by the node service.
///
/// The server owns this value; any status string it may grow in the future
/// must survive a decode without failing, so unknown values land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    Created,
    Running,
    Stopped,
    Other(String),
}

impl NodeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            NodeStatus::Created => "created",
            NodeStatus::Running => "running",
            NodeStatus::Stopped => "stopped",
            NodeStatus::Other(s) => s,
        }
    }
}

impl From<String> for NodeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "created" => NodeStatus::Created,
            "running" => NodeStatus::Running,
            "stopped" => NodeStatus::Stopped,
            _ => NodeStatus::Other(value),
        }
    }
}

impl From<NodeStatus> for String {
    fn from(value: NodeStatus) -> Self {
        match value {
            NodeStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one managed node, exactly as the service reports it.
/// The client never mutates these; a fresh list replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnc_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guac_url: Option<String>,
}

impl Node {
    /// First 8 characters of the id, the form shown in the node table.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_known_values() {
        assert_eq!(NodeStatus::from("created".to_string()), NodeStatus::Created);
        assert_eq!(NodeStatus::from("running".to_string()), NodeStatus::Running);
        assert_eq!(NodeStatus::from("stopped".to_string()), NodeStatus::Stopped);
    }

    #[test]
    fn test_status_unknown_value_round_trips() {
        let status = NodeStatus::from("paused".to_string());
        assert_eq!(status, NodeStatus::Other("paused".to_string()));
        assert_eq!(String::from(status), "paused");
    }

    #[test]
    fn test_node_decodes_without_optional_fields() {
        let node: Node = serde_json::from_str(r#"{"id":"abc123","status":"created"}"#).unwrap();
        assert_eq!(node.id, "abc123");
        assert_eq!(node.status, NodeStatus::Created);
        assert!(node.vnc_port.is_none());
        assert!(node.guac_url.is_none());
    }

    #[test]
    fn test_node_decodes_full_payload() {
        let raw = r#"{"id":"1f1b6a2e-0000-4000-8000-000000000000","status":"running","vnc_port":5901,"guac_url":"http://localhost:3001/guacamole/#/client/abc"}"#;
        let node: Node = serde_json::from_str(raw).unwrap();
        assert_eq!(node.status, NodeStatus::Running);
        assert_eq!(node.vnc_port, Some(5901));
        assert!(node.guac_url.as_deref().unwrap().contains("guacamole"));
    }

    #[test]
    fn test_short_id() {
        let node: Node =
            serde_json::from_str(r#"{"id":"1f1b6a2e-0000-4000-8000-000000000000","status":"created"}"#)
                .unwrap();
        assert_eq!(node.short_id(), "1f1b6a2e");

        let tiny: Node = serde_json::from_str(r#"{"id":"ab","status":"created"}"#).unwrap();
        assert_eq!(tiny.short_id(), "ab");
    }
}
