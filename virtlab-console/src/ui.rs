//! Terminal rendering and command gating
//!
//! Pure functions over a `ViewState` snapshot. Rendering never touches the
//! shared lock and gating never talks to the network; both work on the data
//! the caller already holds.

use crate::models::{Node, NodeStatus};
use crate::state::ViewState;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Node commands a user can address at a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCommand {
    Run,
    Stop,
    Wipe,
    Delete,
}

impl NodeCommand {
    pub fn verb(&self) -> &'static str {
        match self {
            NodeCommand::Run => "run",
            NodeCommand::Stop => "stop",
            NodeCommand::Wipe => "wipe",
            NodeCommand::Delete => "delete",
        }
    }
}

/// Find the node a command targets and check the command makes sense for its
/// current status. Accepts the full id or the shortened display id.
///
/// The service re-validates every command; this gate only saves the user a
/// round trip for requests that are certain to be refused.
pub fn resolve_target<'a>(
    nodes: &'a [Node],
    id: &str,
    command: NodeCommand,
) -> Result<&'a Node, String> {
    let node = nodes
        .iter()
        .find(|n| n.id == id || n.short_id() == id)
        .ok_or_else(|| format!("no node with id '{id}'"))?;

    match (command, &node.status) {
        (NodeCommand::Run, NodeStatus::Running) => {
            Err(format!("node {} is already running", node.short_id()))
        }
        (NodeCommand::Stop, status) if *status != NodeStatus::Running => {
            Err(format!("node {} is not running", node.short_id()))
        }
        (NodeCommand::Wipe, NodeStatus::Running) => {
            Err(format!("node {} must be stopped before wiping", node.short_id()))
        }
        _ => Ok(node),
    }
}

/// Render the node table plus loading/error/staleness footer lines.
pub fn render_view(view: &ViewState) -> String {
    let mut out = String::new();

    if view.nodes.is_empty() {
        out.push_str("No nodes.\n");
    } else {
        out.push_str(&format!(
            "{:<10} {:<10} {:<8} CONSOLE\n",
            "ID", "STATUS", "VNC"
        ));
        for node in &view.nodes {
            let vnc = node
                .vnc_port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            let console = node.guac_url.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "{:<10} {:<10} {:<8} {}\n",
                node.short_id(),
                node.status,
                vnc,
                console
            ));
        }
    }

    if view.loading {
        out.push_str("(refreshing...)\n");
    }
    if let Some(error) = &view.error {
        out.push_str(&format!("last error: {error}\n"));
    }
    if let Some(synced) = view.last_synced {
        out.push_str(&format!("synced {}\n", describe_sync_age(synced)));
    }

    out
}

fn describe_sync_age(synced: OffsetDateTime) -> String {
    let age = OffsetDateTime::now_utc() - synced;
    let secs = age.whole_seconds();
    if secs < 2 {
        "just now".to_string()
    } else if secs < 120 {
        format!("{secs}s ago")
    } else {
        synced
            .format(&Rfc3339)
            .unwrap_or_else(|_| "at an unknown time".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, status: NodeStatus) -> Node {
        Node {
            id: id.to_string(),
            status,
            vnc_port: None,
            guac_url: None,
        }
    }

    #[test]
    fn test_resolve_by_full_and_short_id() {
        let nodes = vec![node("abcdef12-3456-7890", NodeStatus::Stopped)];

        let by_full = resolve_target(&nodes, "abcdef12-3456-7890", NodeCommand::Run);
        assert!(by_full.is_ok());

        let by_short = resolve_target(&nodes, "abcdef12", NodeCommand::Run);
        assert!(by_short.is_ok());
    }

    #[test]
    fn test_unknown_id_is_refused() {
        let nodes = vec![node("abcdef12-3456-7890", NodeStatus::Stopped)];
        let err = resolve_target(&nodes, "missing", NodeCommand::Run).unwrap_err();
        assert!(err.contains("missing"));
    }

    #[test]
    fn test_run_refused_while_running() {
        let nodes = vec![node("abcdef12-3456-7890", NodeStatus::Running)];
        assert!(resolve_target(&nodes, "abcdef12", NodeCommand::Run).is_err());
    }

    #[test]
    fn test_stop_refused_unless_running() {
        let stopped = vec![node("abcdef12-3456-7890", NodeStatus::Stopped)];
        assert!(resolve_target(&stopped, "abcdef12", NodeCommand::Stop).is_err());

        let running = vec![node("abcdef12-3456-7890", NodeStatus::Running)];
        assert!(resolve_target(&running, "abcdef12", NodeCommand::Stop).is_ok());
    }

    #[test]
    fn test_wipe_refused_while_running() {
        let nodes = vec![node("abcdef12-3456-7890", NodeStatus::Running)];
        assert!(resolve_target(&nodes, "abcdef12", NodeCommand::Wipe).is_err());
    }

    #[test]
    fn test_delete_allowed_in_any_status() {
        for status in [NodeStatus::Created, NodeStatus::Running, NodeStatus::Stopped] {
            let nodes = vec![node("abcdef12-3456-7890", status)];
            assert!(resolve_target(&nodes, "abcdef12", NodeCommand::Delete).is_ok());
        }
    }

    #[test]
    fn test_render_empty_view() {
        let view = ViewState::default();
        let out = render_view(&view);
        assert!(out.contains("No nodes."));
        assert!(!out.contains("refreshing"));
    }

    #[test]
    fn test_render_lists_nodes_and_error() {
        let view = ViewState {
            nodes: vec![Node {
                id: "abcdef12-3456-7890".to_string(),
                status: NodeStatus::Running,
                vnc_port: Some(5901),
                guac_url: Some("http://127.0.0.1:8080/guac/abc".to_string()),
            }],
            loading: true,
            error: Some("boom".to_string()),
            last_synced: None,
        };
        let out = render_view(&view);
        assert!(out.contains("abcdef12"));
        assert!(out.contains("running"));
        assert!(out.contains("5901"));
        assert!(out.contains("(refreshing...)"));
        assert!(out.contains("last error: boom"));
    }
}
