//! Virtlab Console - terminal client for the virtlab node service
//!
//! Keeps a polled view of the node fleet and drives lifecycle commands:
//! - `nodes` renders the current view
//! - `create`, `run`, `stop`, `wipe`, `delete` send commands to the service
//! - destructive deletion asks for confirmation first

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use virtlab_console::notify::{TerminalGate, TerminalNotifier};
use virtlab_console::ui::{self, NodeCommand};
use virtlab_console::{ApiClient, ConsoleConfig, ConsoleSession};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    if ConsoleConfig::is_first_time_setup() {
        let defaults = ConsoleConfig::default();
        defaults
            .save()
            .await
            .context("Failed to write initial config")?;
        info!(
            "wrote default config to {}",
            ConsoleConfig::config_file_path()?.display()
        );
    }

    let config = ConsoleConfig::load().await.context("Failed to load config")?;
    info!("using node service at {}", config.api.base_url);

    let api = ApiClient::new(&config.api.base_url);
    let session = ConsoleSession::start(
        api,
        config.poll_interval(),
        Arc::new(TerminalNotifier),
        Arc::new(TerminalGate),
    );

    println!("virtlab console - type 'help' for commands");
    repl(&session).await?;

    session.shutdown();
    Ok(())
}

async fn repl(session: &ConsoleSession) -> Result<()> {
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout()).ok();

        let line = read_line().await.context("Failed to read input")?;
        let Some(line) = line else {
            // stdin closed
            return Ok(());
        };

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let argument = parts.next();

        match command {
            "nodes" | "ls" => print!("{}", ui::render_view(&session.snapshot())),
            "refresh" => session.refresh().await,
            "create" => session.create_node().await,
            "run" => node_command(session, NodeCommand::Run, argument).await,
            "stop" => node_command(session, NodeCommand::Stop, argument).await,
            "wipe" => node_command(session, NodeCommand::Wipe, argument).await,
            "delete" => node_command(session, NodeCommand::Delete, argument).await,
            "help" => print_help(),
            "quit" | "exit" => return Ok(()),
            other => println!("unknown command '{other}', type 'help'"),
        }
    }
}

/// Gate a per-node command against the current view, then dispatch it.
async fn node_command(session: &ConsoleSession, command: NodeCommand, argument: Option<&str>) {
    let Some(id) = argument else {
        println!("usage: {} <node-id>", command.verb());
        return;
    };

    let snapshot = session.snapshot();
    let node = match ui::resolve_target(&snapshot.nodes, id, command) {
        Ok(node) => node,
        Err(reason) => {
            println!("{reason}");
            return;
        }
    };
    let target = node.id.clone();

    match command {
        NodeCommand::Run => session.run_node(&target).await,
        NodeCommand::Stop => session.stop_node(&target).await,
        NodeCommand::Wipe => session.wipe_node(&target).await,
        NodeCommand::Delete => session.delete_node(&target).await,
    }
}

/// Read one line from stdin without blocking the runtime.
async fn read_line() -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut buffer = String::new();
        match std::io::stdin().read_line(&mut buffer) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buffer.trim().to_string())),
            Err(e) => Err(e),
        }
    })
    .await??;
    Ok(line)
}

fn print_help() {
    println!("commands:");
    println!("  nodes | ls      show the node table");
    println!("  refresh         fetch the node list now");
    println!("  create          create a new node");
    println!("  run <id>        start a node");
    println!("  stop <id>       stop a running node");
    println!("  wipe <id>       reset a node's disk");
    println!("  delete <id>     permanently delete a node");
    println!("  quit | exit     leave the console");
}
