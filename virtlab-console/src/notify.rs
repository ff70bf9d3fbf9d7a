//! Presentation-owned seams for user interaction
//!
//! The dispatcher talks to the user only through these two traits: a blocking
//! notification for command failures and a yes/no gate for destructive
//! commands. The terminal implementations live here; tests inject recording
//! stand-ins instead.

use std::io::{self, BufRead, Write};

/// Immediate, user-facing notification. Allowed to interrupt the user's
/// interaction; the call returns once the user has acknowledged the message.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Synchronous yes/no gate asked before a destructive command is dispatched.
pub trait ConfirmGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Prints the message prominently and blocks until Enter is pressed.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!();
        println!("!! Error: {message}");
        print!("   press Enter to continue ");
        io::stdout().flush().ok();

        let mut ack = String::new();
        io::stdin().lock().read_line(&mut ack).ok();
    }
}

/// Asks `[y/N]` on the terminal; anything but an explicit yes declines.
pub struct TerminalGate;

impl ConfirmGate for TerminalGate {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        io::stdout().flush().ok();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
