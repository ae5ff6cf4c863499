//! The `handle` subcommand: read one payload, dispatch it, print the
//! report.

use std::io::Read;

use vigil_core::dispatch::{dispatch, HookOutcome};
use vigil_core::events::HookPayload;
use vigil_core::storage::StorageConfig;

const BANNER_WIDTH: usize = 50;

pub fn run() -> Result<(), String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read stdin: {}", e))?;

    // Claude Code occasionally fires hooks with no payload; that is a
    // no-op, not an error.
    if input.trim().is_empty() {
        tracing::debug!("empty hook input");
        return Ok(());
    }

    let payload: HookPayload =
        serde_json::from_str(&input).map_err(|e| format!("failed to parse hook payload: {}", e))?;

    let config = StorageConfig::locate().map_err(|e| e.to_string())?;

    match dispatch(&payload, &config).map_err(|e| e.to_string())? {
        HookOutcome::Handled { heading, messages } => {
            print!("{}", render_report(heading, &messages));
        }
        HookOutcome::Skipped { reason } => {
            tracing::debug!(reason, "payload skipped");
        }
    }
    Ok(())
}

/// Render messages for the console. A heading draws a banner around the
/// messages; without one they print as plain lines. No messages, no
/// output, banner or not.
fn render_report(heading: Option<&str>, messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    match heading {
        Some(heading) => {
            let rule = "━".repeat(BANNER_WIDTH);
            out.push('\n');
            out.push_str(&rule);
            out.push('\n');
            out.push_str(heading);
            out.push('\n');
            out.push_str(&rule);
            out.push('\n');
            for message in messages {
                out.push_str(message);
                out.push('\n');
            }
            out.push_str(&rule);
            out.push('\n');
        }
        None => {
            for message in messages {
                out.push_str(message);
                out.push('\n');
            }
        }
    }
    out
}
