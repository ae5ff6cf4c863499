//! Hook event dispatch.
//!
//! One entry point, [`dispatch`], takes a decoded payload and produces
//! a [`HookOutcome`]: either messages for the hook binary to print or
//! a note that the event was not ours to handle. Session events
//! delegate to the lifecycle; prompt events classify; tool events run
//! the staging, checking, and formatting pipeline in order.

use std::path::Path;

use crate::checks;
use crate::classify;
use crate::error::Result;
use crate::events::{HookEvent, HookPayload};
use crate::format::{self, FormatResult};
use crate::git;
use crate::logs;
use crate::session::SessionLifecycle;
use crate::storage::StorageConfig;
use crate::types::ErrorInfo;

/// Banner heading for session-start reports.
pub const SESSION_START_HEADING: &str = "🚀 Claude Code Session Started";
/// Banner heading for session-stop reports.
pub const SESSION_STOP_HEADING: &str = "📋 Session Summary";

/// Most detected issues echoed per event; the rest are elided.
const MAX_ISSUES_SHOWN: usize = 3;

/// What the hook binary should do with a handled payload.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    Handled {
        /// Banner heading; `None` prints messages without framing.
        heading: Option<&'static str>,
        messages: Vec<String>,
    },
    Skipped {
        reason: &'static str,
    },
}

impl HookOutcome {
    fn handled(heading: Option<&'static str>, messages: Vec<String>) -> Self {
        HookOutcome::Handled { heading, messages }
    }

    fn skipped(reason: &'static str) -> Self {
        HookOutcome::Skipped { reason }
    }
}

/// Handle one hook payload end to end.
pub fn dispatch(payload: &HookPayload, config: &StorageConfig) -> Result<HookOutcome> {
    let event = match payload.to_event() {
        Some(event) => event,
        None => return Ok(HookOutcome::skipped("unrecognized event")),
    };
    let workdir = payload.resolve_cwd();

    match event {
        HookEvent::SessionStart { session_id } => {
            let report = SessionLifecycle::new(config.clone()).start(&session_id, &workdir)?;
            Ok(HookOutcome::handled(
                Some(SESSION_START_HEADING),
                report.messages,
            ))
        }
        HookEvent::UserPromptSubmit { prompt, .. } => {
            Ok(HookOutcome::handled(None, prompt_messages(&prompt)))
        }
        HookEvent::PostToolUse {
            tool_name,
            file_path,
            ..
        } => post_tool_use(&tool_name, file_path.as_deref(), &workdir, config),
        HookEvent::Stop { session_id } => {
            let report = SessionLifecycle::new(config.clone()).stop(&session_id, &workdir)?;
            Ok(HookOutcome::handled(
                Some(SESSION_STOP_HEADING),
                report.messages,
            ))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Prompt Events
// ═══════════════════════════════════════════════════════════════════════════

fn prompt_messages(prompt: &str) -> Vec<String> {
    let mut messages = Vec::new();

    if let Some(intent) = classify::detect_intent(prompt) {
        messages.push(format!("{} Detected intent: {}", intent.emoji(), intent));
        messages.push(format!("💡 {}", intent.hint()));
    }

    if classify::mentions_credentials(prompt) {
        messages.push("🔐 Security-sensitive operation detected".to_string());
        messages.push(
            "💡 Consider running security-reviewer agent after implementation".to_string(),
        );
    }

    messages
}

// ═══════════════════════════════════════════════════════════════════════════
// Tool Events
// ═══════════════════════════════════════════════════════════════════════════

fn post_tool_use(
    tool_name: &str,
    file_path: Option<&str>,
    workdir: &Path,
    config: &StorageConfig,
) -> Result<HookOutcome> {
    if !classify::modifies_files(tool_name) {
        return Ok(HookOutcome::skipped("tool does not modify files"));
    }
    let path = match file_path {
        Some(path) => path,
        None => return Ok(HookOutcome::skipped("no file path in tool input")),
    };

    let mut messages = stage_messages(path, workdir);

    let errors = checks::detect_errors(path, workdir);
    if !errors.is_empty() {
        logs::append_error_entries(&config.error_log_file(), &errors)?;
        messages.extend(error_messages(path, &errors));
    }

    let format = format::format_file(path, workdir);
    if let Some(line) = format_report_line(&format, path) {
        messages.push(line);
    }

    Ok(HookOutcome::handled(None, messages))
}

/// Auto-staging policy: only inside a work tree, never for sensitive
/// paths, and only for files git already tracks. New files get a manual
/// staging hint instead.
fn stage_messages(path: &str, workdir: &Path) -> Vec<String> {
    if !git::in_work_tree(workdir) {
        return Vec::new();
    }
    if classify::is_sensitive_path(path) {
        return vec![format!("Excluded (sensitive): {}", path)];
    }
    if git::is_tracked(workdir, path) {
        if git::stage(workdir, path) {
            vec![format!("Staged: {}", path)]
        } else {
            Vec::new()
        }
    } else {
        vec![
            format!("New file (not auto-staged): {}", path),
            format!("Use 'git add {}' to stage manually", path),
        ]
    }
}

fn error_messages(path: &str, errors: &[ErrorInfo]) -> Vec<String> {
    let mut messages = vec![format!(
        "\n⚠️  {} issue(s) detected in {}:",
        errors.len(),
        path
    )];
    for error in errors.iter().take(MAX_ISSUES_SHOWN) {
        messages.push(format!("  [{}] {}", error.kind, error.message));
        if let Some(suggestion) = &error.suggestion {
            messages.push(format!("  💡 {}", suggestion));
        }
    }
    if errors.len() > MAX_ISSUES_SHOWN {
        messages.push(format!("  ... and {} more", errors.len() - MAX_ISSUES_SHOWN));
    }
    messages
}

fn format_report_line(result: &FormatResult, path: &str) -> Option<String> {
    if !result.formatted {
        return None;
    }
    match result.formatter {
        Some("gofmt") => Some(format!("Formatted Go file: {}", path)),
        Some("rustfmt") => Some(format!("Formatted Rust file: {}", path)),
        Some("biome") => Some(format!(
            "Formatted TypeScript/JavaScript file with Biome: {}",
            path
        )),
        Some("oxfmt") => Some(format!(
            "Formatted TypeScript/JavaScript file with oxfmt: {}",
            path
        )),
        Some("jq") => Some(format!("Formatted JSON file with jq: {}", path)),
        _ => None,
    }
}
